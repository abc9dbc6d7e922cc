//! Asset lookup relative to the platform's assets directory.

use std::path::{Path, PathBuf};

/// Subdirectory searched when an asset is not directly under the root.
const FALLBACK_SUBDIR: &str = "videos";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Desktop,
    /// Assets are served over HTTP; nothing can be checked on disk.
    Web,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            Platform::Web
        } else {
            Platform::Desktop
        }
    }
}

#[derive(Debug, Clone)]
pub struct AssetRoot {
    dir: PathBuf,
    platform: Platform,
}

impl AssetRoot {
    pub fn new(dir: impl Into<PathBuf>, platform: Platform) -> Self {
        Self {
            dir: dir.into(),
            platform,
        }
    }

    /// `~/.local/share/neonbox/assets` or the platform equivalent.
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .map(|d| d.join("neonbox").join("assets"))
            .unwrap_or_else(|| PathBuf::from("assets"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Path of `name` under the root, falling back to the `videos/`
    /// subdirectory when it is only found there.
    pub fn resolve(&self, name: &str) -> PathBuf {
        let direct = self.dir.join(name);
        if self.platform == Platform::Web || direct.exists() {
            return direct;
        }
        let nested = self.dir.join(FALLBACK_SUBDIR).join(name);
        if nested.exists() {
            nested
        } else {
            direct
        }
    }

    /// Whether `name` resolves to a file on disk. Always `true` on web.
    pub fn exists(&self, name: &str) -> bool {
        self.platform == Platform::Web || self.resolve(name).is_file()
    }

    /// URL for `name`: a plain path on web, `file://` everywhere else.
    pub fn url(&self, name: &str) -> String {
        let path = self.resolve(name);
        match self.platform {
            Platform::Web => path.to_string_lossy().into_owned(),
            Platform::Desktop => {
                let absolute = if path.is_absolute() {
                    path
                } else {
                    std::env::current_dir()
                        .map(|cwd| cwd.join(&path))
                        .unwrap_or(path)
                };
                format!("file://{}", absolute.display())
            }
        }
    }
}

impl Default for AssetRoot {
    fn default() -> Self {
        Self::new(Self::default_dir(), Platform::current())
    }
}
