use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::Accessor;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::PlayerError;

pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "flac", "wav", "ogg", "m4a", "aac"];

/// One playable audio file.
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    pub name: String,
    pub path: PathBuf,
    pub length: Duration,
}

impl Clip {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, length: Duration) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            length,
        }
    }

    /// Read title and length from the file's tags and audio properties.
    /// Untagged files are named after their stem.
    pub fn from_path(path: &Path) -> Result<Self, PlayerError> {
        if !path.is_file() {
            return Err(PlayerError::MissingFile(path.to_path_buf()));
        }
        let tagged = lofty::read_from_path(path).map_err(|e| PlayerError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let length = tagged.properties().duration();
        let name = tagged
            .primary_tag()
            .and_then(|tag| tag.title().map(|t| t.trim().to_string()))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| file_stem(path));

        Ok(Self::new(name, path, length))
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| AUDIO_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Fixed, ordered list of clips. Indexing wraps in both directions.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    clips: Vec<Clip>,
}

impl Playlist {
    pub fn new(clips: Vec<Clip>) -> Self {
        Self { clips }
    }

    /// Collect every readable audio file under `dir`, sorted by path.
    /// Files that fail to parse are skipped with a warning; a directory
    /// with nothing playable is [`PlayerError::EmptyPlaylist`].
    pub fn scan(dir: &Path) -> Result<Self, PlayerError> {
        if !dir.is_dir() {
            return Err(PlayerError::MissingFile(dir.to_path_buf()));
        }

        let mut clips = Vec::new();
        for entry in WalkDir::new(dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !entry.file_type().is_file() || !is_audio_file(path) {
                continue;
            }
            match Clip::from_path(path) {
                Ok(clip) => clips.push(clip),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable clip"),
            }
        }

        if clips.is_empty() {
            return Err(PlayerError::EmptyPlaylist);
        }
        debug!(dir = %dir.display(), count = clips.len(), "playlist scanned");
        Ok(Self::new(clips))
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Clip> {
        self.clips.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clip> {
        self.clips.iter()
    }

    pub fn next_index(&self, index: usize) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        Some((index + 1) % self.len())
    }

    pub fn prev_index(&self, index: usize) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        Some((index % self.len() + self.len() - 1) % self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn clip(name: &str) -> Clip {
        Clip::new(name, format!("/music/{}.mp3", name), Duration::from_secs(60))
    }

    /// 8 kHz mono 16-bit PCM, `millis` of silence.
    fn write_wav(path: &Path, millis: u32) {
        let data_len = 8000 * 2 * millis / 1000;
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
        bytes.extend_from_slice(b"WAVEfmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
        bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
        bytes.extend_from_slice(&8000u32.to_le_bytes());
        bytes.extend_from_slice(&16000u32.to_le_bytes());
        bytes.extend_from_slice(&2u16.to_le_bytes());
        bytes.extend_from_slice(&16u16.to_le_bytes());
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&data_len.to_le_bytes());
        bytes.resize(bytes.len() + data_len as usize, 0);
        fs::write(path, bytes).unwrap();
    }

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("neonbox-{}-{}", tag, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_wrap_around_both_directions() {
        let playlist = Playlist::new(vec![clip("a"), clip("b"), clip("c")]);
        assert_eq!(playlist.next_index(2), Some(0));
        assert_eq!(playlist.prev_index(0), Some(2));
        assert_eq!(playlist.prev_index(1), Some(0));
    }

    #[test]
    fn test_empty_playlist_has_no_neighbours() {
        let playlist = Playlist::default();
        assert_eq!(playlist.next_index(0), None);
        assert_eq!(playlist.prev_index(0), None);
    }

    #[test]
    fn test_extension_filter() {
        assert!(is_audio_file(Path::new("song.MP3")));
        assert!(is_audio_file(Path::new("a/b/c.flac")));
        assert!(!is_audio_file(Path::new("cover.png")));
        assert!(!is_audio_file(Path::new("README")));
    }

    #[test]
    fn test_scan_missing_dir() {
        let result = Playlist::scan(Path::new("/definitely/not/here/neonbox"));
        assert!(matches!(result, Err(PlayerError::MissingFile(_))));
    }

    #[test]
    fn test_scan_without_audio_is_empty_playlist() {
        let dir = scratch_dir("no-audio");
        fs::write(dir.join("notes.txt"), "not audio").unwrap();
        let result = Playlist::scan(&dir);
        assert!(matches!(result, Err(PlayerError::EmptyPlaylist)));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_scan_sorts_and_skips_junk() {
        let dir = scratch_dir("scan");
        write_wav(&dir.join("b_second.wav"), 1000);
        write_wav(&dir.join("a_first.wav"), 500);
        fs::write(dir.join("notes.txt"), "not audio").unwrap();
        fs::write(dir.join("broken.wav"), "not really a wav").unwrap();

        let playlist = Playlist::scan(&dir).unwrap();
        let names: Vec<_> = playlist.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a_first", "b_second"]);

        let second = playlist.get(1).unwrap();
        let millis = second.length.as_millis() as i64;
        assert!((millis - 1000).abs() <= 50, "length was {}ms", millis);

        let _ = fs::remove_dir_all(&dir);
    }
}
