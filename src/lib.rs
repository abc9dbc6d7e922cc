pub mod anim;
pub mod app;
pub mod assets;
pub mod audio;
pub mod error;
pub mod intro;
pub mod logging;
pub mod panel;
pub mod player;
pub mod ui;

pub use error::PlayerError;
