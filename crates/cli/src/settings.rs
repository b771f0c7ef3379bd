use std::path::PathBuf;

use engine::DEFAULT_SAVE_FILE;

pub const HELP_TEXT: &str = "Drag with left mouse. Click right while dragging to rotate.";

#[derive(Debug, Clone)]
pub struct Settings {
    pub title: String,
    /// Window size in physical pixels. The window is not resizable.
    pub width: u32,
    pub height: u32,
    pub save_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: format!("Cobble - {HELP_TEXT}"),
            width: 800,
            height: 600,
            save_path: PathBuf::from(DEFAULT_SAVE_FILE),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_match_the_classic_window() {
        let s = Settings::default();
        assert_eq!((s.width, s.height), (800, 600));
        assert_eq!(s.save_path, PathBuf::from("cobbles.rects"));
        assert!(s.title.contains(HELP_TEXT));
    }
}
