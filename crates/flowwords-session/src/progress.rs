//! The "Connecting..." progress indicator.

/// Cycles a label through four frames: `""`, `"."`, `".."`, `"..."`.
///
/// One frame per [`advance`](Self::advance); after the last frame it wraps
/// back to the bare label.
#[derive(Debug, Clone)]
pub struct ProgressIndicator {
    label: String,
    frame: usize,
}

impl ProgressIndicator {
    /// Number of distinct frames.
    pub const FRAMES: usize = 4;

    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            frame: 0,
        }
    }

    /// Index of the current frame (0–3) = number of dots shown.
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Text for the current frame.
    pub fn current(&self) -> String {
        format!("{}{}", self.label, ".".repeat(self.frame))
    }

    /// Moves to the next frame and returns its text.
    pub fn advance(&mut self) -> String {
        self.frame = (self.frame + 1) % Self::FRAMES;
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_at_bare_label() {
        let p = ProgressIndicator::new("Connecting");
        assert_eq!(p.frame(), 0);
        assert_eq!(p.current(), "Connecting");
    }

    #[test]
    fn test_advance_cycles_four_frames_and_wraps() {
        let mut p = ProgressIndicator::new("Connecting");
        let frames: Vec<String> = (0..8).map(|_| p.advance()).collect();
        assert_eq!(
            frames,
            [
                "Connecting.",
                "Connecting..",
                "Connecting...",
                "Connecting",
                "Connecting.",
                "Connecting..",
                "Connecting...",
                "Connecting",
            ]
        );
    }

    #[test]
    fn test_empty_label_shows_only_dots() {
        let mut p = ProgressIndicator::new("");
        assert_eq!(p.advance(), ".");
        assert_eq!(p.advance(), "..");
    }
}
