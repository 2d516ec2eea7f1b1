//! Player intents and the per-tick command set

use serde::{Deserialize, Serialize};

/// A single player command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Intent {
    LaneLeft,
    LaneRight,
    Jump,
    Slide,
    Spin,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::LaneLeft => "laneLeft",
            Intent::LaneRight => "laneRight",
            Intent::Jump => "jump",
            Intent::Slide => "slide",
            Intent::Spin => "spin",
        }
    }

    /// Parse the wire name (also accepts snake_case)
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "laneLeft" | "lane_left" => Some(Intent::LaneLeft),
            "laneRight" | "lane_right" => Some(Intent::LaneRight),
            "jump" => Some(Intent::Jump),
            "slide" => Some(Intent::Slide),
            "spin" => Some(Intent::Spin),
            _ => None,
        }
    }
}

/// Input commands for a single tick (deterministic)
///
/// A set, not a queue: repeated presses between two ticks collapse into one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub lane_left: bool,
    pub lane_right: bool,
    pub jump: bool,
    pub slide: bool,
    pub spin: bool,
}

impl TickInput {
    pub fn set(&mut self, intent: Intent) {
        match intent {
            Intent::LaneLeft => self.lane_left = true,
            Intent::LaneRight => self.lane_right = true,
            Intent::Jump => self.jump = true,
            Intent::Slide => self.slide = true,
            Intent::Spin => self.spin = true,
        }
    }

    /// Take the buffered set, leaving it empty
    pub fn take(&mut self) -> TickInput {
        std::mem::take(self)
    }

    pub fn is_empty(&self) -> bool {
        *self == TickInput::default()
    }
}

impl From<Intent> for TickInput {
    fn from(intent: Intent) -> Self {
        let mut input = TickInput::default();
        input.set(intent);
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip() {
        for intent in [
            Intent::LaneLeft,
            Intent::LaneRight,
            Intent::Jump,
            Intent::Slide,
            Intent::Spin,
        ] {
            assert_eq!(Intent::from_str(intent.as_str()), Some(intent));
        }
        assert_eq!(Intent::from_str("dash"), None);
    }

    #[test]
    fn test_take_drains() {
        let mut buffer = TickInput::default();
        buffer.set(Intent::Jump);
        buffer.set(Intent::Jump);
        buffer.set(Intent::LaneLeft);

        let input = buffer.take();
        assert!(input.jump && input.lane_left);
        assert!(!input.slide);
        assert!(buffer.is_empty());
    }
}
