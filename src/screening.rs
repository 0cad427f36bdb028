//! Downstream decision: map a detected emotion onto a mental-state
//! screening category.

use std::fmt::{Display, Formatter};

/// Emotions treated as depression indicators by the screening step.
const DEPRESSION_MARKERS: [&str; 4] = ["angry", "sad", "fear", "disgust"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MentalState {
    Depressed,
    Normal,
}

impl Display for MentalState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Depressed => write!(f, "Depressed"),
            Self::Normal => write!(f, "Normal"),
        }
    }
}

/// Screen an emotion label. Unknown labels are treated as `Normal`; the
/// marker comparison ignores ASCII case.
pub fn screen(emotion: &str) -> MentalState {
    if DEPRESSION_MARKERS
        .iter()
        .any(|marker| marker.eq_ignore_ascii_case(emotion))
    {
        MentalState::Depressed
    } else {
        MentalState::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::{screen, MentalState};

    #[test]
    fn marker_emotions_screen_as_depressed() {
        for emotion in ["angry", "sad", "fear", "disgust", "Sad"] {
            assert_eq!(screen(emotion), MentalState::Depressed);
        }
    }

    #[test]
    fn other_emotions_screen_as_normal() {
        for emotion in ["happy", "neutral", "surprise", "unknown"] {
            assert_eq!(screen(emotion), MentalState::Normal);
        }
    }
}
