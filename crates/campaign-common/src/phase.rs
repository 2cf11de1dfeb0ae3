//! Before/during/after phases of a seeding flight comparison.

use serde::{Deserialize, Serialize};

/// The three comparison phases bracketing a seeding flight.
///
/// Ordering follows the comparison order: `Before < During < After`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Before,
    During,
    After,
}

impl Phase {
    /// All phases in comparison order.
    pub fn all() -> &'static [Phase] {
        &[Phase::Before, Phase::During, Phase::After]
    }

    /// Uppercase label used on rendered panels.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Before => "BEFORE",
            Phase::During => "DURING",
            Phase::After => "AFTER",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Before => write!(f, "before"),
            Phase::During => write!(f, "during"),
            Phase::After => write!(f, "after"),
        }
    }
}
