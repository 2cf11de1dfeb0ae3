//! Errors for frame composition and sequence assembly.

use campaign_common::Phase;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SequenceError {
    #[error("Incomplete sequence: {got} of {required} phases present")]
    IncompleteSequence { required: usize, got: usize },

    #[error("Sequence has no frames")]
    EmptySequence,

    #[error("Frames out of phase order: {previous} followed by {next}")]
    PhaseOrder { previous: Phase, next: Phase },

    #[error("Frame timestamps not increasing across phases {previous} and {next}")]
    TimeOrder { previous: Phase, next: Phase },

    #[error("Image encoding failed: {0}")]
    Encode(String),
}
