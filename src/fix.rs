use crate::prelude::{Epoch, Position};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One logged receiver position sample. The trajectory is expected
/// in chronological order, with unique sampling instants
/// (deduplication is the producer's task, not ours).
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReceiverFix {
    /// Sampling instant
    pub t: Epoch,
    /// Receiver [Position] at that instant
    pub position: Position,
}

impl ReceiverFix {
    /// Builds a new [ReceiverFix] from sampling instant and [Position].
    pub fn new(t: Epoch, position: Position) -> Self {
        Self { t, position }
    }
}
