//! Bit-Field Codec — pack bounded gene values into one 256-bit DNA word
//!
//! Each gene owns a window of bits starting at its offset. The window runs up
//! to the next gene's offset, and the last gene runs up to the 256-bit ceiling.
//! Encoding is checked: a value that does not fit its window is rejected, never
//! truncated. Decoding masks each window and ignores everything else.

mod packing;
mod positions;

pub use packing::{decode, encode};
pub use positions::{GenePositions, DNA_BITS};

/// Codec errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("gene {index} needs {bits} bits but only {width} are allotted")]
    Overflow { index: usize, bits: usize, width: usize },

    #[error("{values} values supplied for {positions} gene positions")]
    LengthMismatch { values: usize, positions: usize },

    #[error("gene positions must be strictly increasing (offset {offset} at index {index})")]
    UnorderedPositions { index: usize, offset: usize },

    #[error("gene offset {offset} at index {index} is outside the 256-bit word")]
    PositionOutOfRange { index: usize, offset: usize },
}
