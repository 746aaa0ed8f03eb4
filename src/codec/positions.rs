//! Gene positions — validated bit offsets into the DNA word

use super::CodecError;
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// Total width of a DNA word in bits
pub const DNA_BITS: usize = 256;

/// Strictly increasing bit offsets, one per gene.
///
/// The width of gene `i` is `offset[i + 1] - offset[i]`; the last gene extends
/// to [`DNA_BITS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct GenePositions {
    offsets: Vec<usize>,
}

impl GenePositions {
    /// Validate a list of offsets
    pub fn new(offsets: Vec<usize>) -> Result<Self, CodecError> {
        for (index, &offset) in offsets.iter().enumerate() {
            if offset >= DNA_BITS {
                return Err(CodecError::PositionOutOfRange { index, offset });
            }
            if index > 0 && offset <= offsets[index - 1] {
                return Err(CodecError::UnorderedPositions { index, offset });
            }
        }
        Ok(Self { offsets })
    }

    /// Build offsets from consecutive gene widths, starting at bit 0.
    ///
    /// The last width only has to fit inside the word; decoding still gives
    /// the last gene every remaining bit.
    pub fn from_widths(widths: &[usize]) -> Result<Self, CodecError> {
        let mut offsets = Vec::with_capacity(widths.len());
        let mut cursor = 0usize;
        for (index, &width) in widths.iter().enumerate() {
            if width == 0 {
                return Err(CodecError::UnorderedPositions { index: index + 1, offset: cursor });
            }
            if cursor + width > DNA_BITS {
                return Err(CodecError::PositionOutOfRange { index, offset: cursor });
            }
            offsets.push(cursor);
            cursor += width;
        }
        Self::new(offsets)
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Bit width allotted to gene `index`
    pub fn width(&self, index: usize) -> usize {
        match self.offsets.get(index + 1) {
            Some(next) => next - self.offsets[index],
            None => DNA_BITS - self.offsets[index],
        }
    }

    pub fn widths(&self) -> Vec<usize> {
        (0..self.offsets.len()).map(|i| self.width(i)).collect()
    }

    /// Largest value gene `index` can hold
    pub fn max_value(&self, index: usize) -> U256 {
        mask(self.width(index))
    }
}

impl TryFrom<Vec<usize>> for GenePositions {
    type Error = CodecError;

    fn try_from(offsets: Vec<usize>) -> Result<Self, Self::Error> {
        Self::new(offsets)
    }
}

impl From<GenePositions> for Vec<usize> {
    fn from(positions: GenePositions) -> Self {
        positions.offsets
    }
}

/// `2^width - 1`, saturating at the full word
pub(crate) fn mask(width: usize) -> U256 {
    if width >= DNA_BITS {
        U256::MAX
    } else {
        (U256::from(1u8) << width) - U256::from(1u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths() {
        let positions = GenePositions::new(vec![0, 8, 24, 32, 40]).unwrap();
        assert_eq!(positions.widths(), vec![8, 16, 8, 8, 216]);
        assert_eq!(positions.max_value(0), U256::from(255u64));
        assert_eq!(positions.max_value(1), U256::from(65535u64));
    }

    #[test]
    fn test_last_gene_takes_remaining_bits() {
        let positions = GenePositions::new(vec![0]).unwrap();
        assert_eq!(positions.width(0), DNA_BITS);
        assert_eq!(positions.max_value(0), U256::MAX);
    }

    #[test]
    fn test_rejects_unordered() {
        let err = GenePositions::new(vec![0, 8, 8]).unwrap_err();
        assert_eq!(err, CodecError::UnorderedPositions { index: 2, offset: 8 });

        let err = GenePositions::new(vec![16, 8]).unwrap_err();
        assert_eq!(err, CodecError::UnorderedPositions { index: 1, offset: 8 });
    }

    #[test]
    fn test_rejects_out_of_range() {
        let err = GenePositions::new(vec![0, 256]).unwrap_err();
        assert_eq!(err, CodecError::PositionOutOfRange { index: 1, offset: 256 });
        assert!(GenePositions::new(vec![0, 255]).is_ok());
    }

    #[test]
    fn test_from_widths() {
        let positions = GenePositions::from_widths(&[8, 16, 8, 8]).unwrap();
        assert_eq!(positions.offsets(), &[0, 8, 24, 32]);
        assert_eq!(positions.width(3), DNA_BITS - 32);

        assert!(GenePositions::from_widths(&[128, 129]).is_err());
        assert!(GenePositions::from_widths(&[8, 0, 8]).is_err());
    }

    #[test]
    fn test_serde_validates() {
        let positions: GenePositions = serde_json::from_str("[0, 4, 12]").unwrap();
        assert_eq!(positions.len(), 3);
        assert!(serde_json::from_str::<GenePositions>("[4, 0]").is_err());
    }
}
