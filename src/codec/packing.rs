//! Encode and decode gene values at fixed bit offsets

use super::positions::{mask, GenePositions};
use super::CodecError;
use alloy_primitives::U256;

/// Pack `values` into one DNA word, gene `i` starting at bit `positions[i]`.
///
/// All-or-nothing: the first value that does not fit its window fails the
/// whole call.
pub fn encode(values: &[U256], positions: &GenePositions) -> Result<U256, CodecError> {
    if values.len() != positions.len() {
        return Err(CodecError::LengthMismatch {
            values: values.len(),
            positions: positions.len(),
        });
    }

    let mut dna = U256::ZERO;
    for (index, (value, &offset)) in values.iter().zip(positions.offsets()).enumerate() {
        let width = positions.width(index);
        let bits = value.bit_len();
        if bits > width {
            return Err(CodecError::Overflow { index, bits, width });
        }
        let shifted = value
            .checked_shl(offset)
            .ok_or(CodecError::Overflow { index, bits, width })?;
        dna |= shifted;
    }
    Ok(dna)
}

/// Extract every gene window from `dna`.
///
/// Never fails. Bits below the first offset are not part of any gene and are
/// dropped, so any word decodes, including ones `encode` never produced.
pub fn decode(dna: U256, positions: &GenePositions) -> Vec<U256> {
    positions
        .offsets()
        .iter()
        .enumerate()
        .map(|(index, &offset)| (dna >> offset) & mask(positions.width(index)))
        .collect()
}
