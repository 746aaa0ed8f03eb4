//! DNA → trait metadata resolution

use super::{ResolveError, SpecieMetadata};
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// One resolved trait of a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTrait {
    pub trait_name: String,
    pub value_name: String,
    #[serde(rename = "displayType")]
    pub display_type: String,
    pub image: String,
}

/// Resolved traits in the same order as the species definition
pub type ResolvedMetadata = Vec<ResolvedTrait>;

/// Resolve `dna` against a trait table.
///
/// Each trait consumes one mixed-radix digit: `index = dna % C`, then
/// `dna /= C`. Whatever remains after the last trait is discarded, so every
/// DNA resolves, including values beyond `species.dna_space()`. That headroom
/// lets a collection append traits later without re-minting.
pub fn resolve(dna: U256, species: &SpecieMetadata) -> ResolvedMetadata {
    let mut rest = dna;
    species
        .traits()
        .iter()
        .map(|t| {
            // validated non-empty, so the divisor is never zero
            let radix = U256::from(t.cardinality());
            let digit = rest % radix;
            rest /= radix;
            // digit < cardinality, which is a usize
            let option = &t.options[digit.to::<usize>()];
            ResolvedTrait {
                trait_name: t.name.clone(),
                value_name: option.value_name.clone(),
                display_type: t.display_type.clone(),
                image: option.image.clone(),
            }
        })
        .collect()
}

/// Parse a caller-supplied token id into a DNA word.
///
/// Accepts decimal, or hex with a `0x` prefix. Negative numbers, empty input,
/// stray characters and anything wider than 256 bits are rejected.
pub fn parse_dna(input: &str) -> Result<U256, ResolveError> {
    let invalid = |reason: &str| ResolveError::InvalidArgument {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let text = input.trim();
    if text.is_empty() {
        return Err(invalid("empty"));
    }
    if text.starts_with('-') {
        return Err(invalid("must be a non-negative integer"));
    }

    let (digits, radix) = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (text, 10),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix as u32)) {
        return Err(invalid("not a number"));
    }
    U256::from_str_radix(digits, radix).map_err(|_| invalid("exceeds 256 bits"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::{SpecieTrait, ValueOption};

    fn picks(resolved: &ResolvedMetadata) -> Vec<&str> {
        resolved.iter().map(|r| r.value_name.as_str()).collect()
    }

    #[test]
    fn test_resolve_digits() {
        let species = SpecieMetadata::default_collection();

        let zero = resolve(U256::ZERO, &species);
        assert_eq!(picks(&zero), vec!["Round", "Happy", "Smile"]);

        let one = resolve(U256::from(1u64), &species);
        assert_eq!(picks(&one), vec!["Square", "Happy", "Smile"]);

        let last = resolve(U256::from(26u64), &species);
        assert_eq!(picks(&last), vec!["Tall", "Angry", "Open"]);

        let wrapped = resolve(U256::from(27u64), &species);
        assert_eq!(picks(&wrapped), picks(&zero));
    }

    #[test]
    fn test_resolve_is_sequential_not_independent() {
        let species = SpecieMetadata::default_collection();
        // 5 = 2 + 1*3: Body digit 2, Eyes digit 1
        let resolved = resolve(U256::from(5u64), &species);
        assert_eq!(picks(&resolved), vec!["Tall", "Sleepy", "Smile"]);
    }

    #[test]
    fn test_resolve_record_shape() {
        let species = SpecieMetadata::default_collection();
        let resolved = resolve(U256::from(1u64), &species);
        assert_eq!(
            resolved[0],
            ResolvedTrait {
                trait_name: "Body".into(),
                value_name: "Square".into(),
                display_type: "Image".into(),
                image: "body/square.png".into(),
            }
        );
        let json = serde_json::to_value(&resolved[0]).unwrap();
        assert_eq!(json["displayType"], "Image");
        assert_eq!(json["trait_name"], "Body");
    }

    #[test]
    fn test_order_follows_definition() {
        let species = SpecieMetadata::default_collection();
        let mut traits = species.traits().to_vec();
        traits.reverse();
        let reversed = SpecieMetadata::new(traits).unwrap();

        let dna = U256::from(1u64);
        let a = resolve(dna, &species);
        let b = resolve(dna, &reversed);

        let names = |r: &ResolvedMetadata| r.iter().map(|t| t.trait_name.clone()).collect::<Vec<_>>();
        assert_eq!(names(&a), vec!["Body", "Eyes", "Mouth"]);
        assert_eq!(names(&b), vec!["Mouth", "Eyes", "Body"]);
        // the low digit now selects the mouth instead of the body
        assert_eq!(b[0].value_name, "Frown");
        assert_eq!(b[2].value_name, "Round");
    }

    #[test]
    fn test_mixed_cardinalities_roundtrip() {
        let opts = |n: usize| -> Vec<ValueOption> {
            (0..n).map(|i| ValueOption::new(format!("v{}", i), "")).collect()
        };
        let species = SpecieMetadata::new(vec![
            SpecieTrait::new("A", "string", opts(2)),
            SpecieTrait::new("B", "string", opts(5)),
            SpecieTrait::new("C", "string", opts(7)),
        ])
        .unwrap();
        for a in 0..2 {
            for b in 0..5 {
                for c in 0..7 {
                    let dna = species.dna_for(&[a, b, c]).unwrap();
                    let resolved = resolve(dna, &species);
                    assert_eq!(
                        picks(&resolved),
                        vec![format!("v{}", a), format!("v{}", b), format!("v{}", c)]
                    );
                }
            }
        }
    }

    #[test]
    fn test_resolve_huge_dna() {
        let species = SpecieMetadata::default_collection();
        let resolved = resolve(U256::MAX, &species);
        assert_eq!(resolved.len(), 3);
    }

    #[test]
    fn test_parse_dna() {
        assert_eq!(parse_dna("5").unwrap(), U256::from(5u64));
        assert_eq!(parse_dna(" 42 ").unwrap(), U256::from(42u64));
        assert_eq!(parse_dna("0xff").unwrap(), U256::from(255u64));
        assert_eq!(parse_dna(&U256::MAX.to_string()).unwrap(), U256::MAX);

        for bad in ["", "abc", "-1", "12abc", "0x", "0xzz", "1.5"] {
            assert!(
                matches!(parse_dna(bad), Err(ResolveError::InvalidArgument { .. })),
                "{:?} should be rejected",
                bad
            );
        }
        // 2^256
        let too_big = "115792089237316195423570985008687907853269984665640564039457584007913129639936";
        assert!(parse_dna(too_big).is_err());
    }
}
