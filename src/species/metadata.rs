//! SpecieMetadata — the ordered trait table of one collection
//!
//! Trait order and option order are both part of the on-chain contract: the
//! position of a trait decides which DNA digit it reads, and the position of an
//! option decides which digit value selects it. Reordering either re-maps every
//! token ever minted, so the table is validated once and then frozen.

use super::{ResolveError, SpeciesError};
use alloy_primitives::U256;
use log::info;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

/// One selectable value of a trait
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueOption {
    pub value_name: String,
    /// Image reference (URI, CID, file name); passed through untouched
    #[serde(default)]
    pub image: String,
}

impl ValueOption {
    pub fn new(value_name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            value_name: value_name.into(),
            image: image.into(),
        }
    }
}

/// A named categorical axis, e.g. "Body" with its ordered options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecieTrait {
    pub name: String,
    /// Rendering hint for marketplaces ("Image", "string", ...)
    #[serde(rename = "displayType")]
    pub display_type: String,
    pub options: Vec<ValueOption>,
}

impl SpecieTrait {
    pub fn new(
        name: impl Into<String>,
        display_type: impl Into<String>,
        options: Vec<ValueOption>,
    ) -> Self {
        Self {
            name: name.into(),
            display_type: display_type.into(),
            options,
        }
    }

    /// Number of options, the radix of this trait's DNA digit
    pub fn cardinality(&self) -> usize {
        self.options.len()
    }
}

/// Validated, immutable trait table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TraitFile", into = "Vec<SpecieTrait>")]
pub struct SpecieMetadata {
    traits: Vec<SpecieTrait>,
}

/// On-disk forms: a bare array, or an object with a `traits` array
#[derive(Deserialize)]
#[serde(untagged)]
enum TraitFile {
    Bare(Vec<SpecieTrait>),
    Wrapped { traits: Vec<SpecieTrait> },
}

impl TryFrom<TraitFile> for SpecieMetadata {
    type Error = SpeciesError;

    fn try_from(file: TraitFile) -> Result<Self, Self::Error> {
        match file {
            TraitFile::Bare(traits) | TraitFile::Wrapped { traits } => Self::new(traits),
        }
    }
}

impl From<SpecieMetadata> for Vec<SpecieTrait> {
    fn from(metadata: SpecieMetadata) -> Self {
        metadata.traits
    }
}

impl SpecieMetadata {
    /// Validate a trait list: at least one trait, every trait with options
    pub fn new(traits: Vec<SpecieTrait>) -> Result<Self, SpeciesError> {
        if traits.is_empty() {
            return Err(SpeciesError::NoTraits);
        }
        if let Some(empty) = traits.iter().find(|t| t.options.is_empty()) {
            return Err(SpeciesError::EmptyTrait(empty.name.clone()));
        }
        Ok(Self { traits })
    }

    /// Parse a JSON trait definition document
    pub fn from_json(json: &str) -> Result<Self, SpeciesError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load trait definitions from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SpeciesError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let metadata = Self::from_json(&json)?;
        info!(
            "Loaded {} traits from {} (fingerprint {})",
            metadata.len(),
            path.display(),
            &metadata.fingerprint()[..16]
        );
        Ok(metadata)
    }

    /// Built-in three-trait collection used when no definition file is given
    pub fn default_collection() -> Self {
        let trait_of = |name: &str, values: [&str; 3]| {
            let dir = name.to_lowercase();
            let options = values
                .iter()
                .map(|v| ValueOption::new(*v, format!("{}/{}.png", dir, v.to_lowercase())))
                .collect();
            SpecieTrait::new(name, "Image", options)
        };
        Self {
            traits: vec![
                trait_of("Body", ["Round", "Square", "Tall"]),
                trait_of("Eyes", ["Happy", "Sleepy", "Angry"]),
                trait_of("Mouth", ["Smile", "Frown", "Open"]),
            ],
        }
    }

    pub fn traits(&self) -> &[SpecieTrait] {
        &self.traits
    }

    pub fn len(&self) -> usize {
        self.traits.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.traits.is_empty()
    }

    pub fn cardinalities(&self) -> Vec<usize> {
        self.traits.iter().map(SpecieTrait::cardinality).collect()
    }

    /// Number of distinct trait combinations, saturating at `U256::MAX`
    pub fn dna_space(&self) -> U256 {
        self.traits.iter().fold(U256::from(1u8), |acc, t| {
            acc.saturating_mul(U256::from(t.cardinality()))
        })
    }

    /// Smallest DNA that resolves to the given option index for every trait
    pub fn dna_for(&self, indices: &[usize]) -> Result<U256, ResolveError> {
        if indices.len() != self.traits.len() {
            return Err(ResolveError::ArityMismatch {
                given: indices.len(),
                expected: self.traits.len(),
            });
        }
        let mut dna = U256::ZERO;
        // Horner from the most significant digit (last trait) down
        for (t, &index) in self.traits.iter().zip(indices).rev() {
            if index >= t.cardinality() {
                return Err(ResolveError::IndexOutOfRange {
                    name: t.name.clone(),
                    index,
                    cardinality: t.cardinality(),
                });
            }
            dna = dna
                .checked_mul(U256::from(t.cardinality()))
                .and_then(|d| d.checked_add(U256::from(index)))
                .ok_or(ResolveError::DnaOverflow)?;
        }
        Ok(dna)
    }

    /// SHA256 over names, display types and options in table order
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for t in &self.traits {
            hash_field(&mut hasher, &t.name);
            hash_field(&mut hasher, &t.display_type);
            hasher.update((t.options.len() as u64).to_le_bytes());
            for option in &t.options {
                hash_field(&mut hasher, &option.value_name);
                hash_field(&mut hasher, &option.image);
            }
        }
        hex::encode(hasher.finalize())
    }

    pub fn summary(&self) -> String {
        let axes: Vec<String> = self
            .traits
            .iter()
            .map(|t| format!("{}({})", t.name, t.cardinality()))
            .collect();
        format!(
            "Species | {} traits [{}] | {} combinations",
            self.traits.len(),
            axes.join(", "),
            self.dna_space()
        )
    }
}

fn hash_field(hasher: &mut Sha256, s: &str) {
    hasher.update((s.len() as u64).to_le_bytes());
    hasher.update(s.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_collection() {
        let species = SpecieMetadata::default_collection();
        assert_eq!(species.len(), 3);
        assert_eq!(species.cardinalities(), vec![3, 3, 3]);
        assert_eq!(species.dna_space(), U256::from(27u64));
        println!("{}", species.summary());
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(SpecieMetadata::new(vec![]), Err(SpeciesError::NoTraits)));

        let traits = vec![
            SpecieTrait::new("Body", "Image", vec![ValueOption::new("Round", "r.png")]),
            SpecieTrait::new("Hat", "Image", vec![]),
        ];
        match SpecieMetadata::new(traits) {
            Err(SpeciesError::EmptyTrait(name)) => assert_eq!(name, "Hat"),
            other => panic!("expected EmptyTrait, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json_both_forms() {
        let bare = r#"[
            {"name": "Body", "displayType": "Image",
             "options": [{"value_name": "Round", "image": "body/round.png"}]}
        ]"#;
        let wrapped = r#"{"traits": [
            {"name": "Body", "displayType": "Image",
             "options": [{"value_name": "Round", "image": "body/round.png"}]}
        ]}"#;
        let a = SpecieMetadata::from_json(bare).unwrap();
        let b = SpecieMetadata::from_json(wrapped).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.traits()[0].display_type, "Image");
    }

    #[test]
    fn test_bundled_definition_file() {
        let species = SpecieMetadata::from_json(include_str!("../../demos/traits.json")).unwrap();
        assert_eq!(species.cardinalities(), vec![3, 3, 3, 2]);
        assert_eq!(species.dna_space(), U256::from(54u64));
        // same first three axes as the built-in collection
        assert_eq!(&species.traits()[..3], SpecieMetadata::default_collection().traits());
    }

    #[test]
    fn test_from_json_validates() {
        let json = r#"[{"name": "Body", "displayType": "Image", "options": []}]"#;
        assert!(SpecieMetadata::from_json(json).is_err());
        assert!(SpecieMetadata::from_json("[]").is_err());
        assert!(SpecieMetadata::from_json("not json").is_err());
    }

    #[test]
    fn test_serialize_keeps_display_type_name() {
        let species = SpecieMetadata::default_collection();
        let json = serde_json::to_value(&species).unwrap();
        assert_eq!(json[0]["displayType"], "Image");
        assert_eq!(json[2]["options"][1]["value_name"], "Frown");
    }

    #[test]
    fn test_dna_for() {
        let species = SpecieMetadata::default_collection();
        assert_eq!(species.dna_for(&[0, 0, 0]).unwrap(), U256::ZERO);
        assert_eq!(species.dna_for(&[1, 0, 0]).unwrap(), U256::from(1u64));
        assert_eq!(species.dna_for(&[0, 1, 0]).unwrap(), U256::from(3u64));
        assert_eq!(species.dna_for(&[2, 2, 2]).unwrap(), U256::from(26u64));

        assert!(matches!(
            species.dna_for(&[0, 3, 0]),
            Err(ResolveError::IndexOutOfRange { index: 3, cardinality: 3, .. })
        ));
        assert!(matches!(
            species.dna_for(&[0, 0]),
            Err(ResolveError::ArityMismatch { given: 2, expected: 3 })
        ));
    }

    #[test]
    fn test_fingerprint_tracks_order() {
        let species = SpecieMetadata::default_collection();
        assert_eq!(species.fingerprint(), SpecieMetadata::default_collection().fingerprint());
        assert_eq!(species.fingerprint().len(), 64);

        let mut traits = species.traits().to_vec();
        traits.swap(0, 1);
        let reordered = SpecieMetadata::new(traits).unwrap();
        assert_ne!(species.fingerprint(), reordered.fingerprint());
    }
}
