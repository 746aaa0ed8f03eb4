//! Species — trait definitions and DNA → metadata resolution
//!
//! A species is an ordered list of categorical traits. A token's DNA is read
//! as a mixed-radix number: the first trait takes the lowest digit (base = its
//! option count), the next trait the following digit, and so on.

mod metadata;
mod registry;
mod resolver;

pub use metadata::{SpecieMetadata, SpecieTrait, ValueOption};
pub use registry::{Snapshot, TraitRegistry};
pub use resolver::{parse_dna, resolve, ResolvedMetadata, ResolvedTrait};

/// Errors raised while resolving DNA or composing it from option indices
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("invalid token id '{input}': {reason}")]
    InvalidArgument { input: String, reason: String },

    #[error("option index {index} out of range for trait '{name}' ({cardinality} options)")]
    IndexOutOfRange { name: String, index: usize, cardinality: usize },

    #[error("{given} option indices supplied for {expected} traits")]
    ArityMismatch { given: usize, expected: usize },

    #[error("trait combination does not fit in a 256-bit DNA")]
    DnaOverflow,
}

/// Errors raised while building a trait table
#[derive(Debug, thiserror::Error)]
pub enum SpeciesError {
    #[error("a species needs at least one trait")]
    NoTraits,

    #[error("trait '{0}' has no options")]
    EmptyTrait(String),

    #[error("no trait definition file configured")]
    NoSource,

    #[error("failed to read trait definitions: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse trait definitions: {0}")]
    Parse(#[from] serde_json::Error),
}
