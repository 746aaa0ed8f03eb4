//! nft-dna — deterministic NFT trait metadata from packed on-chain DNA
//!
//! Two packing laws live side by side:
//! - `codec`: genes at fixed bit offsets inside a 256-bit word
//! - `species`: traits as mixed-radix digits, one radix per trait cardinality
//!
//! Both are pure; the `server` module is a thin HTTP layer on top.

pub mod codec;
pub mod config;
pub mod server;
pub mod species;

pub use alloy_primitives::U256;
pub use codec::{decode, encode, CodecError, GenePositions};
pub use config::ServerConfig;
pub use species::{
    parse_dna, resolve, ResolvedMetadata, SpecieMetadata, SpecieTrait, TraitRegistry, ValueOption,
};
