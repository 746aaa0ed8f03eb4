//! TraitRegistry — the process-wide handle on the current trait table
//!
//! Readers take an `Arc` to a complete snapshot and resolve against it without
//! holding any lock. A reload parses and validates the new table first, then
//! swaps the pointer, so no reader ever sees a half-built definition list.

use super::{SpecieMetadata, SpeciesError};
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/// An immutable trait table with its fingerprint and load time
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub species: SpecieMetadata,
    pub fingerprint: String,
    pub loaded_at: DateTime<Utc>,
}

impl Snapshot {
    fn new(species: SpecieMetadata) -> Self {
        Self {
            fingerprint: species.fingerprint(),
            species,
            loaded_at: Utc::now(),
        }
    }
}

#[derive(Debug)]
pub struct TraitRegistry {
    current: RwLock<Arc<Snapshot>>,
    source: Option<PathBuf>,
}

impl TraitRegistry {
    /// Registry over a fixed table with no backing file
    pub fn new(species: SpecieMetadata) -> Self {
        Self {
            current: RwLock::new(Arc::new(Snapshot::new(species))),
            source: None,
        }
    }

    /// Registry backed by a JSON definition file, reloadable from it
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SpeciesError> {
        let path = path.as_ref().to_path_buf();
        let species = SpecieMetadata::load(&path)?;
        Ok(Self {
            current: RwLock::new(Arc::new(Snapshot::new(species))),
            source: Some(path),
        })
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Current table; stays valid for the caller even across reloads
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Install a new table, returning the snapshot now in effect
    pub fn replace(&self, species: SpecieMetadata) -> Arc<Snapshot> {
        let next = Arc::new(Snapshot::new(species));
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if current.fingerprint != next.fingerprint {
            info!(
                "Trait table changed: {} -> {}",
                &current.fingerprint[..16],
                &next.fingerprint[..16]
            );
        }
        *current = next.clone();
        next
    }

    /// Re-read the backing file. On any error the previous table stays in place.
    pub fn reload(&self) -> Result<Arc<Snapshot>, SpeciesError> {
        let path = self.source.as_ref().ok_or(SpeciesError::NoSource)?;
        match SpecieMetadata::load(path) {
            Ok(species) => Ok(self.replace(species)),
            Err(e) => {
                warn!("Reload of {} failed, keeping current traits: {}", path.display(), e);
                Err(e)
            }
        }
    }
}
