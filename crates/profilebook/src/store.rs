//! In-memory profile store.
//!
//! [`ProfileStore`] owns every profile and allocates identifiers. It has no
//! internal synchronization; callers that share it across tasks wrap it in a
//! single lock held for the whole of each operation (see [`SharedStore`]).

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::profile::{NewProfile, Profile, ProfilePatch};

/// A store shared between request handlers.
pub type SharedStore = Arc<RwLock<ProfileStore>>;

/// Storage engine for profiles.
///
/// Identifiers start at 1 and only ever grow: deleting a profile retires its
/// id for the lifetime of the store.
#[derive(Debug)]
pub struct ProfileStore {
    /// Profiles keyed by id. Ids are allocated in increasing order, so
    /// iteration order is insertion order.
    profiles: BTreeMap<u64, Profile>,
    /// The id the next created profile receives.
    next_id: u64,
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            profiles: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Wrap a new store for sharing between handlers.
    #[must_use]
    pub fn shared() -> SharedStore {
        Arc::new(RwLock::new(Self::new()))
    }

    /// All stored profiles in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<Profile> {
        self.profiles.values().cloned().collect()
    }

    /// Get a profile by its id.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<Profile> {
        self.profiles.get(&id).cloned()
    }

    /// Store a new profile and return it with its assigned id.
    pub fn create(&mut self, fields: NewProfile) -> Profile {
        let id = self.next_id;
        self.next_id += 1;

        let profile = Profile::from_new(id, fields);
        self.profiles.insert(id, profile.clone());

        info!(id, "Created profile");
        profile
    }

    /// Merge `patch` onto the profile stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no profile has that id.
    pub fn update(&mut self, id: u64, patch: ProfilePatch) -> Result<Profile> {
        let profile = self.profiles.get_mut(&id).ok_or_else(|| Error::not_found(id))?;

        if patch.is_empty() {
            debug!(id, "Empty patch, profile unchanged");
        } else {
            profile.apply(patch);
            info!(id, "Updated profile");
        }
        Ok(profile.clone())
    }

    /// Remove the profile stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no profile has that id.
    pub fn delete(&mut self, id: u64) -> Result<()> {
        self.profiles.remove(&id).ok_or_else(|| Error::not_found(id))?;
        info!(id, "Deleted profile");
        Ok(())
    }

    /// Number of stored profiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Check if the store holds no profiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Get store statistics.
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            total_profiles: self.profiles.len(),
            favorite_profiles: self.profiles.values().filter(|p| p.favorite).count(),
            next_id: self.next_id,
        }
    }
}

/// Statistics about the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    /// Number of stored profiles.
    pub total_profiles: usize,
    /// Number of profiles marked as favorite.
    pub favorite_profiles: usize,
    /// The id the next created profile will receive.
    pub next_id: u64,
}
