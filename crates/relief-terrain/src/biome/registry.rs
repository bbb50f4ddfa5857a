//! Biome registry: maps [`BiomeId`] to [`BiomeProfile`] with name-based lookup.

use hashbrown::HashMap;

use super::BiomeProfile;

/// Unique identifier for a registered biome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BiomeId(pub u16);

/// Errors that can occur when registering biomes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BiomeRegistryError {
    /// A biome with this name is already registered.
    #[error("duplicate biome name: {0}")]
    DuplicateName(String),
}

/// Stores biome profiles with O(1) lookup by ID or name.
#[derive(Clone, Debug)]
pub struct BiomeRegistry {
    biomes: Vec<BiomeProfile>,
    name_to_id: HashMap<String, BiomeId>,
}

impl BiomeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            biomes: Vec::new(),
            name_to_id: HashMap::new(),
        }
    }

    /// A registry holding the built-in `plain`, `hill`, `mountain` and
    /// `coast` profiles.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for profile in BiomeProfile::defaults() {
            let name = profile.name.clone();
            let id = BiomeId(registry.biomes.len() as u16);
            registry.name_to_id.insert(name, id);
            registry.biomes.push(profile);
        }
        registry
    }

    /// Registers a new profile, returning its assigned [`BiomeId`].
    ///
    /// # Errors
    ///
    /// Returns [`BiomeRegistryError::DuplicateName`] if a biome with the same name exists.
    pub fn register(&mut self, profile: BiomeProfile) -> Result<BiomeId, BiomeRegistryError> {
        if self.name_to_id.contains_key(&profile.name) {
            return Err(BiomeRegistryError::DuplicateName(profile.name.clone()));
        }
        let id = BiomeId(self.biomes.len() as u16);
        self.name_to_id.insert(profile.name.clone(), id);
        self.biomes.push(profile);
        Ok(id)
    }

    /// Returns the profile for the given biome ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range.
    pub fn get(&self, id: BiomeId) -> &BiomeProfile {
        &self.biomes[id.0 as usize]
    }

    /// Looks up a biome ID by name.
    pub fn lookup_by_name(&self, name: &str) -> Option<BiomeId> {
        self.name_to_id.get(name).copied()
    }

    /// Looks up a profile by name.
    pub fn profile(&self, name: &str) -> Option<&BiomeProfile> {
        self.lookup_by_name(name).map(|id| self.get(id))
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.biomes.iter().map(|b| b.name.as_str())
    }

    /// Returns the number of registered biomes.
    pub fn len(&self) -> usize {
        self.biomes.len()
    }

    /// Returns `true` if no biomes are registered.
    pub fn is_empty(&self) -> bool {
        self.biomes.is_empty()
    }
}

impl Default for BiomeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
