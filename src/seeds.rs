//! Seed management for world generation
//!
//! Every noise field and random draw gets its own seed, derived from a master
//! seed by default, so one layer can be varied while the others stay fixed.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Master seed used when the generator runs in debug mode
pub const DEBUG_SEED: u64 = 1;

/// Seeds for all world generation systems.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldSeeds {
    /// Master seed (used for display/reference)
    pub master: u64,
    /// Land shape noise
    pub land: u64,
    /// Rock vs dirt selection noise
    pub rock: u64,
    /// Vine placement noise
    pub vines: u64,
    /// Grass placement noise
    pub grass: u64,
    /// Per-cell root vs grass draws
    pub roots: u64,
    /// Ore placement noise
    pub ores: u64,
    /// Background decoration noise
    pub background: u64,
    /// Tile art variant selection
    pub variants: u64,
}

impl WorldSeeds {
    /// Create seeds from a master seed, deriving all sub-seeds deterministically.
    pub fn from_master(master: u64) -> Self {
        Self {
            master,
            land: derive_seed(master, "land"),
            rock: derive_seed(master, "rock"),
            vines: derive_seed(master, "vines"),
            grass: derive_seed(master, "grass"),
            roots: derive_seed(master, "roots"),
            ores: derive_seed(master, "ores"),
            background: derive_seed(master, "background"),
            variants: derive_seed(master, "variants"),
        }
    }

    /// Fixed seeds for reproducible debug runs and tests.
    pub fn debug() -> Self {
        Self::from_master(DEBUG_SEED)
    }

    /// Seeds derived from the current wall-clock time in milliseconds.
    pub fn from_clock() -> Self {
        Self::from_master(chrono::Utc::now().timestamp_millis() as u64)
    }

    /// Create a builder for customizing individual seeds
    pub fn builder(master: u64) -> WorldSeedsBuilder {
        WorldSeedsBuilder::new(master)
    }
}

/// Builder for overriding individual seeds while deriving the rest from master
pub struct WorldSeedsBuilder {
    seeds: WorldSeeds,
}

impl WorldSeedsBuilder {
    pub fn new(master: u64) -> Self {
        Self {
            seeds: WorldSeeds::from_master(master),
        }
    }

    pub fn land(mut self, seed: u64) -> Self {
        self.seeds.land = seed;
        self
    }

    pub fn rock(mut self, seed: u64) -> Self {
        self.seeds.rock = seed;
        self
    }

    pub fn vines(mut self, seed: u64) -> Self {
        self.seeds.vines = seed;
        self
    }

    pub fn grass(mut self, seed: u64) -> Self {
        self.seeds.grass = seed;
        self
    }

    pub fn roots(mut self, seed: u64) -> Self {
        self.seeds.roots = seed;
        self
    }

    pub fn ores(mut self, seed: u64) -> Self {
        self.seeds.ores = seed;
        self
    }

    pub fn background(mut self, seed: u64) -> Self {
        self.seeds.background = seed;
        self
    }

    pub fn variants(mut self, seed: u64) -> Self {
        self.seeds.variants = seed;
        self
    }

    pub fn build(self) -> WorldSeeds {
        self.seeds
    }
}

/// Derive a sub-seed from a master seed and a system name.
fn derive_seed(master: u64, system: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    master.hash(&mut hasher);
    system.hash(&mut hasher);
    hasher.finish()
}

impl std::fmt::Display for WorldSeeds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "WorldSeeds {{ master: {}, land: {}, rock: {}, vines: {}, grass: {}, \
             roots: {}, ores: {}, background: {}, variants: {} }}",
            self.master,
            self.land,
            self.rock,
            self.vines,
            self.grass,
            self.roots,
            self.ores,
            self.background,
            self.variants,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_derivation() {
        assert_eq!(WorldSeeds::from_master(12345), WorldSeeds::from_master(12345));
        assert_eq!(WorldSeeds::debug(), WorldSeeds::from_master(DEBUG_SEED));
    }

    #[test]
    fn test_different_layers_get_different_seeds() {
        let seeds = WorldSeeds::from_master(12345);
        assert_ne!(seeds.land, seeds.rock);
        assert_ne!(seeds.vines, seeds.grass);
        assert_ne!(seeds.ores, seeds.background);
    }

    #[test]
    fn test_builder_override() {
        let seeds = WorldSeeds::builder(12345).ores(99999).build();
        assert_eq!(seeds.ores, 99999);

        let default_seeds = WorldSeeds::from_master(12345);
        assert_eq!(seeds.land, default_seeds.land);
        assert_eq!(seeds.background, default_seeds.background);
    }
}
