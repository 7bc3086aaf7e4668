//! # Run Configuration
//!
//! Resolution of named configuration sources for the pirate grid-world
//! simulation.
//!
//! ## Source Convention
//!
//! A source is named, not addressed: `"voyage"` resolves to
//! `<config-dir>/voyage.toml`, where the config directory is
//! `config_files/` under the working directory unless `CORSAIR_CONFIG_DIR`
//! overrides it. Each source carries four sections of scalar entries:
//! `[environment]`, `[agent]`, `[experiment]`, and `[buffer]`.
//!
//! ## Resolution Modes
//!
//! `environment.env_use_default` picks the mode, once per run:
//!
//! - **Default** - the source is ignored and the compiled-in table from
//!   [`defaults`] is returned. No randomization.
//! - **Explicit** - every required key is type-checked and extracted, the
//!   `env_random_*` overrides are applied, and the derived fields
//!   (`state_size`, `experiences_per_sampling`) are computed from the final
//!   values. A missing or wrong-shaped key fails the whole resolution;
//!   nothing is silently defaulted.
//!
//! ## Loading Configuration
//!
//! ```rust,no_run
//! use corsair_core::config::RunConfig;
//!
//! // Handle config errors explicitly - don't silently fall back to defaults
//! fn example() -> Result<(), corsair_core::config::ConfigError> {
//!     let config = RunConfig::load("voyage")?;
//!     assert!(config.env.state_size > 0);
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod errors;
pub mod loading;
pub mod resolve;
pub mod types;

// Public API exports
pub use errors::ConfigError;
pub use types::{AgentConfig, BufferConfig, EnvConfig, ExperimentConfig, RawSource, RunConfig};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

impl RunConfig {
    /// Load and resolve the named configuration source.
    ///
    /// Randomized fields draw from an entropy-seeded generator; use
    /// [`RunConfig::load_with_rng`] when the run must be reproducible.
    ///
    /// See [`loading::load_source`] and [`resolve::resolve`] for details.
    pub fn load(name: &str) -> Result<Self, ConfigError> {
        Self::load_with_rng(name, &mut StdRng::from_entropy())
    }

    /// Load and resolve the named source with a caller-supplied random
    /// source, so `env_random_*` draws are reproducible under a seed.
    pub fn load_with_rng<R: Rng>(name: &str, rng: &mut R) -> Result<Self, ConfigError> {
        let raw = loading::load_source(name)?;
        resolve::resolve(&raw, rng)
    }

    /// Resolve an already-loaded raw source.
    ///
    /// See [`resolve::resolve`] for details.
    pub fn resolve<R: Rng>(raw: &RawSource, rng: &mut R) -> Result<Self, ConfigError> {
        resolve::resolve(raw, rng)
    }
}
