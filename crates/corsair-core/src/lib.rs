//! corsair-core: run configuration for the pirate grid-world simulation
//!
//! This library resolves the runtime configuration consumed by the rest of
//! the simulation stack: the grid-world environment, the learning agent,
//! the experiment driver, and the prioritized replay buffer all read their
//! parameters from the [`config::RunConfig`] produced here.
//!
//! # Main Entry Points
//!
//! - [`config`] - Load and resolve named configuration sources
//! - [`logging`] - Structured logging initialization

pub mod config;
pub mod errors;
pub mod logging;

// Re-export commonly used types at crate root for convenience
pub use config::{
    AgentConfig, BufferConfig, ConfigError, EnvConfig, ExperimentConfig, RawSource, RunConfig,
};
pub use errors::{CorsairError, CorsairResult};

// Re-export logging initialization
pub use logging::init_logging;
