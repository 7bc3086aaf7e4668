//! Configuration type definitions for the corsair simulation.
//!
//! [`RawSource`] is the loosely-typed section/key mapping read from a
//! configuration source. [`RunConfig`] is the fixed-shape resolved object
//! handed to the environment, agent, experiment driver, and replay buffer;
//! it is constructed exactly once per run and never mutated afterward, so it
//! may be read concurrently without locking.
//!
//! # Example Source
//!
//! ```toml
//! [environment]
//! env_use_default = false
//! env_size = 10
//! env_nbr_enemies = 3
//! env_nbr_merchants = 4
//! env_pirate_depth_of_view = 2
//! # ...
//!
//! [agent]
//! agent_batch_size = 64
//! # ...
//!
//! [experiment]
//! exp_max_nbr_of_steps = 100
//! exp_nbr_episodes = 500
//!
//! [buffer]
//! buf_alpha = 0.5
//! buf_alpha_decay = 0.99
//! buf_beta = 0.5
//! buf_beta_growth = 1.001
//! ```

use std::collections::BTreeMap;
use toml::value::Table;

/// Raw section/key mapping read from a configuration source.
///
/// Values stay untyped until resolution; no key is coerced or defaulted at
/// this stage. Produced once by the loader and read-only afterward.
#[derive(Debug, Clone, Default)]
pub struct RawSource {
    sections: BTreeMap<String, Table>,
}

impl RawSource {
    pub(crate) fn new(sections: BTreeMap<String, Table>) -> Self {
        Self { sections }
    }

    /// Look up a section by name.
    pub fn section(&self, name: &str) -> Option<&Table> {
        self.sections.get(name)
    }

    /// Whether the source carries no sections at all (e.g. a missing file).
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Number of sections in the source.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }
}

/// Fully resolved run configuration.
///
/// Grouped by consumer: the simulation environment reads [`EnvConfig`], the
/// learning agent [`AgentConfig`], the experiment driver
/// [`ExperimentConfig`], and the prioritized replay buffer [`BufferConfig`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunConfig {
    /// Grid-world environment parameters
    pub env: EnvConfig,

    /// Learning agent parameters
    pub agent: AgentConfig,

    /// Experiment driver parameters
    pub experiment: ExperimentConfig,

    /// Prioritized replay buffer parameters
    pub buffer: BufferConfig,
}

/// Grid-world environment parameters.
///
/// Raw keys live in the `[environment]` section of a source, prefixed with
/// `env_` (the view depth is `env_pirate_depth_of_view`).
#[derive(Debug, Clone, PartialEq)]
pub struct EnvConfig {
    /// Side length of the square map (at least 1).
    pub size: u32,

    /// Number of enemy ships on the map.
    pub nbr_enemies: u32,

    /// Number of merchant ships on the map.
    pub nbr_merchants: u32,

    /// Starting probability that an action is replaced by a random one,
    /// in [0, 1].
    pub epsilon_start: f64,

    /// Final exploration probability, in [0, 1].
    pub epsilon_end: f64,

    /// Per-episode decay applied to the exploration probability, in (0, 1].
    pub epsilon_decay: f64,

    /// Redraw the map size and both ship populations at resolution time.
    pub random_map: bool,

    /// Redraw the enemy count at resolution time.
    pub random_enemies: bool,

    /// Redraw the merchant count at resolution time.
    pub random_merchants: bool,

    /// Whether enemy and merchant ships move between steps, or stay where
    /// they were placed.
    pub move_enemies_merchants: bool,

    /// Probability that a chosen action succeeds, in [0, 1].
    pub action_success_prob: f64,

    /// How far the pirate can see, in grid cells. Sizes the observed state.
    pub pirate_depth_of_view: u32,

    /// Return the whole map as the observed state instead of the square
    /// around the pirate.
    pub frozen_lake_state: bool,

    /// Number of cells in the observed state. Derived from the final map
    /// layout; never read from a source.
    pub state_size: u32,
}

/// Learning agent parameters.
///
/// Raw keys live in the `[agent]` section of a source, prefixed with
/// `agent_`.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    /// Discount factor γ for tabular updates, in [0, 1].
    pub discount_factor_gamma: f64,

    /// Step size α for tabular updates.
    pub stepsize_alpha: f64,

    /// Capacity of the replay buffer.
    pub buffer_size: u32,

    /// Number of experiences per learning batch.
    pub batch_size: u32,

    /// Discount factor γ for the network update, in [0, 1].
    pub gamma: f64,

    /// Soft-update interpolation factor τ, in (0, 1].
    pub tau: f64,

    /// Optimizer learning rate.
    pub learning_rate: f64,

    /// Learn from a batch every this many steps.
    pub update_nn_every: u32,

    /// Push gathered experiences to the buffer every this many steps.
    pub update_mem_every: u32,

    /// Refresh buffer sampling parameters every this many steps.
    pub update_mem_par_every: u32,

    /// Experiences drawn per sampling pass. Derived from the batch size and
    /// the two update cadences; never read from a source.
    pub experiences_per_sampling: u32,

    /// Sample uniformly instead of by priority.
    pub uniform_sampling: bool,
}

/// Experiment driver parameters.
///
/// Raw keys live in the `[experiment]` section of a source, prefixed with
/// `exp_`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentConfig {
    /// Step cap per episode.
    pub max_nbr_of_steps: u32,

    /// Number of episodes per experiment.
    pub nbr_episodes: u32,
}

/// Prioritized replay buffer parameters.
///
/// Raw keys live in the `[buffer]` section of a source, prefixed with
/// `buf_`. They govern how strongly priorities weight sampling and how the
/// importance-sampling correction anneals.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferConfig {
    /// Priority exponent α (0 means uniform sampling).
    pub alpha: f64,

    /// Multiplicative decay applied to α on each parameter refresh.
    pub alpha_decay: f64,

    /// Importance-sampling exponent β.
    pub beta: f64,

    /// Multiplicative growth applied to β on each parameter refresh.
    pub beta_growth: f64,
}
