//! Resolution of a raw source into a [`RunConfig`].
//!
//! Resolution is a single synchronous pass. `environment.env_use_default`
//! is read first and picks one of two branches: the compiled-in default
//! table, or explicit extraction of every required key section by section
//! (environment → agent → experiment → buffer). Explicit Mode randomizes
//! the map layout before deriving `state_size`, so derived fields always
//! see the final values. No key is ever silently defaulted: a missing or
//! wrong-shaped value fails the whole resolution.

use crate::config::errors::ConfigError;
use crate::config::types::{
    AgentConfig, BufferConfig, EnvConfig, ExperimentConfig, RawSource, RunConfig,
};
use rand::Rng;
use tracing::info;

/// Side-length bounds drawn when `env_random_map` is set.
const RANDOM_MAP_MIN_SIZE: u32 = 5;
const RANDOM_MAP_MAX_SIZE: u32 = 100;

/// Resolve a raw source into a [`RunConfig`].
///
/// The random source backs the `env_random_*` overrides; pass a seeded
/// generator to make randomized runs reproducible.
///
/// # Errors
///
/// Returns an error when a required section or key is absent, a value does
/// not have the required shape, or a derivation hits an invalid input. No
/// partial configuration is ever returned.
pub fn resolve<R: Rng>(raw: &RawSource, rng: &mut R) -> Result<RunConfig, ConfigError> {
    let environment = Section::new(raw, "environment")?;
    let use_default = environment.get_bool("env_use_default")?;

    if use_default {
        info!(event = "core.config.resolved", mode = "default");
        return Ok(RunConfig::default());
    }

    let env = extract_env(&environment, rng)?;
    let agent = extract_agent(&Section::new(raw, "agent")?)?;
    let experiment = extract_experiment(&Section::new(raw, "experiment")?)?;
    let buffer = extract_buffer(&Section::new(raw, "buffer")?)?;

    info!(
        event = "core.config.resolved",
        mode = "explicit",
        env_size = env.size,
        state_size = env.state_size,
        experiences_per_sampling = agent.experiences_per_sampling
    );

    Ok(RunConfig {
        env,
        agent,
        experiment,
        buffer,
    })
}

/// Number of cells in the observed state.
///
/// The whole map when `frozen_lake_state` is set, otherwise the square the
/// pirate can see around itself.
///
/// # Errors
///
/// Returns an error when the cell count does not fit the observed-state
/// range.
pub fn state_size(
    size: u32,
    pirate_depth_of_view: u32,
    frozen_lake_state: bool,
) -> Result<u32, ConfigError> {
    let cells = if frozen_lake_state {
        u64::from(size) * u64::from(size)
    } else {
        let side = 2 * u64::from(pirate_depth_of_view) + 1;
        side * side
    };

    u32::try_from(cells).map_err(|_| ConfigError::InvalidDerivation {
        message: format!("state size {cells} does not fit the observed-state range"),
    })
}

/// Experiences drawn per sampling pass.
///
/// `ceil(batch_size * update_mem_every / update_nn_every)`, with the
/// division performed on reals before the ceiling.
///
/// # Errors
///
/// Returns an error when `update_nn_every` is zero.
pub fn experiences_per_sampling(
    batch_size: u32,
    update_mem_every: u32,
    update_nn_every: u32,
) -> Result<u32, ConfigError> {
    if update_nn_every == 0 {
        return Err(ConfigError::InvalidDerivation {
            message: "agent_update_nn_every must be nonzero to derive \
                      agent_experiences_per_sampling"
                .to_string(),
        });
    }

    let per_sampling = (f64::from(batch_size) * f64::from(update_mem_every)
        / f64::from(update_nn_every))
    .ceil();
    if per_sampling > f64::from(u32::MAX) {
        return Err(ConfigError::InvalidDerivation {
            message: format!("agent_experiences_per_sampling {per_sampling} is out of range"),
        });
    }
    Ok(per_sampling as u32)
}

fn extract_env<R: Rng>(section: &Section<'_>, rng: &mut R) -> Result<EnvConfig, ConfigError> {
    let mut size = section.get_positive_u32("env_size")?;
    let mut nbr_enemies = section.get_u32("env_nbr_enemies")?;
    let mut nbr_merchants = section.get_u32("env_nbr_merchants")?;
    let epsilon_start = section.get_f64("env_epsilon_start")?;
    let epsilon_end = section.get_f64("env_epsilon_end")?;
    let epsilon_decay = section.get_f64("env_epsilon_decay")?;
    let random_map = section.get_bool("env_random_map")?;
    let random_enemies = section.get_bool("env_random_enemies")?;
    let random_merchants = section.get_bool("env_random_merchants")?;
    let move_enemies_merchants = section.get_bool("env_move_enemies_merchants")?;
    let action_success_prob = section.get_f64("env_action_success_prob")?;
    let pirate_depth_of_view = section.get_u32("env_pirate_depth_of_view")?;
    let frozen_lake_state = section.get_bool("env_frozen_lake_state")?;

    if random_map {
        // A random map redraws both populations, whatever their own flags say.
        size = rng.gen_range(RANDOM_MAP_MIN_SIZE..=RANDOM_MAP_MAX_SIZE);
        nbr_merchants = rng.gen_range(1..=size);
        nbr_enemies = rng.gen_range(1..=size);
        info!(
            event = "core.config.map_randomized",
            size, nbr_enemies, nbr_merchants
        );
    } else {
        if random_enemies {
            nbr_enemies = rng.gen_range(1..=size);
            info!(event = "core.config.enemies_randomized", nbr_enemies);
        }
        if random_merchants {
            nbr_merchants = rng.gen_range(1..=size);
            info!(event = "core.config.merchants_randomized", nbr_merchants);
        }
    }

    // state_size derives from the final, post-randomization layout.
    let state_size = state_size(size, pirate_depth_of_view, frozen_lake_state)?;

    Ok(EnvConfig {
        size,
        nbr_enemies,
        nbr_merchants,
        epsilon_start,
        epsilon_end,
        epsilon_decay,
        random_map,
        random_enemies,
        random_merchants,
        move_enemies_merchants,
        action_success_prob,
        pirate_depth_of_view,
        frozen_lake_state,
        state_size,
    })
}

fn extract_agent(section: &Section<'_>) -> Result<AgentConfig, ConfigError> {
    let discount_factor_gamma = section.get_f64("agent_discount_factor_gamma")?;
    let stepsize_alpha = section.get_f64("agent_stepsize_alpha")?;
    let buffer_size = section.get_positive_u32("agent_buffer_size")?;
    let batch_size = section.get_positive_u32("agent_batch_size")?;
    let gamma = section.get_f64("agent_gamma")?;
    let tau = section.get_f64("agent_tau")?;
    let learning_rate = section.get_f64("agent_learning_rate")?;
    let update_nn_every = section.get_positive_u32("agent_update_nn_every")?;
    let update_mem_every = section.get_positive_u32("agent_update_mem_every")?;
    let update_mem_par_every = section.get_positive_u32("agent_update_mem_par_every")?;
    let uniform_sampling = section.get_bool("agent_uniform_sampling")?;

    let experiences_per_sampling =
        experiences_per_sampling(batch_size, update_mem_every, update_nn_every)?;

    Ok(AgentConfig {
        discount_factor_gamma,
        stepsize_alpha,
        buffer_size,
        batch_size,
        gamma,
        tau,
        learning_rate,
        update_nn_every,
        update_mem_every,
        update_mem_par_every,
        experiences_per_sampling,
        uniform_sampling,
    })
}

fn extract_experiment(section: &Section<'_>) -> Result<ExperimentConfig, ConfigError> {
    Ok(ExperimentConfig {
        max_nbr_of_steps: section.get_positive_u32("exp_max_nbr_of_steps")?,
        nbr_episodes: section.get_positive_u32("exp_nbr_episodes")?,
    })
}

fn extract_buffer(section: &Section<'_>) -> Result<BufferConfig, ConfigError> {
    Ok(BufferConfig {
        alpha: section.get_f64("buf_alpha")?,
        alpha_decay: section.get_f64("buf_alpha_decay")?,
        beta: section.get_f64("buf_beta")?,
        beta_growth: section.get_f64("buf_beta_growth")?,
    })
}

/// Typed accessor over one raw section.
///
/// Every read is all-or-nothing: a missing key or a wrong-shaped value
/// produces an error naming the section and key.
struct Section<'a> {
    name: &'static str,
    entries: &'a toml::value::Table,
}

impl<'a> Section<'a> {
    fn new(raw: &'a RawSource, name: &'static str) -> Result<Self, ConfigError> {
        let entries = raw
            .section(name)
            .ok_or(ConfigError::MissingSection { section: name })?;
        Ok(Self { name, entries })
    }

    fn value(&self, key: &'static str) -> Result<&'a toml::Value, ConfigError> {
        self.entries.get(key).ok_or(ConfigError::MissingKey {
            section: self.name,
            key,
        })
    }

    fn get_u32(&self, key: &'static str) -> Result<u32, ConfigError> {
        let value = self.value(key)?;
        value
            .as_integer()
            .and_then(|i| u32::try_from(i).ok())
            .ok_or_else(|| self.invalid(key, "a non-negative integer", value))
    }

    fn get_positive_u32(&self, key: &'static str) -> Result<u32, ConfigError> {
        let value = self.value(key)?;
        value
            .as_integer()
            .and_then(|i| u32::try_from(i).ok())
            .filter(|&parsed| parsed > 0)
            .ok_or_else(|| self.invalid(key, "a positive integer", value))
    }

    fn get_f64(&self, key: &'static str) -> Result<f64, ConfigError> {
        let value = self.value(key)?;
        match value {
            toml::Value::Float(f) => Ok(*f),
            toml::Value::Integer(i) => Ok(*i as f64),
            _ => Err(self.invalid(key, "a number", value)),
        }
    }

    fn get_bool(&self, key: &'static str) -> Result<bool, ConfigError> {
        let value = self.value(key)?;
        value
            .as_bool()
            .ok_or_else(|| self.invalid(key, "a boolean", value))
    }

    fn invalid(
        &self,
        key: &'static str,
        expected: &'static str,
        found: &toml::Value,
    ) -> ConfigError {
        ConfigError::InvalidValue {
            section: self.name,
            key,
            expected,
            found: format!("{} `{}`", found.type_str(), found),
        }
    }
}
