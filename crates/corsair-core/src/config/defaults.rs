//! Default value table for run configurations.
//!
//! This is the compiled-in value set returned when a source asks for
//! `env_use_default = true`. Downstream components key their behavior off
//! these exact values, so the table is part of the crate's contract: two
//! runs in default mode always see the identical configuration, and no
//! randomization is ever applied to it.
//!
//! Derived fields go through the same derivation functions as explicit
//! resolution, so the two paths cannot drift as fields are added.

use crate::config::resolve;
use crate::config::types::{AgentConfig, BufferConfig, EnvConfig, ExperimentConfig};

impl Default for EnvConfig {
    fn default() -> Self {
        let size = 10;
        let pirate_depth_of_view = 2;
        let frozen_lake_state = false;

        Self {
            size,
            nbr_enemies: 5,
            nbr_merchants: 5,
            epsilon_start: 1.0,
            epsilon_end: 1.0,
            epsilon_decay: 0.99,
            random_map: false,
            random_enemies: false,
            random_merchants: false,
            move_enemies_merchants: false,
            action_success_prob: 1.0,
            pirate_depth_of_view,
            frozen_lake_state,
            state_size: resolve::state_size(size, pirate_depth_of_view, frozen_lake_state)
                .expect("default table state size is in range"),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        let batch_size = 64;
        let update_nn_every = 4;
        let update_mem_every = 20;

        Self {
            discount_factor_gamma: 0.9,
            stepsize_alpha: 0.1,
            buffer_size: 100_000,
            batch_size,
            gamma: 0.99,
            tau: 0.001,
            learning_rate: 0.0005,
            update_nn_every,
            update_mem_every,
            update_mem_par_every: 3_000,
            experiences_per_sampling: resolve::experiences_per_sampling(
                batch_size,
                update_mem_every,
                update_nn_every,
            )
            .expect("nonzero update_nn_every in the default table"),
            uniform_sampling: false,
        }
    }
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            max_nbr_of_steps: 100,
            nbr_episodes: 100,
        }
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            alpha_decay: 0.99,
            beta: 0.5,
            beta_growth: 1.001,
        }
    }
}
