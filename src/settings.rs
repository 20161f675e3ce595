//! The runtime configuration of the interpreter.
use std::{env, str::FromStr};

use crate::{definitions::scheduler, quirks::CompatibilityMode, ConfigError};

/// The environment variable selecting the compatibility mode.
pub const ENV_MODE: &str = "CHIP8_MODE";
/// The environment variable selecting the host tick rate.
pub const ENV_TICKS_PER_SECOND: &str = "CHIP8_TICKS_PER_SECOND";
/// The environment variable selecting the instruction quota per tick.
pub const ENV_INSTRUCTIONS_PER_TICK: &str = "CHIP8_INSTRUCTIONS_PER_TICK";

/// Holds the configuration of the scheduler and the opcode quirks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// The quirks the opcodes shall follow.
    pub mode: CompatibilityMode,
    /// How often the host shall call the scheduler per second.
    pub ticks_per_second: u32,
    /// How many instructions run per scheduler tick.
    pub instructions_per_tick: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: CompatibilityMode::default(),
            ticks_per_second: scheduler::TICKS_PER_SECOND,
            instructions_per_tick: scheduler::INSTRUCTIONS_PER_TICK,
        }
    }
}

impl Settings {
    /// Will read the settings from the environment, falling back to the
    /// defaults for every variable that is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Will build the settings with the given lookup function, this
    /// is split from [`from_env`](Settings::from_env) so the parsing
    /// can be tested without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(mode) = lookup(ENV_MODE) {
            settings.mode = mode.parse()?;
        }
        if let Some(value) = lookup(ENV_TICKS_PER_SECOND) {
            settings.ticks_per_second = parse_value(ENV_TICKS_PER_SECOND, &value)?;
        }
        if let Some(value) = lookup(ENV_INSTRUCTIONS_PER_TICK) {
            settings.instructions_per_tick = parse_value(ENV_INSTRUCTIONS_PER_TICK, &value)?;
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Makes sure the scheduler can actually run with these settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ticks_per_second == 0 {
            return Err(ConfigError::InvalidValue {
                key: ENV_TICKS_PER_SECOND,
                value: self.ticks_per_second.to_string(),
            });
        }
        if self.instructions_per_tick == 0 {
            return Err(ConfigError::InvalidValue {
                key: ENV_INSTRUCTIONS_PER_TICK,
                value: self.instructions_per_tick.to_string(),
            });
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}
