//! Game configuration
//!
//! Field size, starting level, preview length and randomizer policy. Timing
//! intervals are fixed constants in `blockfall-types`.

use std::fmt;

use tracing::warn;

use crate::types::{DEFAULT_QUEUE_SIZE, GRID_COLS, GRID_ROWS};

/// Which piece randomizer to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RandomizerKind {
    #[default]
    Bag,
    Uniform,
}

impl RandomizerKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "bag" | "7bag" | "seven-bag" => Some(RandomizerKind::Bag),
            "uniform" | "random" => Some(RandomizerKind::Uniform),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RandomizerKind::Bag => "bag",
            RandomizerKind::Uniform => "uniform",
        }
    }
}

/// Rejected configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    TooFewRows(u16),
    TooFewCols(u16),
    EmptyQueue,
    ZeroLevel,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::TooFewRows(rows) => write!(f, "grid needs at least 2 rows, got {}", rows),
            ConfigError::TooFewCols(cols) => {
                write!(f, "grid needs at least 4 columns, got {}", cols)
            }
            ConfigError::EmptyQueue => f.write_str("queue size must be at least 1"),
            ConfigError::ZeroLevel => f.write_str("level must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub rows: u16,
    pub cols: u16,
    pub level: u32,
    pub queue_size: usize,
    pub randomizer: RandomizerKind,
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: GRID_ROWS,
            cols: GRID_COLS,
            level: 1,
            queue_size: DEFAULT_QUEUE_SIZE,
            randomizer: RandomizerKind::Bag,
            seed: 1,
        }
    }
}

impl GameConfig {
    /// Create from `BLOCKFALL_*` environment variables.
    ///
    /// Missing variables keep their defaults; unparseable ones are logged and
    /// ignored. The result is not validated.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GameConfig::from_env`] over an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let randomizer = match lookup("BLOCKFALL_RANDOMIZER") {
            Some(raw) => RandomizerKind::from_str(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "unknown BLOCKFALL_RANDOMIZER, using bag");
                defaults.randomizer
            }),
            None => defaults.randomizer,
        };

        Self {
            rows: parse_var(&lookup, "BLOCKFALL_ROWS", defaults.rows),
            cols: parse_var(&lookup, "BLOCKFALL_COLS", defaults.cols),
            level: parse_var(&lookup, "BLOCKFALL_LEVEL", defaults.level),
            queue_size: parse_var(&lookup, "BLOCKFALL_QUEUE_SIZE", defaults.queue_size),
            randomizer,
            seed: parse_var(&lookup, "BLOCKFALL_SEED", defaults.seed),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows < 2 {
            return Err(ConfigError::TooFewRows(self.rows));
        }
        if self.cols < 4 {
            return Err(ConfigError::TooFewCols(self.cols));
        }
        if self.queue_size == 0 {
            return Err(ConfigError::EmptyQueue);
        }
        if self.level == 0 {
            return Err(ConfigError::ZeroLevel);
        }
        Ok(())
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warn!(key, value = %raw, fallback = %default, "ignoring unparseable setting");
            default
        }
    }
}
