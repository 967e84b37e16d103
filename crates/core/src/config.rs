//! Producer configuration
//!
//! Every producer runs its body on a dedicated coroutine stack. The size of
//! that stack is the only tunable:
//!
//! - Default is 128KB (0x20000 bytes).
//! - `LAZYSEQ_STACK_SIZE` (bytes) overrides the default.
//! - A TOML file with a `stack_size` key can be loaded with
//!   [`ProducerConfig::from_toml`] and installed with [`configure`].
//! - Sizes are kept within [`MIN_STACK_SIZE`]..=[`MAX_STACK_SIZE`]. A TOML
//!   value above the maximum is rejected; an env value above it is ignored.
//!
//! The process-wide config is fixed the first time it is read.

use serde::Deserialize;
use std::sync::OnceLock;
use tracing::warn;

/// Default producer stack size: 128KB (0x20000 bytes)
pub const DEFAULT_STACK_SIZE: usize = 0x20000;

/// Smallest stack a producer is given, whatever the config says.
pub const MIN_STACK_SIZE: usize = 0x2000;

/// Largest stack a producer is given, whatever the config says.
pub const MAX_STACK_SIZE: usize = 0x400_0000;

/// Environment variable overriding the default stack size.
pub const STACK_SIZE_ENV: &str = "LAZYSEQ_STACK_SIZE";

static CONFIG: OnceLock<ProducerConfig> = OnceLock::new();

/// Settings applied to every producer created without an explicit size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProducerConfig {
    /// Coroutine stack size in bytes
    pub stack_size: usize,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        ProducerConfig {
            stack_size: DEFAULT_STACK_SIZE,
        }
    }
}

impl ProducerConfig {
    /// Build a config from `LAZYSEQ_STACK_SIZE`, falling back to defaults.
    pub fn from_env() -> Self {
        ProducerConfig {
            stack_size: parse_stack_size(std::env::var(STACK_SIZE_ENV).ok()),
        }
    }

    /// Parse a config from TOML. Missing keys keep their defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        let config: ProducerConfig = toml::from_str(toml_str)
            .map_err(|e| format!("Failed to parse producer config: {}", e))?;
        if config.stack_size > MAX_STACK_SIZE {
            return Err(format!(
                "Invalid producer config: stack_size {} exceeds maximum {}",
                config.stack_size, MAX_STACK_SIZE
            ));
        }
        Ok(config)
    }

    /// Stack size in machine words, as the coroutine allocator expects it.
    pub fn stack_words(&self) -> usize {
        stack_words(self.stack_size)
    }
}

/// Convert a byte size to coroutine stack words, clamped to the allowed range.
pub(crate) fn stack_words(bytes: usize) -> usize {
    bytes.clamp(MIN_STACK_SIZE, MAX_STACK_SIZE) / std::mem::size_of::<usize>()
}

/// Parse stack size from an optional string value.
/// Returns the parsed size, or DEFAULT_STACK_SIZE if the value is missing, zero,
/// too large, or invalid.
fn parse_stack_size(env_value: Option<String>) -> usize {
    match env_value {
        Some(val) => match val.parse::<usize>() {
            Ok(0) => {
                warn!(
                    "{}=0 is invalid, using default {}",
                    STACK_SIZE_ENV, DEFAULT_STACK_SIZE
                );
                DEFAULT_STACK_SIZE
            }
            Ok(size) if size > MAX_STACK_SIZE => {
                warn!(
                    "{}={} exceeds maximum {}, using default {}",
                    STACK_SIZE_ENV, size, MAX_STACK_SIZE, DEFAULT_STACK_SIZE
                );
                DEFAULT_STACK_SIZE
            }
            Ok(size) => size,
            Err(_) => {
                warn!(
                    "{}='{}' is not a valid number, using default {}",
                    STACK_SIZE_ENV, val, DEFAULT_STACK_SIZE
                );
                DEFAULT_STACK_SIZE
            }
        },
        None => DEFAULT_STACK_SIZE,
    }
}

/// Install the process-wide producer config.
///
/// Returns `false` if a config was already installed or read, in which case
/// the existing one stays in effect.
pub fn configure(config: ProducerConfig) -> bool {
    CONFIG.set(config).is_ok()
}

/// The process-wide producer config, read from the environment on first use.
pub fn current() -> &'static ProducerConfig {
    CONFIG.get_or_init(ProducerConfig::from_env)
}
