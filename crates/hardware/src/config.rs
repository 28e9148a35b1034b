//! Configuration for the harness.
//!
//! This module defines the configuration structures used to parameterize a run. It provides:
//! 1. **Defaults:** Baseline values for the console window, boot state, and tracing.
//! 2. **Structures:** Hierarchical config for console, boot, trace, and load behavior.
//! 3. **Parsing:** JSON deserialization from a string or file.
//!
//! The memory map itself is fixed and not configurable; see [`crate::common::constants`].
//! Every field carries a serde default, so a partial document such as
//! `{"console": {"base": 49152}}` is valid.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::ConfigError;

/// Default configuration values.
mod defaults {
    use crate::common::constants;

    /// ACIA window base address.
    pub const fn console_base() -> u16 {
        constants::DEFAULT_ACIA_BASE
    }

    /// Program counter origin when no other start address is known.
    pub const fn default_origin() -> u16 {
        constants::DEFAULT_ORIGIN
    }

    /// Stack pointer installed before reset.
    pub const fn stack_pointer() -> u16 {
        constants::DEFAULT_STACK_POINTER
    }

    /// Cycle budget for disassembly tracing.
    pub const fn cycle_limit() -> u64 {
        constants::TRACE_CYCLE_LIMIT
    }
}

/// Console (ACIA) configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ConsoleConfig {
    /// Status register address; the data register sits at `base + 1`.
    #[serde(default = "defaults::console_base")]
    pub base: u16,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base: defaults::console_base(),
        }
    }
}

/// Processor boot configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BootConfig {
    /// Start address used when no ROM is present and no load address is known.
    #[serde(default = "defaults::default_origin")]
    pub default_origin: u16,
    /// Stack pointer value installed before reset.
    #[serde(default = "defaults::stack_pointer")]
    pub stack_pointer: u16,
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            default_origin: defaults::default_origin(),
            stack_pointer: defaults::stack_pointer(),
        }
    }
}

/// Disassembly trace configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TraceConfig {
    /// Tracing stops once this many cycles have elapsed.
    #[serde(default = "defaults::cycle_limit")]
    pub cycle_limit: u64,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            cycle_limit: defaults::cycle_limit(),
        }
    }
}

/// Image loading configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct LoadConfig {
    /// Reject Intel HEX record types other than data and end-of-file instead of skipping them.
    #[serde(default)]
    pub strict_record_types: bool,
}

/// Root configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Console window placement.
    #[serde(default)]
    pub console: ConsoleConfig,
    /// Boot state.
    #[serde(default)]
    pub boot: BootConfig,
    /// Disassembly tracing.
    #[serde(default)]
    pub trace: TraceConfig,
    /// Image loading.
    #[serde(default)]
    pub load: LoadConfig,
}

impl Config {
    /// Parses a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the document is malformed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Json`] if its contents do not parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Returns the ACIA data register address, if the window has room for it.
    pub const fn console_data_address(&self) -> Option<u16> {
        self.console.base.checked_add(1)
    }
}
