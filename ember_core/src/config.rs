//! Runtime configuration resolved from environment variables.
//!
//! A single struct captures all runtime settings, resolved once at startup
//! for zero-cost access during execution. Immutable after construction.

use std::sync::OnceLock;

/// Default call recursion limit.
const DEFAULT_RECURSION_LIMIT: u32 = 1000;

/// Default cap on byte-sequence allocations requested by user code.
const DEFAULT_MAX_BYTE_ALLOC: u64 = 1_000_000_000;

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Complete runtime configuration resolved from the environment.
///
/// The runtime reads from this without any per-operation cost.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Maximum nested call depth before a RuntimeError (`EMBER_RECURSION_LIMIT`).
    pub recursion_limit: u32,

    /// Largest byte-sequence allocation a constructor will honor
    /// (`EMBER_MAX_BYTE_ALLOC`).
    pub max_byte_alloc: u64,
}

impl RuntimeConfig {
    /// Resolve configuration from environment variables, falling back to
    /// defaults on absent or unparsable values.
    pub fn from_env() -> Self {
        Self {
            recursion_limit: env_parse("EMBER_RECURSION_LIMIT", DEFAULT_RECURSION_LIMIT),
            max_byte_alloc: env_parse("EMBER_MAX_BYTE_ALLOC", DEFAULT_MAX_BYTE_ALLOC),
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            max_byte_alloc: DEFAULT_MAX_BYTE_ALLOC,
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => raw.parse().unwrap_or(default),
        Err(_) => default,
    }
}

// =============================================================================
// Global Access
// =============================================================================

/// Global configuration singleton.
static GLOBAL_CONFIG: OnceLock<RuntimeConfig> = OnceLock::new();

/// Get the process-wide runtime configuration, resolving it on first use.
pub fn runtime_config() -> &'static RuntimeConfig {
    GLOBAL_CONFIG.get_or_init(RuntimeConfig::from_env)
}
