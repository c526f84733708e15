//! Environment variable access.

use std::ffi::OsString;

/// Read access to environment variables (injectable for testing).
pub trait EnvProvider: Send + Sync {
    fn get(&self, key: &str) -> Option<OsString>;
}

/// Reads from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl EnvProvider for SystemEnv {
    fn get(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }
}
