//! Host environment utility functions

use std::path::PathBuf;

/// Environment variable holding the path to the software root directory.
pub const SW_ROOT_ENV_VAR: &str = "HUMANOID_CTRL_SW_ROOT";

/// Get the software root directory from the host environment.
pub fn get_sw_root() -> Result<PathBuf, std::env::VarError> {
    std::env::var(SW_ROOT_ENV_VAR).map(PathBuf::from)
}
