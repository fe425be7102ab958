//! Parameter file loading
//!
//! All configurable values of the software live in TOML files under the
//! `params` directory of the software root. Each module defines its own
//! `Params` struct and loads it with [`load`] at initialisation.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::de::DeserializeOwned;
use std::fs;
use thiserror::Error;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// An error that occurs during loading of a parameter file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(
        "The software root environment variable ({}) is not set",
        crate::host::SW_ROOT_ENV_VAR
    )]
    SwRootNotSet,

    #[error("Cannot load the parameter file: {0}")]
    FileLoadError(#[from] std::io::Error),

    #[error("Cannot read the parameter file: {0}")]
    DeserialiseError(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Load a parameter file into the given `Params` struct.
///
/// The file path is relative to the software root's `params` directory.
pub fn load<P>(param_file_path: &str) -> Result<P, LoadError>
where
    P: DeserializeOwned,
{
    let mut path = crate::host::get_sw_root().map_err(|_| LoadError::SwRootNotSet)?;
    path.push("params");
    path.push(param_file_path);

    let params_str = fs::read_to_string(path)?;

    Ok(toml::from_str(params_str.as_str())?)
}
