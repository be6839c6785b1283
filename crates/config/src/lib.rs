//! Pipeline configuration loading.
//!
//! Config files: `skilldoc.toml`, `skilldoc.yaml`, `skilldoc.yml`, or `skilldoc.json`
//! Searched in `./` then the user config dir (`~/.config/skilldoc/` on Linux).

pub mod error;
pub mod loader;
pub mod schema;

pub use {
    error::{Error, Result},
    loader::{config_dir, discover_and_load, find_config_file, load_config},
    schema::{ReportConfig, SkilldocConfig},
};
