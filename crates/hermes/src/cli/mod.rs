//! CLI command implementations.

mod display;

pub mod at;
pub mod modules;
pub mod resolve;

use std::path::Path;

use hermes::{Hermes, HermesConfig, Workspace};

/// Load the workspace and its configuration.
fn open(workspace: &Path, config: Option<&Path>) -> Result<Hermes, hermes::Error> {
    let config = HermesConfig::discover(workspace, config)?;
    let workspace = Workspace::load(workspace)?;
    Ok(Hermes::with_config(workspace, config))
}
