//! `hermes resolve` command implementation.

use std::path::Path;

use hermes::Strategy;

use super::display::{print_json, print_resolution};

/// Run the resolve command.
pub fn run(
    workspace: &Path,
    config: Option<&Path>,
    name: &str,
    strategy: Option<Strategy>,
    json: bool,
) -> Result<(), hermes::Error> {
    let hermes = super::open(workspace, config)?;

    let resolution = match strategy {
        Some(strategy) => hermes.resolve_with(name, strategy),
        None => hermes.resolve(name),
    };

    if json {
        print_json(&resolution)
    } else {
        print_resolution(&resolution, hermes.config());
        Ok(())
    }
}
