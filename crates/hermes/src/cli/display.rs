//! Common display utilities for CLI commands.

use colored::Colorize;
use hermes::{HandlerStyle, HermesConfig, Resolution};

/// Print a resolution the way an editor would act on it.
///
/// One location prints as `path:line[:column]`, several as a numbered list
/// to choose from, none as a message with a hint when no module matched.
pub fn print_resolution(resolution: &Resolution, config: &HermesConfig) {
    match resolution.locations.as_slice() {
        [] => {
            println!("no handler found for `{}`", resolution.query);
            if resolution.module_missing() {
                if let Some(style) = resolution.strategy.style() {
                    print_missing_module_hint(style, config);
                }
            }
            if resolution.skipped_arguments > 0 {
                println!(
                    "{}: {} nested generic type argument(s) were skipped",
                    "note".dimmed(),
                    resolution.skipped_arguments
                );
            }
        }
        [only] => println!("{}", only.display()),
        many => {
            println!(
                "Found {} handlers for {}:",
                many.len().to_string().green().bold(),
                resolution.query.cyan()
            );
            for (i, location) in many.iter().enumerate() {
                println!("  {} {}", format!("{}.", i + 1).dimmed(), location.display());
            }
        }
    }
}

fn print_missing_module_hint(style: HandlerStyle, config: &HermesConfig) {
    let suffix = &style.conventions(config).module_suffix;
    println!(
        "\n{}: no project name ends with '{}'. Run '{}' to see discovered modules.",
        "hint".dimmed(),
        suffix,
        "hermes modules".cyan()
    );
}

/// Print a resolution as pretty JSON.
pub fn print_json(resolution: &Resolution) -> Result<(), hermes::Error> {
    let json = serde_json::to_string_pretty(resolution)
        .map_err(|e| hermes::Error::Config(format!("JSON error: {e}")))?;
    println!("{json}");
    Ok(())
}
