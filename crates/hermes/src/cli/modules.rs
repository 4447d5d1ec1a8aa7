//! `hermes modules` command implementation.

use std::path::Path;

use colored::Colorize;
use hermes::{HandlerStyle, select_module};

/// Run the modules command.
pub fn run(workspace: &Path, config: Option<&Path>) -> Result<(), hermes::Error> {
    let hermes = super::open(workspace, config)?;
    let ws = hermes.workspace();
    let conventions = hermes.config();

    let command = select_module(ws.modules(), HandlerStyle::Command, conventions);
    let request = select_module(ws.modules(), HandlerStyle::Request, conventions);

    println!("{}", "Hermes Modules".cyan().bold());
    println!();
    println!("  {}: {}", "Workspace".white().bold(), ws.root().display());
    println!(
        "  {}: {} modules, {} units",
        "Loaded".white().bold(),
        ws.modules().len().to_string().green(),
        ws.unit_count().to_string().green()
    );
    println!();

    for module in ws.modules() {
        let mut serves = Vec::new();
        if command.is_some_and(|m| std::ptr::eq(m, module)) {
            serves.push(HandlerStyle::Command.as_str());
        }
        if request.is_some_and(|m| std::ptr::eq(m, module)) {
            serves.push(HandlerStyle::Request.as_str());
        }
        let serves = if serves.is_empty() {
            String::new()
        } else {
            format!(" [{}]", serves.join(", ")).yellow().to_string()
        };
        println!(
            "    {} {} ({} units){}",
            "•".dimmed(),
            module.name(),
            module.units().len(),
            serves
        );
    }

    if !ws.errors().is_empty() {
        println!();
        println!(
            "  {}: {} files could not be loaded",
            "Warning".yellow().bold(),
            ws.errors().len().to_string().yellow()
        );
        for error in ws.errors() {
            let category = if error.kind.is_internal_error() {
                "internal"
            } else {
                "input"
            };
            println!("    {} {} {}", "•".dimmed(), error, format!("[{category}]").dimmed());
        }
    }

    Ok(())
}
