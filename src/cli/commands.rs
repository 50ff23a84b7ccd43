//! Command dispatch: maps parsed arguments onto application services.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::demo::reference_catalog;
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::global_config_path;
use crate::infrastructure::{InfraError, ServiceContainer};

pub fn execute_command(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Total { files }) => cmd_total(container, files),
        Some(Commands::Tree { file }) => cmd_tree(container, file),
        Some(Commands::Leaves { file }) => cmd_leaves(container, file),
        Some(Commands::Info { file }) => cmd_info(container, file),
        Some(Commands::Demo) => cmd_demo(container),
        Some(Commands::Config { command }) => cmd_config(container, command),
        Some(Commands::Completion { shell }) => cmd_completion(*shell),
        None => Err(CliError::Usage(
            "no command given, run with --help".to_string(),
        )),
    }
}

/// Expand `~` and `$VAR` in a path argument.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

#[instrument(skip(container))]
fn cmd_total(container: &ServiceContainer, files: &[PathBuf]) -> CliResult<()> {
    let paths: Vec<PathBuf> = files.iter().map(|f| expand_path(f)).collect();
    let pricing = &container.pricing;

    let mut grand_total = 0.0;
    let mut first_error: Option<ApplicationError> = None;
    for (path, result) in pricing.totals(&paths) {
        match result {
            Ok(total) => {
                grand_total += total;
                output::action(&path.display().to_string(), &pricing.format_price(total));
            }
            Err(e) => {
                output::failure(&format!("{}: {}", path.display(), e));
                first_error.get_or_insert(e);
            }
        }
    }

    if paths.len() > 1 {
        output::header(&format!("Total: {}", pricing.format_price(grand_total)));
    }

    match first_error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let rendered = container.pricing.render(&expand_path(file))?;
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", rendered).map_err(|e| InfraError::io("write tree", e))?;
    Ok(())
}

#[instrument(skip(container))]
fn cmd_leaves(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let pricing = &container.pricing;
    for (name, price) in pricing.leaves(&expand_path(file))? {
        output::info(&format!("{}: {}", name, pricing.format_price(price)));
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_info(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let pricing = &container.pricing;
    let summary = pricing.summary(&expand_path(file))?;
    debug!("summary: {:?}", summary);

    output::header(&summary.name);
    output::detail(&format!("total:    {}", pricing.format_price(summary.total)));
    output::detail(&format!("items:    {}", summary.items));
    output::detail(&format!("products: {}", summary.leaves));
    output::detail(&format!("depth:    {}", summary.depth));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_demo(container: &ServiceContainer) -> CliResult<()> {
    let catalog = reference_catalog().map_err(ApplicationError::from)?;
    for name in &catalog.added {
        output::info(&format!("Adding {} to the box", name));
    }
    let total = catalog
        .arena
        .price(catalog.outer)
        .map_err(ApplicationError::from)?;
    output::info(&format!(
        "Total price: {}",
        container.pricing.format_price(total)
    ));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            let path = global_config_path().ok_or_else(|| {
                CliError::Usage("cannot determine config directory".to_string())
            })?;
            output::info(&path.display());
            Ok(())
        }
    }
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
