//! Command dispatch

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::{BuildContext, HierarchyIndex, Indexed, LineSink, TreeRenderer, WriteSink};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given. See 'docktree --help'.".to_string(),
        ));
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let search_dir = resolve_search_dir(cli.project_dir.as_deref())?;
    let settings = Settings::load(Some(&search_dir))?;
    if !settings.color {
        output::disable_colors();
    }
    let container = ServiceContainer::new(settings);

    match command {
        Commands::Tree => cmd_tree(&container, &search_dir),
        Commands::Tags => cmd_tags(&container, &search_dir),
        Commands::Info => cmd_info(&container, &search_dir),
        Commands::Print { context } => cmd_print(&container, &search_dir, context),
        Commands::Script { context } => cmd_script(&container, &search_dir, context),
        Commands::Roots => cmd_roots(&container, &search_dir),
        Commands::Leaves => cmd_leaves(&container, &search_dir),
        Commands::Settings => cmd_settings(&container),
        Commands::Completion { .. } => Ok(()),
    }
}

fn resolve_search_dir(project_dir: Option<&Path>) -> CliResult<PathBuf> {
    match project_dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => std::env::current_dir()
            .map_err(|e| InfraError::io("determine current directory", e).into()),
    }
}

/// Write lines to stdout through the same sink the tree uses.
fn emit<I, S>(lines: I) -> CliResult<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdout = io::stdout();
    let mut sink = WriteSink(stdout.lock());
    for line in lines {
        sink.accept(line.as_ref())
            .map_err(|e| InfraError::io("write to stdout", e))?;
    }
    sink.0
        .flush()
        .map_err(|e| InfraError::io("flush stdout", e))?;
    Ok(())
}

fn warn_unknown_parents(container: &ServiceContainer, index: &HierarchyIndex<BuildContext>) {
    let unknown = &container.settings.unknown_parent;
    if let Some(children) = index.children_of(unknown.as_str()) {
        let names: Vec<&str> = children.iter().map(|c| c.index()).collect();
        output::warning(&format!(
            "no '{}' line in: {}",
            container.settings.parent_directive.trim(),
            names.join(", ")
        ));
    }
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, dir: &Path) -> CliResult<()> {
    let index = container.contexts.hierarchy(dir)?;
    warn_unknown_parents(container, &index);
    debug!("tree: {} nodes, depth {}", index.node_count(), index.depth());

    let stdout = io::stdout();
    let mut sink = WriteSink(stdout.lock());
    TreeRenderer::new(&index)
        .render(&mut sink)
        .map_err(|e| InfraError::io("write tree", e))?;
    Ok(())
}

#[instrument(skip(container))]
fn cmd_tags(container: &ServiceContainer, dir: &Path) -> CliResult<()> {
    let contexts = container.contexts.find_contexts(dir)?;
    emit(container.reports.tag_board(&contexts))
}

#[instrument(skip(container))]
fn cmd_info(container: &ServiceContainer, dir: &Path) -> CliResult<()> {
    let index = container.contexts.hierarchy(dir)?;
    emit(container.reports.distribution_board(&index))
}

#[instrument(skip(container))]
fn cmd_print(container: &ServiceContainer, dir: &Path, name: &str) -> CliResult<()> {
    let context = container.contexts.find_context(dir, name)?;
    let lines = container
        .reports
        .dockerfile_listing(&context, &container.settings.dockerfile)?;
    emit(lines)
}

#[instrument(skip(container))]
fn cmd_script(container: &ServiceContainer, dir: &Path, name: &str) -> CliResult<()> {
    let context = container.contexts.find_context(dir, name)?;
    let lines = container
        .reports
        .script_listing(&context, &container.settings.dockerfile)?;
    emit(lines)
}

#[instrument(skip(container))]
fn cmd_roots(container: &ServiceContainer, dir: &Path) -> CliResult<()> {
    let index = container.contexts.hierarchy(dir)?;
    emit(index.roots().iter().map(|root| root.index()))
}

#[instrument(skip(container))]
fn cmd_leaves(container: &ServiceContainer, dir: &Path) -> CliResult<()> {
    let index = container.contexts.hierarchy(dir)?;
    emit(index.leaves())
}

fn cmd_settings(container: &ServiceContainer) -> CliResult<()> {
    output::info(&container.settings.to_toml()?);
    Ok(())
}
