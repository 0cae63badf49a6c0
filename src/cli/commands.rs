//! Command dispatch

use std::io::{self, Write};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::tree_view::ToTermTree;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{Language, OpinionModifier};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Load settings, apply global flags and run the selected command.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        let mut cmd = Cli::command();
        cmd.print_help()
            .map_err(|e| InfraError::console("print help", e))?;
        return Ok(());
    };

    let config_dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(InfraError::WorkingDir)?,
    };
    let mut settings = Settings::load(Some(&config_dir))?;
    if cli.strict {
        settings.strict_blocks = true;
    }
    debug!("settings: {:?}", settings);

    let container = ServiceContainer::new(settings);

    match command {
        Commands::Tree { file } => cmd_tree(&container, file),
        Commands::Fmt { file, write } => cmd_fmt(&container, file, *write),
        Commands::Mod { file } => match file {
            Some(file) => cmd_mod(&container, file),
            None => cmd_mod_list(&container),
        },
        Commands::Opinions { file } => cmd_opinions(&container, file),
        Commands::Loc { file, prefix } => cmd_loc(&container, file, prefix.as_deref()),
        Commands::Config { command } => cmd_config(&container, command, &config_dir),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let root = container.documents.parse_file(file)?;
    output::plain(&root.to_term_tree());
    Ok(())
}

#[instrument(skip(container))]
fn cmd_fmt(container: &ServiceContainer, file: &Path, write: bool) -> CliResult<()> {
    let text = container.documents.format_file(file)?;
    if write {
        container.documents.write_text(file, &text)?;
        output::done(&format!("Formatted {}", file.display()));
        return Ok(());
    }
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.flush())
        .map_err(|e| InfraError::console("write to stdout", e))?;
    Ok(())
}

#[instrument(skip(container))]
fn cmd_mod(container: &ServiceContainer, name: &Path) -> CliResult<()> {
    let path = container.mods.resolve(name, &container.settings.mod_dir)?;
    let loaded = container.mods.read(&path)?;
    let descriptor = &loaded.descriptor;

    output::title(descriptor.display_name().unwrap_or("<unnamed>"));
    output::field("file", &loaded.descriptor_file.display());
    let optional = [
        ("path", &descriptor.path),
        ("user_dir", &descriptor.user_dir),
        ("archive", &descriptor.archive),
        ("picture", &descriptor.picture),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            output::field(label, value);
        }
    }
    for replace_path in &descriptor.replace_paths {
        output::field("replace_path", replace_path);
    }
    if !descriptor.tags.is_empty() {
        output::field("tags", &descriptor.tags.join(", "));
    }
    if !descriptor.dependencies.is_empty() {
        output::field("dependencies", &descriptor.dependencies.join(", "));
    }

    if !loaded.opinion_modifiers.is_empty() {
        output::title("Opinion modifiers");
        for file in &loaded.opinion_modifiers {
            output::item(&format!("{} ({} modifiers)", file.name(), file.modifiers().len()));
        }
    }
    Ok(())
}

fn cmd_mod_list(container: &ServiceContainer) -> CliResult<()> {
    let mod_dir = &container.settings.mod_dir;
    let files = container.mods.list(mod_dir)?;
    if files.is_empty() {
        output::warning(&format!("No mod descriptors in {}", mod_dir.display()));
        return Ok(());
    }
    for file in files {
        match container.mods.read_descriptor(&file) {
            Ok(descriptor) => output::plain(&format!(
                "{}  {}",
                descriptor.display_name().unwrap_or("<unnamed>"),
                file.display()
            )),
            Err(e) => output::warning(&e),
        }
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_opinions(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let modifiers = container.opinion_modifiers.read(file)?;
    output::title(&modifiers.name());
    for modifier in modifiers.modifiers() {
        output::item(&describe_modifier(modifier));
    }
    Ok(())
}

fn describe_modifier(modifier: &OpinionModifier) -> String {
    let mut line = format!("{}: opinion {:+}", modifier.name(), modifier.opinion);
    if let Some(months) = modifier.duration {
        line.push_str(&format!(", {} months", months));
    }
    let flags = modifier.flags();
    if !flags.is_empty() {
        line.push_str(&format!(" [{}]", flags.join(", ")));
    }
    line
}

#[instrument(skip(container))]
fn cmd_loc(container: &ServiceContainer, file: &Path, prefix: Option<&str>) -> CliResult<()> {
    let localisation = container.localisation.read(file)?;
    let rows = localisation
        .rows()
        .iter()
        .filter(|row| prefix.map_or(true, |p| row.id().starts_with(p)));
    for row in rows {
        output::title(row.id());
        for language in Language::ALL {
            let text = row.text(language);
            if !text.is_empty() {
                output::field(&language.to_string(), text);
            }
        }
    }
    Ok(())
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands, config_dir: &Path) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::plain(&container.settings.to_toml()?);
        }
        ConfigCommands::Template => {
            output::plain(&Settings::template());
        }
        ConfigCommands::Path => {
            let global = global_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<unavailable>".to_string());
            output::field("global", &global);
            output::field("local", &local_config_path(config_dir).display());
        }
    }
    Ok(())
}

/// Report an error on stderr and return the exit code for it.
pub fn report(error: &CliError) -> i32 {
    output::error(error);
    error.exit_code()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_modifier_when_describing_then_lists_duration_and_flags() {
        let mut modifier = OpinionModifier::new("opinion_traitor");
        modifier.opinion = -50;
        modifier.duration = Some(12);
        modifier.revoke_reason = true;

        assert_eq!(
            describe_modifier(&modifier),
            "opinion_traitor: opinion -50, 12 months [revoke_reason]"
        );
    }

    #[test]
    fn given_modifier_without_duration_then_omits_months() {
        let mut modifier = OpinionModifier::new("friend");
        modifier.opinion = 10;
        assert_eq!(describe_modifier(&modifier), "friend: opinion +10");
    }
}
