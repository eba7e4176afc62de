//! Help and version text generated from the catalog.

use super::command::{CommandDefinition, Options};
use super::definition::Cli;

/// Width of the label column in option and command tables.
const LABEL_WIDTH: usize = 30;

/// `m7r-cm 0.1.0 from 2021-12-21`
pub fn format_version(cli: &Cli) -> String {
    let description = cli.description();
    format!(
        "{} {}",
        description.executable_name(),
        description.version_text()
    )
}

/// Global help: description, usage, global options and the command list.
pub fn format_help(cli: &Cli) -> String {
    let description = cli.description();
    let exe = description.executable_name();
    let mut help = String::new();

    help.push_str(&format!("{exe} {}\n", description.version_text()));
    help.push_str(description.description());
    help.push_str("\n\n");

    help.push_str(&format!(
        "Usage: {exe} [global options] <command> [options] [parameters]\n\n"
    ));

    help.push_str("Global options:\n");
    push_options(&mut help, cli.global_options());

    help.push_str("\nCommands:\n");
    for command in cli.commands().iter() {
        let usage = join_nonempty(&[command.name(), command.parameters().usage()]);
        push_row(&mut help, &usage, command.description());
    }

    help.push_str(&format!(
        "\nWithout a command, {exe} prints program info.\n\
         Call '{exe} <command> --help' for command details."
    ));
    help
}

/// Help for one command.
pub fn format_command_help(cli: &Cli, command: &CommandDefinition) -> String {
    let exe = cli.description().executable_name();
    let mut help = String::new();

    let options = if command.specific_options().is_empty() {
        String::new()
    } else {
        "[options]".to_string()
    };
    let usage = join_nonempty(&[
        exe.to_string(),
        "[global options]".to_string(),
        command.name(),
        options,
        command.parameters().usage(),
    ]);
    help.push_str(&format!("Usage: {usage}\n\n"));
    help.push_str(command.description());
    help.push('\n');

    if let Some((name, description)) = command.parameters().description() {
        help.push_str("\nParameters:\n");
        push_row(&mut help, &format!("<{name}>"), description);
    }
    if !command.specific_options().is_empty() {
        help.push_str("\nOptions:\n");
        push_options(&mut help, command.specific_options());
    }
    help.push_str(&format!("\nCall '{exe} --help' for global options."));
    help
}

fn push_options(help: &mut String, options: &Options) {
    for option in options.iter() {
        push_row(help, &option.usage_label(), option.description());
    }
}

fn push_row(help: &mut String, label: &str, description: &str) {
    if label.chars().count() + 2 > LABEL_WIDTH {
        help.push_str(&format!("  {label}\n  {:LABEL_WIDTH$}{description}\n", ""));
    } else {
        help.push_str(&format!("  {label:<LABEL_WIDTH$}{description}\n"));
    }
}

fn join_nonempty(parts: &[String]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(" ")
}
