use std::path::PathBuf;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::domain::schema::CURRENT_SCHEMA_VERSION;
use crate::utils::build_info;

use super::{parse_bool, required_arg};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("help", "Show available commands", "help [command]", cmd_help),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new(
            "config",
            "Show or change defaults",
            "config [layout|width|show-title|submitted-by|storage-root <value>]",
            cmd_config,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit).with_aliases(&["quit"]),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first().map(|name| name.to_lowercase()) {
        match context.registry.get(&name) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(args[0]),
        }
        return Ok(());
    }
    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output_section(format!("Form Core {}", meta.version));
    io::print_info(format!("  {}", meta.summary()));
    io::print_info(format!("  Schema ver : v{}", CURRENT_SCHEMA_VERSION));
    Ok(())
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    const USAGE: &str = "config [layout|width|show-title|submitted-by|storage-root <value>]";
    let Some(key) = args.first() else {
        output_section("Configuration");
        let config = &context.config;
        io::print_info(format!("  layout       : {}", config.default_layout));
        io::print_info(format!("  width        : {}", config.default_form_width));
        io::print_info(format!("  show-title   : {}", config.show_title));
        io::print_info(format!("  submitted-by : {}", config.submitted_by));
        io::print_info(format!(
            "  storage-root : {}",
            config.resolve_storage_root().display()
        ));
        return Ok(());
    };

    let value = required_arg(args, 1, USAGE)?;
    let mut config = context.config.clone();
    match key.to_ascii_lowercase().as_str() {
        "layout" => config.default_layout = value.parse().map_err(CommandError::InvalidArguments)?,
        "width" => {
            config.default_form_width = value.parse().map_err(CommandError::InvalidArguments)?
        }
        "show-title" => config.show_title = parse_bool(value)?,
        "submitted-by" => config.submitted_by = args[1..].join(" "),
        "storage-root" => config.storage_root = Some(PathBuf::from(value)),
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown setting `{}`",
                other
            )))
        }
    }

    context.config_manager.save(&config)?;
    context.config = config;
    io::print_success(format!("Updated `{}`.", key));
    if key.eq_ignore_ascii_case("storage-root") {
        io::print_hint("The new storage root is used from the next start.");
    }
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
