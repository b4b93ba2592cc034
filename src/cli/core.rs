use std::io;

use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;
use thiserror::Error;

use crate::{
    config::{Config, ConfigError, ConfigManager},
    core::{FillSession, FormBuilder},
    errors::FormError,
    storage::JsonStorage,
};

use super::{commands, io as cli_io, registry::CommandRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub storage: JsonStorage,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub builder: Option<FormBuilder>,
    pub session: Option<FillSession>,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        let storage = JsonStorage::from_config(&config)?;

        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        if mode == CliMode::Script {
            colored::control::set_override(false);
        }

        Ok(Self {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            storage,
            config_manager,
            config,
            builder: None,
            session: None,
            last_command: None,
            running: true,
        })
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn prompt(&self) -> String {
        match (&self.session, &self.builder) {
            (Some(session), _) => {
                let step = session
                    .current_step()
                    .map(|step| step.title.as_str())
                    .unwrap_or("done");
                format!("form_core [fill: {}] > ", step)
            }
            (None, Some(builder)) => format!("form_core [{}] > ", builder.schema().title),
            (None, None) => "form_core > ".into(),
        }
    }

    pub(crate) fn builder(&self) -> Result<&FormBuilder, CommandError> {
        self.builder.as_ref().ok_or(CommandError::FormNotLoaded)
    }

    pub(crate) fn builder_mut(&mut self) -> Result<&mut FormBuilder, CommandError> {
        self.builder.as_mut().ok_or(CommandError::FormNotLoaded)
    }

    pub(crate) fn session_mut(&mut self) -> Result<&mut FillSession, CommandError> {
        self.session.as_mut().ok_or(CommandError::NotFilling)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, input), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true).map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(&message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::FormNotLoaded => {
                cli_io::print_error(CommandError::FormNotLoaded);
                cli_io::print_hint("Try `new \"Contact\"` to get started.");
                Ok(())
            }
            other => {
                cli_io::print_error(other);
                Ok(())
            }
        }
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("No form loaded. Use `new` or `open` first.")]
    FormNotLoaded,
    #[error("No fill session active. Use `fill` first.")]
    NotFilling,
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] FormError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] FormError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("{0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}
