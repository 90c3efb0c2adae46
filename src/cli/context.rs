use strsim::levenshtein;
use uuid::Uuid;

use crate::{config::ConfigManager, core::LedgerController, ledger::Achievement};

use super::{
    commands, output,
    registry::{CommandEntry, CommandRegistry},
    CliError, CommandError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

/// Session state shared by every command handler.
pub struct ShellContext {
    pub(crate) mode: CliMode,
    pub(crate) controller: LedgerController,
    pub(crate) config_manager: ConfigManager,
    pub(crate) registry: CommandRegistry,
    /// Group shown by `group` without arguments.
    pub(crate) selected_group: Option<Uuid>,
    /// Achievements unlocked by the most recent command.
    pub(crate) last_unlocked: Vec<Achievement>,
    pub(crate) running: bool,
    pub(crate) last_command: Option<String>,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new();
        let config = config_manager.load()?;
        let controller = LedgerController::with_system_clock(config)?;
        Ok(Self::with_controller(mode, controller, config_manager))
    }

    pub fn with_controller(
        mode: CliMode,
        controller: LedgerController,
        config_manager: ConfigManager,
    ) -> Self {
        if mode == CliMode::Script {
            colored::control::set_override(false);
        }
        Self {
            mode,
            controller,
            config_manager,
            registry: CommandRegistry::new(commands::definitions()),
            selected_group: None,
            last_unlocked: Vec::new(),
            running: true,
            last_command: None,
        }
    }

    pub fn mode(&self) -> CliMode {
        self.mode
    }

    pub fn controller(&self) -> &LedgerController {
        &self.controller
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn prompt(&self) -> String {
        let group = self
            .selected_group
            .and_then(|id| self.controller.ledger().group(id));
        match group {
            Some(group) => format!("expense[{}]> ", group.name),
            None => "expense> ".to_string(),
        }
    }

    /// Formats an amount with the configured currency symbol.
    pub(crate) fn money(&self, amount: f64) -> String {
        output::money(&self.controller.config().currency_symbol, amount)
    }

    /// Remembers and announces the achievements a command unlocked.
    pub(crate) fn announce(&mut self, unlocked: Vec<Achievement>) {
        for achievement in &unlocked {
            output::success(format!(
                "Achievement Unlocked: {} {}!",
                achievement.icon(),
                achievement.title()
            ));
        }
        self.last_unlocked = unlocked;
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

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        super::shell::handle_line(self, line)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let lowered = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &lowered), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::info("Use `help <command>` for usage details.");
                Ok(())
            }
            other => {
                output::error(other);
                Ok(())
            }
        }
    }
}
