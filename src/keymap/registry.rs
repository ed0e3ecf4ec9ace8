//! Dispatch table from commands to host operations
//!
//! Every [`Command`] has exactly one slot. A slot is either bound to a host
//! handler or explicitly [`CommandHandler::Unbound`], so a config can use the
//! whole Helix vocabulary before the host implements all of it.

use std::collections::HashMap;
use std::fmt;

use super::command::Command;

/// A host operation, run against the host's editor state
pub type HandlerFn<H> = Box<dyn FnMut(&mut H)>;

/// What a command slot holds
pub enum CommandHandler<H> {
    /// Wired to a concrete host operation
    Bound(HandlerFn<H>),
    /// Recognized but not implemented by this host
    Unbound,
}

impl<H> CommandHandler<H> {
    pub fn is_bound(&self) -> bool {
        matches!(self, CommandHandler::Bound(_))
    }
}

impl<H> fmt::Debug for CommandHandler<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandHandler::Bound(_) => f.write_str("Bound"),
            CommandHandler::Unbound => f.write_str("Unbound"),
        }
    }
}

/// Result of invoking a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    /// The handler ran this many times
    Executed(usize),
    /// No handler is wired; nothing happened
    Unbound,
}

/// Closed table of command handlers for a host type `H`
pub struct CommandRegistry<H> {
    handlers: HashMap<Command, CommandHandler<H>>,
}

impl<H> CommandRegistry<H> {
    /// Create a registry with every command present and unbound
    pub fn new() -> Self {
        let handlers = Command::ALL
            .iter()
            .map(|&command| (command, CommandHandler::Unbound))
            .collect();
        Self { handlers }
    }

    /// Wire a command to a host operation, replacing any previous handler
    pub fn bind(&mut self, command: Command, handler: impl FnMut(&mut H) + 'static) {
        self.handlers
            .insert(command, CommandHandler::Bound(Box::new(handler)));
    }

    /// Builder-style [`bind`](Self::bind)
    pub fn with(mut self, command: Command, handler: impl FnMut(&mut H) + 'static) -> Self {
        self.bind(command, handler);
        self
    }

    /// Return a command to the unbound placeholder
    pub fn unbind(&mut self, command: Command) {
        self.handlers.insert(command, CommandHandler::Unbound);
    }

    pub fn is_bound(&self, command: Command) -> bool {
        self.handlers
            .get(&command)
            .is_some_and(CommandHandler::is_bound)
    }

    /// Commands that currently have a host handler
    pub fn bound_commands(&self) -> Vec<Command> {
        let mut commands: Vec<Command> = self
            .handlers
            .iter()
            .filter(|(_, handler)| handler.is_bound())
            .map(|(&command, _)| command)
            .collect();
        commands.sort();
        commands
    }

    /// Run a command's handler `count` times against `host`
    ///
    /// Unbound commands are a logged no-op, never an error.
    pub fn invoke(&mut self, host: &mut H, command: Command, count: usize) -> Invocation {
        match self.handlers.get_mut(&command) {
            Some(CommandHandler::Bound(handler)) => {
                for _ in 0..count {
                    handler(host);
                }
                Invocation::Executed(count)
            }
            Some(CommandHandler::Unbound) | None => {
                tracing::debug!(command = %command, "command has no host handler, ignoring");
                Invocation::Unbound
            }
        }
    }
}

impl<H> Default for CommandRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for CommandRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("bound", &self.bound_commands())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        lines: i32,
    }

    #[test]
    fn test_new_registry_is_fully_unbound() {
        let registry: CommandRegistry<Counter> = CommandRegistry::new();
        assert!(registry.bound_commands().is_empty());
        assert!(!registry.is_bound(Command::Undo));
    }

    #[test]
    fn test_invoke_bound_repeats() {
        let mut registry = CommandRegistry::new().with(Command::MoveLineDown, |c: &mut Counter| {
            c.lines += 1
        });
        let mut host = Counter::default();

        assert_eq!(
            registry.invoke(&mut host, Command::MoveLineDown, 3),
            Invocation::Executed(3)
        );
        assert_eq!(host.lines, 3);
    }

    #[test]
    fn test_invoke_unbound_is_noop() {
        let mut registry: CommandRegistry<Counter> = CommandRegistry::new();
        let mut host = Counter::default();

        assert_eq!(
            registry.invoke(&mut host, Command::SurroundAdd, 1),
            Invocation::Unbound
        );
        assert_eq!(host.lines, 0);
    }

    #[test]
    fn test_unbind_restores_placeholder() {
        let mut registry = CommandRegistry::new().with(Command::Undo, |c: &mut Counter| c.lines -= 1);
        assert!(registry.is_bound(Command::Undo));

        registry.unbind(Command::Undo);
        assert!(!registry.is_bound(Command::Undo));
        assert_eq!(registry.bound_commands(), Vec::<Command>::new());
    }
}
