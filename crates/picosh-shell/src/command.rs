//! Command trait, command table, and argument splitting.

use std::fmt;

use picosh_types::error::Result;
use picosh_types::input::code;
use picosh_vfs::Vfs;

use crate::console::Console;
use crate::history::HistoryRing;

/// Everything a command may touch while it runs.
pub struct Environment<'a> {
    /// Console the command writes its output to.
    pub console: &'a mut dyn Console,
    /// The file tree.
    pub vfs: &'a mut dyn Vfs,
    /// Current working directory (absolute VFS path).
    pub cwd: &'a mut String,
    /// Submitted lines, when history is enabled.
    pub history: Option<&'a HistoryRing>,
    /// The table the command was found in.
    pub commands: &'a CommandTable,
}

/// A named command the shell can dispatch to.
pub trait Command {
    /// The command name (what the user types).
    fn name(&self) -> &str;

    /// One-line description for `help`.
    fn description(&self) -> &str;

    /// Usage string (e.g. "ls \[path\]").
    fn usage(&self) -> &str;

    /// Run the command. `argv[0]` is the command name.
    ///
    /// The returned value is the exit status; 0 means success.
    fn execute(&self, argv: &[&str], env: &mut Environment<'_>) -> Result<i32>;
}

/// Signature of a plain function handler.
pub type Handler = fn(&[&str], &mut Environment<'_>) -> Result<i32>;

/// A command backed by a plain function.
pub struct FnCommand {
    name: &'static str,
    description: &'static str,
    usage: &'static str,
    handler: Handler,
}

impl FnCommand {
    pub fn new(name: &'static str, description: &'static str, handler: Handler) -> Self {
        Self {
            name,
            description,
            usage: name,
            handler,
        }
    }

    /// Replace the usage string (defaults to the bare name).
    pub fn with_usage(mut self, usage: &'static str) -> Self {
        self.usage = usage;
        self
    }
}

impl fmt::Debug for FnCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCommand").field("name", &self.name).finish()
    }
}

impl Command for FnCommand {
    fn name(&self) -> &str {
        self.name
    }
    fn description(&self) -> &str {
        self.description
    }
    fn usage(&self) -> &str {
        self.usage
    }
    fn execute(&self, argv: &[&str], env: &mut Environment<'_>) -> Result<i32> {
        (self.handler)(argv, env)
    }
}

/// Ordered table of commands.
///
/// Registration order is kept: it is the order `help` lists commands in and
/// the order completion offers them.
#[derive(Default)]
pub struct CommandTable {
    commands: Vec<Box<dyn Command>>,
}

impl CommandTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command. A command with the same name is replaced in place.
    pub fn register(&mut self, cmd: Box<dyn Command>) {
        match self.commands.iter().position(|c| c.name() == cmd.name()) {
            Some(i) => self.commands[i] = cmd,
            None => self.commands.push(cmd),
        }
    }

    /// Find a command by exact name.
    pub fn find(&self, name: &str) -> Option<&dyn Command> {
        self.commands
            .iter()
            .find(|c| c.name() == name)
            .map(|c| c.as_ref())
    }

    /// Command names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().map(|c| c.name())
    }

    /// Commands in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Command> + '_ {
        self.commands.iter().map(|c| c.as_ref())
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl fmt::Debug for CommandTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Split a line on runs of spaces into at most `max_args` arguments.
///
/// Arguments past the cap are dropped.
pub fn split_args(line: &[u8], max_args: usize) -> Vec<&[u8]> {
    line.split(|&b| b == code::SPACE)
        .filter(|s| !s.is_empty())
        .take(max_args)
        .collect()
}
