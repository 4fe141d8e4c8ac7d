//! Interactive line-editing shell over a byte-stream console.
//!
//! Raw console bytes are decoded into keys, keys edit a bounded line with
//! history recall and command-name completion, and submitted lines are
//! dispatched to registered commands.

pub mod builtins;
pub mod command;
pub mod complete;
pub mod console;
pub mod history;
pub mod keys;
pub mod line;
mod session;

/// Register the built-in commands (help, ls, cd, pwd, echo, history, clear).
pub use builtins::register_builtins;
/// A single executable command and the table commands are registered in.
pub use command::{Command, CommandTable, Environment, FnCommand};
/// Console abstraction plus stream and in-memory implementations.
pub use console::{Console, MemoryConsole, StreamConsole};
/// One shell bound to one console.
pub use session::Session;
