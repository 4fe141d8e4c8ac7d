//! picosh terminal entry point.
//!
//! Puts the controlling terminal in raw mode and runs a shell session over
//! stdin/stdout against an in-memory demo file tree. Type `exit` to quit.

mod vfs_setup;

use std::io;

use anyhow::{Context, Result};
use crossterm::terminal;

use picosh_shell::{CommandTable, Environment, FnCommand, Session, StreamConsole, register_builtins};
use picosh_types::config::ShellConfig;
use picosh_types::error::PicoshError;
use picosh_vfs::MemoryVfs;

/// Raw mode for the lifetime of the guard.
struct RawModeGuard;

impl RawModeGuard {
    fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn exit_cmd(_argv: &[&str], _env: &mut Environment<'_>) -> picosh_types::error::Result<i32> {
    Ok(0)
}

fn is_exit(line: &[u8]) -> bool {
    line.split(|&b| b == b' ').find(|s| !s.is_empty()) == Some(&b"exit"[..])
}

fn load_config() -> Result<ShellConfig> {
    // Resolve config from CLI arg, PICOSH_CONFIG env var, or defaults.
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("PICOSH_CONFIG").ok());
    match path {
        Some(path) => ShellConfig::load(&path).with_context(|| format!("loading {path}")),
        None => Ok(ShellConfig::default()),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    log::info!("Starting picosh (prompt {:?})", config.prompt);

    let mut vfs = MemoryVfs::new();
    vfs_setup::populate_demo_vfs(&mut vfs)?;

    let mut commands = CommandTable::new();
    register_builtins(&mut commands);
    commands.register(Box::new(FnCommand::new("exit", "Leave the shell", exit_cmd)));

    let _raw = RawModeGuard::acquire().context("enabling raw mode")?;
    let console = StreamConsole::new(io::stdin().lock(), io::stdout());
    let mut session = Session::new(console, &config, commands)?.with_vfs(Box::new(vfs));

    loop {
        let line = match session.listen() {
            Ok(line) => line,
            Err(PicoshError::Console(msg)) => {
                log::info!("Console ended: {msg}");
                break;
            },
            Err(e) => return Err(e.into()),
        };
        if is_exit(&line) {
            break;
        }
        session.execute(&line)?;
    }

    log::info!("picosh shut down cleanly");
    Ok(())
}
