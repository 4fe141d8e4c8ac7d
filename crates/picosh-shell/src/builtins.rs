//! Built-in commands.
//!
//! Output lines end in `\n\r` so they land in column 0 on a raw terminal.

use picosh_types::error::Result;
use picosh_vfs::{EntryKind, resolve_path};

use crate::command::{Command, CommandTable, Environment};
use crate::console::{Console, clear_screen};
use crate::history::HistoryRing;

/// Register every built-in command into a table.
pub fn register_builtins(table: &mut CommandTable) {
    table.register(Box::new(HelpCmd));
    table.register(Box::new(LsCmd));
    table.register(Box::new(CatCmd));
    table.register(Box::new(CdCmd));
    table.register(Box::new(PwdCmd));
    table.register(Box::new(EchoCmd));
    table.register(Box::new(HistoryCmd));
    table.register(Box::new(ClearCmd));
}

/// Write the history oldest first, numbered from 1.
pub fn print_history(console: &mut dyn Console, history: &HistoryRing) -> Result<()> {
    for (i, entry) in history.iter_oldest_first().enumerate() {
        console.puts(&format!("{} ", i + 1))?;
        console.write_all(entry)?;
        console.puts("\n\r")?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

struct HelpCmd;
impl Command for HelpCmd {
    fn name(&self) -> &str {
        "help"
    }
    fn description(&self) -> &str {
        "List available commands"
    }
    fn usage(&self) -> &str {
        "help"
    }
    fn execute(&self, _argv: &[&str], env: &mut Environment<'_>) -> Result<i32> {
        for cmd in env.commands.iter() {
            env.console.puts(&format!("  {:<16} {}\n\r", cmd.usage(), cmd.description()))?;
        }
        Ok(0)
    }
}

// ---------------------------------------------------------------------------
// ls
// ---------------------------------------------------------------------------

struct LsCmd;
impl Command for LsCmd {
    fn name(&self) -> &str {
        "ls"
    }
    fn description(&self) -> &str {
        "List directory contents"
    }
    fn usage(&self) -> &str {
        "ls [path]"
    }
    fn execute(&self, argv: &[&str], env: &mut Environment<'_>) -> Result<i32> {
        let (shown, path) = match argv {
            [_] => (env.cwd.clone(), env.cwd.clone()),
            [_, target] => (target.to_string(), resolve_path(env.cwd, target)),
            _ => {
                env.console.puts("ls: too many arguments\n\r")?;
                return Ok(1);
            },
        };

        let entries = match env.vfs.readdir(&path) {
            Ok(entries) => entries,
            Err(e) => {
                log::debug!("ls {path}: {e}");
                env.console.puts(&format!(
                    "ls: cannot access '{shown}': No such file or directory\n\r"
                ))?;
                return Ok(1);
            },
        };

        let mut out = String::new();
        for e in &entries {
            out.push_str(&e.name);
            if e.kind == EntryKind::Directory {
                out.push('/');
            }
            out.push_str("  ");
        }
        out.push_str("\n\r");
        env.console.puts(&out)?;
        Ok(0)
    }
}

// ---------------------------------------------------------------------------
// cat
// ---------------------------------------------------------------------------

struct CatCmd;
impl Command for CatCmd {
    fn name(&self) -> &str {
        "cat"
    }
    fn description(&self) -> &str {
        "Print file contents"
    }
    fn usage(&self) -> &str {
        "cat <file>..."
    }
    fn execute(&self, argv: &[&str], env: &mut Environment<'_>) -> Result<i32> {
        let files = argv.get(1..).unwrap_or_default();
        if files.is_empty() {
            env.console.puts("cat: missing file operand\n\r")?;
            return Ok(1);
        }
        let mut status = 0;
        for &file in files {
            let path = resolve_path(env.cwd, file);
            if !env.vfs.exists(&path) {
                env.console.puts(&format!("cat: {file}: No such file or directory\n\r"))?;
                status = 1;
                continue;
            }
            match env.vfs.read(&path) {
                Ok(data) => write_text(env.console, &data)?,
                Err(e) => {
                    log::debug!("cat {path}: {e}");
                    env.console.puts(&format!("cat: {file}: Is a directory\n\r"))?;
                    status = 1;
                },
            }
        }
        Ok(status)
    }
}

/// Write file contents with `\n` widened to `\n\r`, ending on a fresh line.
fn write_text(console: &mut dyn Console, data: &[u8]) -> Result<()> {
    for chunk in data.split_inclusive(|&b| b == b'\n') {
        console.write_all(chunk)?;
        if chunk.ends_with(b"\n") {
            console.write_all(b"\r")?;
        }
    }
    if !data.is_empty() && !data.ends_with(b"\n") {
        console.puts("\n\r")?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// cd / pwd
// ---------------------------------------------------------------------------

struct CdCmd;
impl Command for CdCmd {
    fn name(&self) -> &str {
        "cd"
    }
    fn description(&self) -> &str {
        "Change working directory"
    }
    fn usage(&self) -> &str {
        "cd [path]"
    }
    fn execute(&self, argv: &[&str], env: &mut Environment<'_>) -> Result<i32> {
        let target = argv.get(1).copied().unwrap_or("/");
        let path = resolve_path(env.cwd, target);
        match env.vfs.stat(&path) {
            Ok(meta) if meta.kind == EntryKind::Directory => {
                *env.cwd = path;
                Ok(0)
            },
            Ok(_) => {
                env.console.puts(&format!("cd: {target}: Not a directory\n\r"))?;
                Ok(1)
            },
            Err(_) => {
                env.console.puts(&format!("cd: {target}: No such file or directory\n\r"))?;
                Ok(1)
            },
        }
    }
}

struct PwdCmd;
impl Command for PwdCmd {
    fn name(&self) -> &str {
        "pwd"
    }
    fn description(&self) -> &str {
        "Print working directory"
    }
    fn usage(&self) -> &str {
        "pwd"
    }
    fn execute(&self, _argv: &[&str], env: &mut Environment<'_>) -> Result<i32> {
        env.console.puts(&format!("{}\n\r", env.cwd))?;
        Ok(0)
    }
}

// ---------------------------------------------------------------------------
// echo
// ---------------------------------------------------------------------------

struct EchoCmd;
impl Command for EchoCmd {
    fn name(&self) -> &str {
        "echo"
    }
    fn description(&self) -> &str {
        "Print arguments"
    }
    fn usage(&self) -> &str {
        "echo [text...]"
    }
    fn execute(&self, argv: &[&str], env: &mut Environment<'_>) -> Result<i32> {
        let text = argv.get(1..).unwrap_or_default().join(" ");
        env.console.puts(&format!("{text}\n\r"))?;
        Ok(0)
    }
}

// ---------------------------------------------------------------------------
// history / clear
// ---------------------------------------------------------------------------

struct HistoryCmd;
impl Command for HistoryCmd {
    fn name(&self) -> &str {
        "history"
    }
    fn description(&self) -> &str {
        "Show command history"
    }
    fn usage(&self) -> &str {
        "history"
    }
    fn execute(&self, _argv: &[&str], env: &mut Environment<'_>) -> Result<i32> {
        if let Some(history) = env.history {
            print_history(env.console, history)?;
        }
        Ok(0)
    }
}

struct ClearCmd;
impl Command for ClearCmd {
    fn name(&self) -> &str {
        "clear"
    }
    fn description(&self) -> &str {
        "Clear the screen"
    }
    fn usage(&self) -> &str {
        "clear"
    }
    fn execute(&self, _argv: &[&str], env: &mut Environment<'_>) -> Result<i32> {
        clear_screen(env.console)?;
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::MemoryConsole;
    use picosh_vfs::{MemoryVfs, Vfs};

    struct Fixture {
        table: CommandTable,
        console: MemoryConsole,
        vfs: MemoryVfs,
        cwd: String,
        history: HistoryRing,
    }

    impl Fixture {
        fn new() -> Self {
            let mut table = CommandTable::new();
            register_builtins(&mut table);
            let mut vfs = MemoryVfs::new();
            vfs.mkdir("/bin").unwrap();
            vfs.mkdir("/home/user").unwrap();
            vfs.write("/motd", b"welcome").unwrap();
            Self {
                table,
                console: MemoryConsole::new(),
                vfs,
                cwd: "/".to_string(),
                history: HistoryRing::new(4, 32),
            }
        }

        fn run(&mut self, argv: &[&str]) -> (i32, String) {
            let cmd = self.table.find(argv[0]).unwrap();
            let mut env = Environment {
                console: &mut self.console,
                vfs: &mut self.vfs,
                cwd: &mut self.cwd,
                history: Some(&self.history),
                commands: &self.table,
            };
            let status = cmd.execute(argv, &mut env).unwrap();
            let out = String::from_utf8(self.console.take_output()).unwrap();
            (status, out)
        }
    }

    #[test]
    fn registers_all_builtins() {
        let f = Fixture::new();
        let names: Vec<&str> = f.table.names().collect();
        assert_eq!(names, vec!["help", "ls", "cat", "cd", "pwd", "echo", "history", "clear"]);
    }

    #[test]
    fn ls_lists_cwd() {
        let mut f = Fixture::new();
        let (status, out) = f.run(&["ls"]);
        assert_eq!(status, 0);
        assert_eq!(out, "bin/  home/  motd  \n\r");
    }

    #[test]
    fn ls_relative_path() {
        let mut f = Fixture::new();
        let (_, out) = f.run(&["ls", "home"]);
        assert_eq!(out, "user/  \n\r");
    }

    #[test]
    fn ls_missing_path() {
        let mut f = Fixture::new();
        let (status, out) = f.run(&["ls", "nope"]);
        assert_eq!(status, 1);
        assert_eq!(out, "ls: cannot access 'nope': No such file or directory\n\r");
    }

    #[test]
    fn ls_too_many_arguments() {
        let mut f = Fixture::new();
        let (status, out) = f.run(&["ls", "a", "b"]);
        assert_eq!(status, 1);
        assert_eq!(out, "ls: too many arguments\n\r");
    }

    #[test]
    fn cat_widens_newlines() {
        let mut f = Fixture::new();
        f.vfs.write("/home/user/notes", b"one\ntwo").unwrap();
        let (status, out) = f.run(&["cat", "/home/user/notes", "motd"]);
        assert_eq!(status, 0);
        assert_eq!(out, "one\n\rtwo\n\rwelcome\n\r");
    }

    #[test]
    fn cat_reports_missing_and_directories() {
        let mut f = Fixture::new();
        let (status, out) = f.run(&["cat", "ghost", "bin", "motd"]);
        assert_eq!(status, 1);
        assert_eq!(
            out,
            "cat: ghost: No such file or directory\n\rcat: bin: Is a directory\n\rwelcome\n\r"
        );
        assert_eq!(f.run(&["cat"]), (1, "cat: missing file operand\n\r".to_string()));
    }

    #[test]
    fn cd_then_pwd() {
        let mut f = Fixture::new();
        assert_eq!(f.run(&["cd", "home/user"]).0, 0);
        assert_eq!(f.run(&["pwd"]).1, "/home/user\n\r");
        assert_eq!(f.run(&["cd", ".."]).0, 0);
        assert_eq!(f.run(&["pwd"]).1, "/home\n\r");
        assert_eq!(f.run(&["cd"]).0, 0);
        assert_eq!(f.cwd, "/");
    }

    #[test]
    fn cd_rejects_files_and_missing_paths() {
        let mut f = Fixture::new();
        let (status, out) = f.run(&["cd", "motd"]);
        assert_eq!(status, 1);
        assert!(out.contains("Not a directory"));
        let (status, out) = f.run(&["cd", "ghost"]);
        assert_eq!(status, 1);
        assert!(out.contains("No such file or directory"));
        assert_eq!(f.cwd, "/");
    }

    #[test]
    fn echo_joins_arguments() {
        let mut f = Fixture::new();
        assert_eq!(f.run(&["echo", "hello", "world"]).1, "hello world\n\r");
        assert_eq!(f.run(&["echo"]).1, "\n\r");
    }

    #[test]
    fn history_numbers_oldest_first() {
        let mut f = Fixture::new();
        f.history.push(b"ls");
        f.history.push(b"pwd");
        assert_eq!(f.run(&["history"]).1, "1 ls\n\r2 pwd\n\r");
    }

    #[test]
    fn help_lists_descriptions() {
        let mut f = Fixture::new();
        let (_, out) = f.run(&["help"]);
        assert!(out.contains("ls [path]"));
        assert!(out.contains("List directory contents"));
        assert_eq!(out.matches("\n\r").count(), f.table.len());
    }

    #[test]
    fn clear_emits_clear_screen() {
        let mut f = Fixture::new();
        assert_eq!(f.run(&["clear"]).1, "\x1b[H\x1b[2J");
    }
}
