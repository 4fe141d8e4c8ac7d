//! One interactive shell bound to one console.
//!
//! [`Session::listen`] reads keys until the user submits a non-empty line,
//! [`Session::execute`] dispatches it. Every key is handled to completion,
//! render included, before the next byte is read.

use picosh_types::config::ShellConfig;
use picosh_types::error::Result;
use picosh_types::input::Key;
use picosh_vfs::{MemoryVfs, Vfs};

use crate::builtins;
use crate::command::{CommandTable, Environment, split_args};
use crate::complete::Autocomplete;
use crate::console::{Console, clear_screen};
use crate::history::HistoryRing;
use crate::keys::read_key;
use crate::line::LineBuffer;

/// Line-editing shell session.
pub struct Session<C: Console> {
    console: C,
    prompt: String,
    line: LineBuffer,
    history: Option<HistoryRing>,
    autocomplete: Option<Autocomplete>,
    /// `None` in a minimal session: lines are edited but never dispatched.
    commands: Option<CommandTable>,
    max_args: usize,
    vfs: Box<dyn Vfs>,
    cwd: String,
}

impl<C: Console> Session<C> {
    /// Full-featured session as described by `config`.
    pub fn new(console: C, config: &ShellConfig, commands: CommandTable) -> Result<Self> {
        config.validate()?;
        let mut session = Self {
            console,
            prompt: String::new(),
            line: LineBuffer::new(config.line_max),
            history: config
                .history_enabled()
                .then(|| HistoryRing::new(config.history_size, config.line_max)),
            autocomplete: config.autocomplete.then(Autocomplete::new),
            commands: Some(commands),
            max_args: config.max_args,
            vfs: Box::new(MemoryVfs::new()),
            cwd: "/".to_string(),
        };
        session.set_prompt(&config.prompt);
        log::info!(
            "Session ready (line_max {}, history {}, autocomplete {})",
            config.line_max,
            config.history_size,
            config.autocomplete
        );
        Ok(session)
    }

    /// Session without history, completion, or command dispatch.
    pub fn minimal(console: C) -> Self {
        let config = ShellConfig::minimal();
        Self {
            console,
            prompt: String::new(),
            line: LineBuffer::new(config.line_max),
            history: None,
            autocomplete: None,
            commands: None,
            max_args: config.max_args,
            vfs: Box::new(MemoryVfs::new()),
            cwd: "/".to_string(),
        }
    }

    /// Replace the file tree commands operate on.
    pub fn with_vfs(mut self, vfs: Box<dyn Vfs>) -> Self {
        self.vfs = vfs;
        self
    }

    /// Set the prompt, truncated to the line capacity.
    pub fn set_prompt(&mut self, prompt: &str) {
        let mut end = prompt.len().min(self.line.limit());
        while !prompt.is_char_boundary(end) {
            end -= 1;
        }
        self.prompt = prompt[..end].to_string();
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// The line being edited.
    pub fn line(&self) -> &LineBuffer {
        &self.line
    }

    pub fn cursor_pos(&self) -> usize {
        self.line.cursor()
    }

    pub fn history(&self) -> Option<&HistoryRing> {
        self.history.as_ref()
    }

    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    pub fn into_console(self) -> C {
        self.console
    }

    /// Print the prompt and edit a line until it is submitted.
    ///
    /// The returned line is non-empty, holds exactly the bytes typed, is
    /// already recorded in history, and the edit buffer is empty again.
    pub fn listen(&mut self) -> Result<Vec<u8>> {
        self.console.puts(&self.prompt)?;
        loop {
            let key = read_key(&mut self.console)?;
            if let Some(line) = self.handle_key(key)? {
                return Ok(line);
            }
        }
    }

    /// Listen and execute lines until the console fails.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let line = self.listen()?;
            self.execute(&line)?;
        }
    }

    /// Apply one decoded key. Returns the finalized line on Enter.
    pub fn handle_key(&mut self, key: Key) -> Result<Option<Vec<u8>>> {
        log::debug!("key {key:?}");
        match key {
            Key::Char(c) => {
                if !self.line.is_full() {
                    self.cancel_recall();
                    self.line.insert(c);
                    self.render()?;
                }
            },
            Key::Home => {
                self.line.set_cursor(0);
                self.render()?;
            },
            Key::End => {
                if !self.line.is_empty() {
                    self.line.set_cursor(self.line.len());
                    self.render()?;
                }
            },
            Key::Left => {
                if self.line.move_cursor(-1) {
                    self.render()?;
                }
            },
            Key::Right => {
                if self.line.move_cursor(1) {
                    self.render()?;
                }
            },
            Key::Up => {
                if let Some(history) = self.history.as_mut()
                    && history.navigate_back(&mut self.line)
                {
                    self.end_completion();
                    self.render()?;
                }
            },
            Key::Down => {
                if let Some(history) = self.history.as_mut()
                    && history.navigate_forward(&mut self.line)
                {
                    self.end_completion();
                    self.render()?;
                }
            },
            Key::Backspace => {
                if self.line.cursor() > 0 {
                    self.cancel_recall();
                    self.line.remove_at(self.line.cursor());
                    self.render()?;
                }
            },
            Key::Delete => {
                if self.line.cursor() < self.line.len() {
                    self.cancel_recall();
                    self.line.remove_at(self.line.cursor() + 1);
                    self.render()?;
                }
            },
            Key::Tab => self.complete()?,
            Key::ClearLine => {
                self.cancel_recall();
                self.line.reset();
                self.render()?;
            },
            Key::Interrupt => {
                self.cancel_recall();
                self.console.puts("^C\n\r")?;
                self.console.puts(&self.prompt)?;
                self.line.reset();
            },
            Key::Enter => {
                self.cancel_recall();
                self.console.puts("\n\r")?;
                if self.line.is_empty() {
                    self.console.puts(&self.prompt)?;
                    return Ok(None);
                }
                let submitted = self.line.as_bytes().to_vec();
                if let Some(history) = self.history.as_mut() {
                    history.push(self.line.as_bytes());
                }
                self.line.reset();
                return Ok(Some(submitted));
            },
            Key::Ignored => {},
        }
        Ok(None)
    }

    /// Run a submitted line against the command table.
    ///
    /// Returns the command's exit status, or `None` when nothing ran
    /// (unknown command or a minimal session). A blank line has an empty
    /// command name and is reported like any other unknown command.
    pub fn execute(&mut self, line: &[u8]) -> Result<Option<i32>> {
        let Some(commands) = self.commands.as_ref() else {
            return Ok(None);
        };
        let args = split_args(line, self.max_args);
        let raw_name = args.first().copied().unwrap_or_default();

        let Some(cmd) = std::str::from_utf8(raw_name)
            .ok()
            .and_then(|name| commands.find(name))
        else {
            log::info!("unknown command: {}", String::from_utf8_lossy(raw_name));
            self.console.puts("unknown command: ")?;
            self.console.write_all(raw_name)?;
            self.console.puts("\n\r")?;
            self.line.reset();
            return Ok(None);
        };
        let name = cmd.name();

        let Ok(argv) = args
            .iter()
            .map(|a| std::str::from_utf8(a))
            .collect::<std::result::Result<Vec<&str>, _>>()
        else {
            log::warn!("{name}: argument is not UTF-8");
            self.console.puts(&format!("{name}: invalid UTF-8 in arguments\n\r"))?;
            self.line.reset();
            return Ok(Some(1));
        };

        log::info!("dispatch {name} (argc {})", argv.len());
        let mut env = Environment {
            console: &mut self.console,
            vfs: &mut *self.vfs,
            cwd: &mut self.cwd,
            history: self.history.as_ref(),
            commands,
        };
        let status = match cmd.execute(&argv, &mut env) {
            Ok(status) => status,
            Err(e) => {
                log::warn!("{name} failed: {e}");
                env.console.puts(&format!("{name}: {e}\n\r"))?;
                1
            },
        };
        if status != 0 {
            log::debug!("{name} exited with status {status}");
        }
        self.line.reset();
        Ok(Some(status))
    }

    /// Print the history oldest first, numbered from 1.
    pub fn print_history(&mut self) -> Result<()> {
        match self.history.as_ref() {
            Some(history) => builtins::print_history(&mut self.console, history),
            None => Ok(()),
        }
    }

    /// Clear the screen and home the cursor.
    pub fn cls(&mut self) -> Result<()> {
        clear_screen(&mut self.console)
    }

    fn complete(&mut self) -> Result<()> {
        let Some(autocomplete) = self.autocomplete.as_mut() else {
            return Ok(());
        };
        if let Some(history) = self.history.as_mut() {
            history.cancel_navigation();
        }
        let names = self.commands.iter().flat_map(|t| t.names());
        if autocomplete.trigger(&mut self.line, names) {
            self.render()?;
        }
        Ok(())
    }

    /// Leave history recall and completion, keeping the buffer.
    fn cancel_recall(&mut self) {
        self.end_completion();
        if let Some(history) = self.history.as_mut() {
            history.cancel_navigation();
        }
    }

    fn end_completion(&mut self) {
        if let Some(autocomplete) = self.autocomplete.as_mut() {
            autocomplete.reset();
        }
    }

    fn render(&mut self) -> Result<()> {
        let out = self.line.render(&self.prompt);
        self.console.write_all(&out)
    }
}
