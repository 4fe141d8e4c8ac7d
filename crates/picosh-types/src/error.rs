//! Error types for picosh.

use std::io;

/// Errors produced by picosh.
#[derive(Debug, thiserror::Error)]
pub enum PicoshError {
    #[error("config error: {0}")]
    Config(String),

    #[error("command error: {0}")]
    Command(String),

    #[error("VFS error: {0}")]
    Vfs(String),

    #[error("console error: {0}")]
    Console(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, PicoshError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let e = PicoshError::Config("line_max too small".into());
        assert_eq!(format!("{e}"), "config error: line_max too small");
    }

    #[test]
    fn command_error_display() {
        let e = PicoshError::Command("bad argument".into());
        assert_eq!(format!("{e}"), "command error: bad argument");
    }

    #[test]
    fn vfs_error_display() {
        let e = PicoshError::Vfs("not found: /tmp".into());
        assert_eq!(format!("{e}"), "VFS error: not found: /tmp");
    }

    #[test]
    fn console_error_display() {
        let e = PicoshError::Console("console closed".into());
        assert_eq!(format!("{e}"), "console error: console closed");
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "pipe gone");
        let e: PicoshError = io_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("pipe gone"));
    }

    #[test]
    fn toml_error_from_conversion() {
        let toml_err = toml::from_str::<toml::Value>("prompt = [[[").unwrap_err();
        let e: PicoshError = toml_err.into();
        assert!(format!("{e}").contains("TOML parse error"));
    }

    #[test]
    fn error_is_debug() {
        let e = PicoshError::Console("x".into());
        assert!(format!("{e:?}").contains("Console"));
    }
}
