//! End-to-end sessions driven byte by byte through a scripted console.

use picosh_shell::{CommandTable, MemoryConsole, Session, register_builtins};
use picosh_types::config::ShellConfig;
use picosh_vfs::{MemoryVfs, Vfs};

fn shell(input: &[u8], history_size: usize) -> Session<MemoryConsole> {
    let mut table = CommandTable::new();
    register_builtins(&mut table);
    let mut vfs = MemoryVfs::new();
    vfs.mkdir("/bin").unwrap();
    vfs.write("/readme", b"hi").unwrap();
    let config = ShellConfig {
        prompt: "$ ".into(),
        history_size,
        ..ShellConfig::default()
    };
    Session::new(MemoryConsole::with_input(input), &config, table)
        .unwrap()
        .with_vfs(Box::new(vfs))
}

/// Run listen/execute until the script is used up.
fn drive(session: &mut Session<MemoryConsole>) -> Vec<String> {
    let mut lines = Vec::new();
    while let Ok(line) = session.listen() {
        session.execute(&line).unwrap();
        lines.push(String::from_utf8(line).unwrap());
    }
    lines
}

#[test]
fn ls_through_the_console() {
    let mut s = shell(b"ls\r", 4);
    assert_eq!(drive(&mut s), vec!["ls"]);
    assert!(s.console().output_str().contains("bin/  readme  \n\r"));
}

#[test]
fn unknown_command_is_reported_and_session_continues() {
    let mut s = shell(b"frobnicate now\rpwd\r", 4);
    assert_eq!(drive(&mut s), vec!["frobnicate now", "pwd"]);
    let out = s.console().output_str();
    assert!(out.contains("unknown command: frobnicate\n\r"));
    assert!(out.contains("/\n\r"));
}

#[test]
fn ls_missing_directory_message() {
    let mut s = shell(b"ls /nowhere\r", 4);
    drive(&mut s);
    assert!(
        s.console()
            .output_str()
            .contains("ls: cannot access '/nowhere': No such file or directory")
    );
}

#[test]
fn tab_completion_with_escape_sequences() {
    // "h" Tab -> "help"; Tab -> "history"; Tab -> "h"; Tab -> "help"; Enter.
    let mut s = shell(b"h\t\t\t\t\r", 4);
    assert_eq!(drive(&mut s), vec!["help"]);
}

#[test]
fn tab_then_arguments() {
    let mut s = shell(b"ec\t hello\r", 4);
    assert_eq!(drive(&mut s), vec!["echo hello"]);
    assert!(s.console().output_str().contains("hello\n\r"));
}

#[test]
fn arrow_up_recalls_previous_line() {
    let mut s = shell(b"echo one\recho two\r\x1b[A\x1b[A\r", 4);
    assert_eq!(drive(&mut s), vec!["echo one", "echo two", "echo one"]);
}

#[test]
fn arrow_up_past_oldest_restores_draft() {
    let mut s = shell(b"pwd\rdraft\x1b[A\x1b[A\r", 4);
    assert_eq!(drive(&mut s), vec!["pwd", "draft"]);
}

#[test]
fn history_is_bounded() {
    let mut s = shell(b"echo 1\recho 2\recho 3\rhistory\r", 2);
    drive(&mut s);
    let h = s.history().unwrap();
    assert_eq!(h.len(), 2);
    assert_eq!(h.entry(0).unwrap(), b"history");
    assert_eq!(h.entry(1).unwrap(), b"echo 3");
    assert!(s.console().output_str().contains("1 echo 3\n\r2 history\n\r"));
}

#[test]
fn mid_line_edit_with_vt100_keys() {
    // Type "eco hi", Home, Right x2, insert 'h', End, Enter -> "echo hi".
    let mut s = shell(b"eco hi\x1b[1~\x1b[C\x1b[Ch\x1b[4~\r", 4);
    assert_eq!(drive(&mut s), vec!["echo hi"]);
}

#[test]
fn delete_key_removes_under_cursor() {
    let mut s = shell(b"pwdx\x1b[D\x1b[3~\r", 4);
    assert_eq!(drive(&mut s), vec!["pwd"]);
}

#[test]
fn ctrl_c_discards_line() {
    let mut s = shell(b"garbage\x03pwd\r", 4);
    assert_eq!(drive(&mut s), vec!["pwd"]);
    assert!(s.console().output_str().contains("^C\n\r$ "));
}

#[test]
fn ctrl_u_then_retype() {
    let mut s = shell(b"oops\x15cd bin\rpwd\r", 4);
    assert_eq!(drive(&mut s), vec!["cd bin", "pwd"]);
    assert_eq!(s.cwd(), "/bin");
}

#[test]
fn empty_lines_are_not_submitted() {
    let mut s = shell(b"\r\r\rpwd\r", 4);
    assert_eq!(drive(&mut s), vec!["pwd"]);
    assert_eq!(s.history().unwrap().len(), 1);
}

#[test]
fn blank_line_reports_empty_command() {
    let mut s = shell(b"   \r", 4);
    assert_eq!(drive(&mut s), vec!["   "]);
    assert!(s.console().output_str().contains("unknown command: \n\r"));
}

#[test]
fn tab_up_tab_completes_the_recalled_line() {
    // "ec" Tab -> "echo"; Up recalls "pw"; Tab completes it to "pwd".
    let mut s = shell(b"pw\rec\t\x1b[A\t\r", 4);
    assert_eq!(drive(&mut s), vec!["pw", "pwd"]);
}

#[test]
fn cat_prints_file_through_the_console() {
    let mut s = shell(b"cat readme\r", 4);
    drive(&mut s);
    assert!(s.console().output_str().contains("hi\n\r"));
}
