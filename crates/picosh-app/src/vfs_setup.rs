use picosh_types::error::Result;
use picosh_vfs::Vfs;

/// Create the demo file tree the shell starts in.
pub fn populate_demo_vfs(vfs: &mut dyn Vfs) -> Result<()> {
    vfs.mkdir("/bin")?;
    vfs.mkdir("/etc")?;
    vfs.mkdir("/tmp")?;
    vfs.mkdir("/home/user")?;

    vfs.write(
        "/home/user/readme.txt",
        b"Welcome to picosh!\nType 'help' for available commands.",
    )?;
    vfs.write("/etc/hostname", b"picosh")?;
    vfs.write("/etc/version", env!("CARGO_PKG_VERSION").as_bytes())?;
    vfs.write(
        "/etc/shell.toml",
        b"prompt = \"picosh> \"\nline_max = 128\nhistory_size = 8\nmax_args = 8\nautocomplete = true\n",
    )?;

    vfs.mkdir("/home/user/scripts")?;
    vfs.write("/home/user/scripts/hello.sh", b"echo Hello from picosh!\npwd\n")?;
    Ok(())
}
