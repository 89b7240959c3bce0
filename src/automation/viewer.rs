use anyhow::{anyhow, Context, Result};
use std::path::Path;
use std::process::Command;

/// Opens `path` with the desktop's default application (the image viewer
/// for screenshots). Returns once the launcher has been started.
pub fn open_with_default_app(path: &Path) -> Result<()> {
    let status = launcher(path)
        .status()
        .with_context(|| format!("Failed to launch viewer for {}", path.display()))?;

    if !status.success() {
        return Err(anyhow!(
            "Viewer launcher exited with {} for {}",
            status,
            path.display()
        ));
    }
    Ok(())
}

fn launcher(path: &Path) -> Command {
    if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        // The empty argument is the window title expected by `start`
        cmd.args(["/C", "start", ""]).arg(path);
        cmd
    } else if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}
