// SPDX-License-Identifier: PMPL-1.0-or-later

//! Bundling commands into an executable shell script

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const SHEBANG: &str = "#!/bin/bash";

pub fn render_script<S: AsRef<str>>(commands: &[S]) -> String {
    let mut content = format!("{}\n\n", SHEBANG);
    for cmd in commands {
        content.push_str(cmd.as_ref());
        content.push('\n');
    }
    content
}

/// Write `commands` to `path` as a bash script and mark it executable.
pub fn create_script<S: AsRef<str>>(commands: &[S], path: &Path) -> Result<PathBuf> {
    fs::write(path, render_script(commands))
        .with_context(|| format!("writing script {}", path.display()))?;
    make_executable(path)?;
    info!(path = %path.display(), commands = commands.len(), "script created");
    Ok(path.to_path_buf())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .with_context(|| format!("setting permissions on {}", path.display()))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_puts_each_command_on_its_own_line() {
        let script = render_script(&["cd /tmp", "ls -la"]);
        assert_eq!(script, "#!/bin/bash\n\ncd /tmp\nls -la\n");
    }

    #[test]
    fn render_empty_script_is_only_header() {
        let script = render_script::<&str>(&[]);
        assert_eq!(script, "#!/bin/bash\n\n");
    }
}
