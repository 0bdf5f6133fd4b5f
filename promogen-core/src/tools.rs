//! External command-line tools (git, gh).
//!
//! Bundled or launcher-started builds often get a minimal `PATH`, so tool
//! lookup also searches the usual package-manager install locations.

use std::ffi::OsString;
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command as TokioCommand;
use tokio::time::timeout;
use tracing::debug;

use crate::error::{PromoError, PromoResult};

/// Push and `gh` network calls can be slow, but never this slow.
const TOOL_TIMEOUT: Duration = Duration::from_secs(120);

const EXTRA_PATH_DIRS: &[&str] = &[
    "/opt/homebrew/bin",
    "/usr/local/bin",
    "/opt/local/bin",
    "/usr/bin",
    "/bin",
];

/// Home-relative install locations (cargo, pipx, etc).
const EXTRA_HOME_DIRS: &[&str] = &[".cargo/bin", ".local/bin"];

/// `PATH` plus the common install locations, without duplicates.
pub fn augmented_path() -> OsString {
    let current = std::env::var_os("PATH").unwrap_or_default();
    augment_path(&current, dirs::home_dir().as_deref())
}

fn augment_path(current: &OsString, home: Option<&Path>) -> OsString {
    // an empty entry means the current directory
    let mut paths: Vec<PathBuf> = std::env::split_paths(current)
        .filter(|p| !p.as_os_str().is_empty())
        .collect();

    let extras = EXTRA_PATH_DIRS.iter().map(PathBuf::from).chain(
        home.into_iter()
            .flat_map(|home| EXTRA_HOME_DIRS.iter().map(move |d| home.join(d))),
    );

    for dir in extras {
        if !paths.contains(&dir) {
            paths.push(dir);
        }
    }

    std::env::join_paths(paths).unwrap_or_else(|_| current.clone())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Git,
    Gh,
}

impl Tool {
    pub fn binary_name(&self) -> &'static str {
        match self {
            Tool::Git => "git",
            Tool::Gh => "gh",
        }
    }

    pub fn locate(&self) -> PromoResult<PathBuf> {
        let cwd = std::env::current_dir()?;
        which::which_in(self.binary_name(), Some(augmented_path()), cwd)
            .map_err(|_| PromoError::MissingTool(self.binary_name().to_string()))
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.binary_name())
    }
}

/// Captured result of a successful tool run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Runs external tools. A non-zero exit is an `ExternalTool` error.
pub trait ToolRunner {
    fn run(
        &self,
        tool: Tool,
        args: &[&str],
        cwd: &Path,
    ) -> impl Future<Output = PromoResult<ToolOutput>> + Send;
}

/// Spawns real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    async fn run(&self, tool: Tool, args: &[&str], cwd: &Path) -> PromoResult<ToolOutput> {
        let binary_path = tool.locate()?;
        let command = render_command(tool, args);
        debug!(%command, cwd = %cwd.display(), "running");

        let child = TokioCommand::new(&binary_path)
            .args(args)
            .current_dir(cwd)
            .env("PATH", augmented_path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let output = timeout(TOOL_TIMEOUT, child.wait_with_output())
            .await
            .map_err(|_| PromoError::ToolTimeout {
                command: command.clone(),
                secs: TOOL_TIMEOUT.as_secs(),
            })??;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(PromoError::ExternalTool {
                command,
                code: output.status.code(),
                stdout,
                stderr,
            });
        }

        Ok(ToolOutput { stdout, stderr })
    }
}

/// `git push -u origin events/x`, quoting arguments that contain spaces.
pub fn render_command(tool: Tool, args: &[&str]) -> String {
    let mut parts = vec![tool.binary_name().to_string()];
    parts.extend(args.iter().map(|arg| {
        if arg.is_empty() || arg.contains(char::is_whitespace) {
            format!("{arg:?}")
        } else {
            arg.to_string()
        }
    }));
    parts.join(" ")
}
