//! Running git commands.

use std::process::Command;

use anyhow::Context;

use super::GitInvocation;

/// Variables inherited from a surrounding git hook or alias that would
/// redirect the child git to another repository.
const GIT_ENV_OVERRIDES: [&str; 4] = [
    "GIT_DIR",
    "GIT_WORK_TREE",
    "GIT_INDEX_FILE",
    "GIT_COMMON_DIR",
];

/// Result of a finished git command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitOutput {
    pub success: bool,
    pub code: Option<i32>,
    /// All of stdout, then all of stderr. The two streams are captured
    /// separately, so lines are not interleaved in the order git wrote them.
    pub output: String,
}

/// Executes git commands on behalf of the reconciler.
pub trait GitExecutor {
    /// Run the command to completion.
    ///
    /// `Err` means the command could not be started; a command that ran and
    /// failed is reported through [`GitOutput::success`].
    fn execute(&self, invocation: &GitInvocation) -> anyhow::Result<GitOutput>;
}

/// Runs the `git` found on `PATH`, capturing stdout and stderr into
/// [`GitOutput::output`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemGit;

impl GitExecutor for SystemGit {
    fn execute(&self, invocation: &GitInvocation) -> anyhow::Result<GitOutput> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);
        for key in GIT_ENV_OVERRIDES {
            cmd.env_remove(key);
        }
        if let Some(dir) = &invocation.cwd {
            cmd.current_dir(dir);
        }

        let output = cmd
            .output()
            .with_context(|| format!("Failed to run {}", invocation))?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(GitOutput {
            success: output.status.success(),
            code: output.status.code(),
            output: combined,
        })
    }
}
