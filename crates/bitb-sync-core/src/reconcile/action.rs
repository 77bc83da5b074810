//! Per-repository clone or pull decision and the git command it maps to.

use std::fmt;
use std::path::{Path, PathBuf};

/// Program name of the git executable.
pub const GIT: &str = "git";

/// What reconciliation does for one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// `<projectDir>/<name>` is absent.
    Clone { url: String, dest: PathBuf },
    /// `<projectDir>/<name>` exists. It is assumed to be a clone made under
    /// the default name; neither the repository nor its remote is checked.
    Pull { repo_dir: PathBuf },
}

impl SyncAction {
    /// Decide between clone and pull from what is on disk.
    pub fn plan(project_dir: &Path, name: &str, url: &str) -> Self {
        let dest = project_dir.join(name);
        if matches!(dest.try_exists(), Ok(false)) {
            Self::Clone {
                url: url.to_string(),
                dest,
            }
        } else {
            Self::Pull { repo_dir: dest }
        }
    }

    /// The git command carrying out this action.
    pub fn invocation(&self) -> anyhow::Result<GitInvocation> {
        match self {
            Self::Clone { url, dest } => Ok(GitInvocation::new(
                ["clone", url.as_str(), path_arg(dest)?],
                None,
            )),
            Self::Pull { repo_dir } => {
                let git_dir = repo_dir.join(".git");
                Ok(GitInvocation::new(
                    ["--git-dir", path_arg(&git_dir)?, "pull", "--rebase", "--prune"],
                    Some(repo_dir.clone()),
                ))
            }
        }
    }

    pub fn is_clone(&self) -> bool {
        matches!(self, Self::Clone { .. })
    }
}

fn path_arg(path: &Path) -> anyhow::Result<&str> {
    path.to_str()
        .ok_or_else(|| anyhow::anyhow!("Path is not valid UTF-8: {}", path.display()))
}

/// A single external command: program, arguments and working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitInvocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl GitInvocation {
    pub fn new<'a>(args: impl IntoIterator<Item = &'a str>, cwd: Option<PathBuf>) -> Self {
        Self {
            program: GIT.to_string(),
            args: args.into_iter().map(String::from).collect(),
            cwd,
        }
    }

    /// Program followed by its arguments.
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

impl fmt::Display for GitInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv().join(" "))
    }
}
