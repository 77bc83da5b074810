//! bitb-project-sync - keep a directory of checkouts in step with a
//! Bitbucket project
//!
//! Usage:
//!   bitb-project-sync --project-url https://host/rest/api/1.0/projects/PRJ/repos --token-file ~/.bitb-token
//!   bitb-project-sync --from-file repos.json --project-dir ~/src/prj --dry-run

use std::path::PathBuf;
use std::process::exit;

use anyhow::{Context, Result};
use clap::builder::{OsStringValueParser, TypedValueParser};
use clap::{CommandFactory, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

use bitb_sync_core::collect::EligibilityPolicy;
use bitb_sync_core::commands::{SyncCommand, SyncOptions};
use bitb_sync_core::source::PayloadSource;

#[derive(Parser, Debug)]
#[command(name = "bitb-project-sync")]
#[command(
    about = "Clone missing and pull existing repositories of a Bitbucket project",
    long_about = None
)]
struct Cli {
    /// A json document matching the repos Bitbucket REST api, incompatible with --project-url
    #[arg(long, value_name = "PATH", value_parser = path_parser())]
    from_file: Option<PathBuf>,

    /// The bitbucket url, incompatible with --from-file
    #[arg(long, value_name = "URL")]
    project_url: Option<String>,

    /// The path of the token file, only used when an HTTP request is made
    #[arg(long, env = "BITB_TOKEN_FILE", value_name = "PATH", value_parser = path_parser())]
    token_file: Option<PathBuf>,

    /// The path of the project directory [default: current working directory]
    #[arg(long, env = "BITB_PROJECT_DIR", value_name = "PATH", value_parser = path_parser())]
    project_dir: Option<PathBuf>,

    /// Log verbosely
    #[arg(long)]
    verbose: bool,

    /// Log the git commands instead of running them
    #[arg(long)]
    dry_run: bool,

    /// Keep going past repositories that are not AVAILABLE git repositories
    /// instead of stopping at the first one
    #[arg(long)]
    skip_ineligible: bool,

    /// Unused; echoed back on usage errors
    #[arg(hide = true)]
    args: Vec<String>,
}

/// Paths that may be given empty, which then count as not given.
fn path_parser() -> impl TypedValueParser<Value = PathBuf> {
    OsStringValueParser::new().map(PathBuf::from)
}

/// Exit status when neither or both listing sources are given.
const USAGE_EXIT_CODE: i32 = 1;

impl Cli {
    /// Exactly one of `--from-file` and `--project-url` selects the listing.
    /// An empty value counts as not given.
    fn payload_source(&self) -> Result<Option<PayloadSource>> {
        let from_file = self.from_file.as_ref().filter(|p| !p.as_os_str().is_empty());
        let project_url = self.project_url.as_deref().filter(|u| !u.is_empty());

        match (from_file, project_url) {
            (Some(path), None) => Ok(Some(PayloadSource::file(path))),
            (None, Some(url)) => {
                let url = Url::parse(url)
                    .with_context(|| format!("Invalid project url {}", url))?;
                let token_file = self.token_file.clone().filter(|p| !p.as_os_str().is_empty());
                Ok(Some(PayloadSource::http(url, token_file)))
            }
            _ => Ok(None),
        }
    }

    fn project_dir(&self) -> Option<&PathBuf> {
        self.project_dir.as_ref().filter(|d| !d.as_os_str().is_empty())
    }

    /// Leftover positional args, then the help text.
    fn usage(&self) -> String {
        format!("{:?}\n{}", self.args, Cli::command().render_help())
    }

    fn eligibility(&self) -> EligibilityPolicy {
        if self.skip_ineligible {
            EligibilityPolicy::SkipIneligible
        } else {
            EligibilityPolicy::StopAtFirstIneligible
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let Some(source) = cli.payload_source()? else {
        eprintln!("{}", cli.usage());
        exit(USAGE_EXIT_CODE);
    };

    let options = match cli.project_dir() {
        Some(dir) => SyncOptions::with_project_dir(source, dir),
        None => SyncOptions::new(source)?,
    }
    .with_dry_run(cli.dry_run)
    .with_eligibility(cli.eligibility());
    tracing::debug!("{:?}", options);

    SyncCommand::new().execute(&options)?;

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "bitb_sync_core=debug,bitb_project_sync=debug,info"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
