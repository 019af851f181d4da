use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use git_release_state::cli::{run_resolve, ResolveArgs};
use git_release_state::diagnostics::LogSink;
use git_release_state::ui::{self, OutputFormat};

#[derive(clap::Parser)]
#[command(
    name = "git-release-state",
    version,
    about = "Resolve the branch, last version tag and unreleased commits of a git repository"
)]
struct Args {
    #[arg(
        short,
        long,
        env = "GIT_RELEASE_STATE_REPOSITORY",
        default_value = ".",
        help = "Path to the repository"
    )]
    repository: PathBuf,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "Collect commits since this hash instead of the last version tag")]
    since: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, help = "Output format")]
    format: OutputFormat,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity (-v debug, -vv trace)")]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let resolve_args = ResolveArgs {
        repository: args.repository,
        config_path: args.config,
        since: args.since,
    };

    let state = match run_resolve(&resolve_args, &mut LogSink) {
        Ok(state) => state,
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    ui::display_state(&state, args.format)
}
