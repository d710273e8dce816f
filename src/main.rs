use anyhow::Result;
use clap::Parser;

use release_prep::config;
use release_prep::git::Git2Repository;
use release_prep::github::GithubClient;
use release_prep::ui::{self, ConsolePrompter};
use release_prep::workflow;

#[derive(clap::Parser)]
#[command(
    name = "release-prep",
    about = "Cut a release branch from a closed milestone and open the follow-up pull requests"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Repository slug (owner/name), overrides the configured one")]
    repository: Option<String>,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("release-prep {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Load configuration
    let mut config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(repository) = args.repository {
        config.repository = repository;
    }
    if config.repository.is_empty() {
        ui::display_error(
            "No repository configured. Set 'repository' in releaseprep.toml or pass --repository",
        );
        std::process::exit(1);
    }

    // A missing token is a warning only; later API calls run unauthenticated
    let token = config::github_token();
    if token.is_none() {
        ui::display_warning(
            "Please, provide a read-only token to access GitHub using environment variable 'GITHUB_TOKEN'",
        );
    }

    let repo = match Git2Repository::open(".") {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    let api = match GithubClient::new(config.repository.as_str(), token) {
        Ok(api) => api,
        Err(e) => {
            ui::display_error(&format!("Hosting API client error: {}", e));
            std::process::exit(1);
        }
    };

    let mut prompter = ConsolePrompter;

    let outcome = workflow::run_release(&config, &repo, &api, &mut prompter)?;
    std::process::exit(outcome.exit_code());
}
