use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bloom_import_upstream::cli::run_import;
use bloom_import_upstream::config::load_settings;
use bloom_import_upstream::git::Git2Repository;
use bloom_import_upstream::ui;

#[derive(clap::Parser)]
#[command(
    name = "git-bloom-import-upstream",
    version,
    about = "Import a new upstream release into a bloom release repository",
    after_help = "Must be run from inside a valid git bloom release repository."
)]
struct Args {}

/// Diagnostics go to stderr; RUST_LOG overrides the default level
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "bloom_import_upstream=warn".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn main() -> Result<()> {
    let _args = Args::parse();
    init_tracing();

    // Check that the current directory is a serviceable git repository
    let repo = match Git2Repository::open(".") {
        Ok(repo) => repo,
        Err(e) => {
            tracing::debug!(error = %e, "repository discovery failed");
            ui::display_error("Not in a git repository.");
            ui::display_usage();
            std::process::exit(1);
        }
    };

    let settings = match load_settings(None) {
        Ok(settings) => settings,
        Err(e) => {
            ui::display_error(&format!("Error loading settings: {}", e));
            std::process::exit(1);
        }
    };

    let outcome = match run_import(&repo, &settings) {
        Ok(outcome) => outcome,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    ui::display_success(&format!(
        "Imported {} {} from {}",
        outcome.manifest.name, outcome.manifest.version, outcome.tarball
    ));
    if let Some(dir) = &outcome.scratch_dir {
        ui::display_status(&format!("Upstream checkout kept at {}", dir.display()));
    }
    println!("I'm happy.  You should be too.");

    Ok(())
}
