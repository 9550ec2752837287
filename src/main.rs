//! PESU Downloader - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use pesu_downloader::{
    cli::Args,
    config::{validate_config, OutputMode},
    download::{download_folder_tree, download_unit_pdfs, DownloadState},
    error::{exit_codes, Result},
    output::{
        create_spinner, print_banner, print_config_summary, print_error, print_info,
        print_run_stats, print_success, print_warning,
    },
    portal::PortalClient,
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            if e.is_not_found() {
                ExitCode::from(exit_codes::NO_MATERIALS as u8)
            } else {
                ExitCode::from(exit_codes::FAILURE as u8)
            }
        }
    }
}

async fn run() -> Result<()> {
    // Pick up a .env file before credentials are read from the environment
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    // Print banner
    print_banner();

    // Build and validate configuration
    let config = args.into_config()?;
    validate_config(&config)?;

    // Print configuration summary
    print_config_summary(
        &config.options.course,
        config.options.semester,
        config.options.mode,
        config.options.material_kind,
        config.options.output.as_deref(),
    );

    // Log in to the portal
    print_info("Connecting to PESU Academy...");
    let client = PortalClient::new()?;
    client.login(&config.credentials).await?;
    print_success(&format!("Logged in as {}", config.credentials.username));

    // Locate the course
    let course = client
        .find_course(&config.options.course, config.options.semester)
        .await?;
    print_info(&format!("Found course: {} ({})", course.title, course.code));

    // Fetch the unit/topic/material tree
    let spinner = create_spinner("Fetching course contents...");
    let content = client
        .fetch_course_content(&course, config.options.material_kind)
        .await;
    spinner.finish_and_clear();
    let content = content?;
    print_info(&format!("{} unit(s) listed", content.units.len()));

    // Download per the selected mode
    let mut state = DownloadState::new(course.title.clone());
    match config.options.mode {
        OutputMode::Folder => download_folder_tree(&client, &config, &content, &mut state).await?,
        OutputMode::SinglePdf => download_unit_pdfs(&client, &config, &content, &mut state).await?,
    }

    // Print statistics
    print_run_stats(&state, config.options.mode);

    if state.failed > 0 {
        print_warning(&format!(
            "{} download(s) failed, see the log above",
            state.failed
        ));
    }

    Ok(())
}
