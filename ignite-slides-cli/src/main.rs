//! ignite-slides CLI
//!
//! Command-line interface for bulk-downloading Microsoft Ignite 2025
//! slide decks.

use std::path::PathBuf;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use ignite_slides_lib::{CatalogueClient, RunCounters, RunEvent, RunOptions, run};

#[derive(Parser)]
#[command(name = "ignite-slides")]
#[command(about = "Download Microsoft Ignite 2025 slide decks", long_about = None)]
struct Cli {
    /// Cap on simultaneous downloads
    #[arg(long, default_value_t = 10)]
    max_concurrency: usize,

    /// Directory downloaded decks are written into
    #[arg(long, default_value = "ignite_2025_slides")]
    destination_path: PathBuf,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let options = RunOptions {
        destination: cli.destination_path,
        max_concurrency: cli.max_concurrency,
    };

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    let exit_code = rt.block_on(run_cli(options));
    std::process::exit(exit_code);
}

async fn run_cli(options: RunOptions) -> i32 {
    let client = match CatalogueClient::new() {
        Ok(c) => c,
        Err(e) => {
            eprintln!(
                "{} Failed to build HTTP client: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                e,
            );
            return 1;
        }
    };

    let (events, mut rx) = tokio::sync::mpsc::unbounded_channel();

    // Print events as they arrive; the channel closes when the run is done.
    let printer = tokio::spawn(async move {
        let mut spinner: Option<ProgressBar> = None;
        while let Some(event) = rx.recv().await {
            match event {
                RunEvent::Fetching => {
                    println!("Fetching session catalogue...");
                    let pb = ProgressBar::new_spinner();
                    pb.set_style(
                        ProgressStyle::with_template("  {spinner:.cyan} {msg}")
                            .unwrap()
                            .tick_chars("/-\\|"),
                    );
                    pb.set_message("Contacting api-v2.ignite.microsoft.com...");
                    pb.enable_steady_tick(std::time::Duration::from_millis(100));
                    spinner = Some(pb);
                }
                RunEvent::FetchComplete { total } => {
                    if let Some(pb) = spinner.take() {
                        pb.finish_and_clear();
                    }
                    println!("Found {} sessions total", total);
                    println!();
                }
                RunEvent::DownloadStarted { code, title } => {
                    println!("Downloading {} - {}", code, title);
                }
                RunEvent::DownloadFailed { code, reason } => {
                    println!(
                        "{} {}",
                        "Failed to download".if_supports_color(Stdout, |t| t.red()),
                        format!("{}: {}", code, reason),
                    );
                }
                RunEvent::Progress { processed, total } => {
                    println!("Progress: {}/{} sessions processed", processed, total);
                }
                RunEvent::Done => {}
            }
        }
        if let Some(pb) = spinner.take() {
            pb.finish_and_clear();
        }
    });

    let result = run(client, &options, events).await;
    let _ = printer.await;

    match result {
        Ok(counters) => {
            print_summary(&counters);
            0
        }
        Err(e) => {
            eprintln!(
                "{} Failed to fetch session catalogue: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                e,
            );
            1
        }
    }
}

/// Print the final tally, bounded by separator lines.
fn print_summary(counters: &RunCounters) {
    let separator = "=".repeat(50);
    println!();
    println!("{}", separator);
    println!("{}", "Summary:".if_supports_color(Stdout, |t| t.bold()));
    println!("Downloaded: {}", counters.downloaded);
    println!("Skipped (no deck): {}", counters.no_deck);
    println!("Skipped (already existed): {}", counters.existing);
    println!("Failed: {}", counters.failed);
    println!("{}", separator);
}
