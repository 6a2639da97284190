use std::{path::PathBuf, thread};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use cliclack::{intro, note, outro, progress_bar, spinner};
use weather_seed::{
    oracle,
    search::{search, CancelToken, SearchRequest, SearchRequestConfig},
    sink::{ChannelSink, Event},
};

/// Stardew Valley weather seed finder.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a JSON search request (see `SearchRequestConfig`).
    config_file: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    intro("Weather Seed")?;

    let spinner = spinner();
    spinner.start("Loading search request...");
    let config_data = std::fs::read_to_string(&args.config_file)
        .with_context(|| format!("can't read {}", args.config_file.display()))?;
    let config: SearchRequestConfig =
        serde_json::from_str(&config_data).context("can't parse search request")?;
    let request = SearchRequest::new(&config).map_err(|e| anyhow!(e))?;
    spinner.stop("Search request loaded.");

    let legacy = request.use_legacy_random();
    let (sink, rx) = ChannelSink::new();
    let cancel = CancelToken::new();
    let handle = thread::spawn(move || search(&request, &sink, &cancel));

    let pb = progress_bar(100);
    pb.start("Searching seeds...");
    let mut last_percent = 0u64;
    loop {
        match rx.recv() {
            Ok(Event::Start { total }) => {
                log::info!("scanning {total} seed(s)");
            }
            Ok(Event::Progress { percent, .. }) => {
                let percent = percent.round() as u64;
                if percent > last_percent {
                    pb.inc(percent - last_percent);
                    last_percent = percent;
                }
            }
            Ok(Event::Found { seed }) => {
                note(format!("{seed}"), oracle::report(seed, legacy))?;
            }
            Ok(Event::Complete {
                total_found,
                elapsed_secs,
            }) => {
                pb.stop(format!(
                    "Search complete: {total_found} seed(s) in {elapsed_secs:.2}s"
                ));
                break;
            }
            Err(_) => break,
        }
    }

    let summary = handle.join().map_err(|_| anyhow!("search worker panicked"))?;

    outro(format!(
        "Finished: {} seed(s) found: {:?}",
        summary.matches.len(),
        summary.matches
    ))?;

    Ok(())
}
