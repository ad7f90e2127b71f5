//! Dashboard demo — runs several simulated tabs of one browser profile in a
//! single process. Every tab signs in with the given identity, the first tab
//! subscribes to the requested tickers, and all tabs then converge through
//! the shared store while their one-second price timers race (last write
//! wins). Final card lists are printed when the run ends.
//!
//! Usage example (CLI):
//! ```bash
//! dashboard_tab --identity a@b.co --tickers GOOG TSLA --tabs 3 --ticks 10
//! ```
#![warn(missing_docs)]

use std::thread;
use std::time::Duration;

use clap::Parser;
use crossbeam_channel::unbounded;
use dashboard_common::{Result, Ticker};
use dashboard_hub::SharedStore;
use dashboard_tab::TabApp;
use log::{error, info, warn};

/// Command line arguments for the multi-tab demo.
#[derive(Parser, Debug)]
#[command(about = "Simulated multi-tab stock dashboard")]
struct Args {
    /// Identity to sign in with (email-shaped, e.g. a@b.co).
    #[arg(long)]
    identity: String,

    /// Tickers the first tab subscribes to at startup.
    #[arg(long, num_args = 0..)]
    tickers: Vec<Ticker>,

    /// Number of tab instances sharing the profile.
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..))]
    tabs: u8,

    /// Price tick interval in milliseconds.
    #[arg(long, default_value_t = 1000)]
    interval_ms: u64,

    /// Stop after this many tick intervals (runs until Ctrl+C when omitted).
    #[arg(long)]
    ticks: Option<u64>,
}

fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();
    let interval = Duration::from_millis(args.interval_ms);
    let store = SharedStore::new();

    let (shutdown_tx, shutdown_rx) = unbounded::<()>();
    {
        let shutdown_tx = shutdown_tx.clone();
        let tabs = args.tabs;
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down tabs...");
            for _ in 0..tabs {
                let _ = shutdown_tx.send(());
            }
        })
        .map_err(|e| dashboard_common::DashboardError::ChannelSend(e.to_string()))?;
    }

    let mut apps = Vec::with_capacity(args.tabs as usize);
    let mut primary = TabApp::new(store.clone(), interval)?;
    primary.login(&args.identity)?;
    for ticker in &args.tickers {
        if let Err(e) = primary.subscribe(Some(*ticker)) {
            if e.is_user_facing() {
                warn!("Skipping {ticker}: {e}");
            } else {
                error!("Failed to subscribe {ticker}: {e}");
            }
        }
    }
    apps.push(primary);

    for _ in 1..args.tabs {
        let mut app = TabApp::new(store.clone(), interval)?;
        app.login(&args.identity)?;
        apps.push(app);
    }

    let mut handles = Vec::with_capacity(apps.len());
    for mut app in apps {
        let shutdown = shutdown_rx.clone();
        handles.push(thread::spawn(move || {
            if let Err(e) = app.run(&shutdown) {
                error!("{} stopped with error: {e}", app.id());
            }
            app
        }));
    }

    if let Some(ticks) = args.ticks {
        thread::sleep(Duration::from_millis(args.interval_ms * ticks + 200));
        for _ in 0..args.tabs {
            let _ = shutdown_tx.send(());
        }
    }

    for handle in handles {
        if let Ok(app) = handle.join() {
            match app.cards().placeholder() {
                Some(text) => info!("{}: {text}", app.id()),
                None => {
                    for card in app.cards().cards() {
                        info!("{}: {card}", app.id());
                    }
                }
            }
        }
    }
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
