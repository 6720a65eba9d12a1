// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GoTracker console host
//!
//! Drives the workout controller from line commands on stdin, with the map,
//! form, list and alerts rendered as terminal output.

mod console;

use anyhow::Context;
use console::{Command, SharedForm};
use go_tracker::{
    config::Config,
    db::FileStore,
    ports::{Ports, SystemClock},
    App, AppEvent,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;

    init_logging(&config.log_format);
    tracing::info!(
        data_dir = %config.data_dir.display(),
        zoom = config.map_zoom,
        "Starting GoTracker"
    );

    let form = SharedForm::default();
    let ports = Ports {
        geolocation: Box::new(console::FixedPosition::new(config.home_position)),
        map: Box::new(console::TerminalMap),
        form: Box::new(form.clone()),
        list: Box::new(console::TerminalList),
        notifier: Box::new(console::TerminalNotifier),
        storage: Box::new(FileStore::new(&config.data_dir)),
        clock: Box::new(SystemClock),
    };

    let mut app = App::new(config.map_settings(), ports);
    if let Err(e) = app.initialize().await {
        tracing::warn!(error = %e, "Map unavailable for this session");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match console::parse_command(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Help)) => console::print_help(),
            Ok(Some(Command::List)) => console::print_log(app.workouts()),
            Ok(Some(Command::Set(field, value))) => form.set(field, value),
            Ok(Some(Command::Kind(kind))) => {
                form.set_kind(kind);
                app.handle(AppEvent::KindChanged(kind)).await;
            }
            Ok(Some(Command::Event(event))) => app.handle(event).await,
            Err(msg) => eprintln!("{}", msg),
        }
    }

    tracing::info!(workouts = app.workouts().len(), "Shutting down");
    Ok(())
}

/// Initialize structured logging on stderr: JSON by default, compact text
/// when `LOG_FORMAT=text`.
fn init_logging(format: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("go_tracker=debug,info"));

    let registry = tracing_subscriber::registry().with(filter);

    if format == "text" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
