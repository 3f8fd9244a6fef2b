use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures_util::StreamExt;

mod app;
mod client;
mod config;
mod handler;
mod logging;
mod models;
mod normalize;
mod tui;
mod ui;

use app::App;
use client::GeneratorClient;

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = logging::init();
    tui::install_panic_hook();

    let api_base = config::api_base();
    tracing::info!(api_base = %api_base, "starting adcopy v{}", env!("CARGO_PKG_VERSION"));

    let client = GeneratorClient::new(api_base);
    let mut app = App::new(client);

    let mut terminal = tui::init()?;
    let mut events = EventStream::new();
    // Drives the loading spinner, the copy flash, and the generation-task
    // poll below even when no keys arrive.
    let mut ticker = tokio::time::interval(Duration::from_millis(300));

    while !app.should_quit {
        terminal.draw(|frame| ui::render(&mut app, frame))?;

        tokio::select! {
            _ = ticker.tick() => app.tick(),
            Some(Ok(event)) = events.next() => {
                if let Event::Key(key) = event {
                    // Key press only, not release.
                    if key.kind == KeyEventKind::Press {
                        handler::handle_key(&mut app, key);
                    }
                }
            }
        }

        app.poll_generate().await;
    }

    tui::restore()?;
    Ok(())
}
