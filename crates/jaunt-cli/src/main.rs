//! Jaunt CLI Application
//!
//! Command-line front end for the itinerary authoring core. Parses arguments,
//! wires up the HTTP backend and the on-disk session file, and dispatches to
//! the command handlers in [`cli`].

mod args;
mod cli;
mod renderer;
mod session_file;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use jaunt_core::api::HttpApi;
use jaunt_core::auth::TokenStore;
use log::{info, warn};

use args::{Args, Commands};
use cli::Cli;
use renderer::TerminalRenderer;
use session_file::SessionFile;

use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        api_url,
        session_file,
        no_color,
        command,
    } = Args::parse();

    let tokens = TokenStore::open_default().context("Failed to locate the token store")?;
    let token = tokens.load().context("Failed to read the stored token")?;
    let api =
        Arc::new(HttpApi::new(&api_url, token).context("Failed to set up the API client")?);

    let session_file = match session_file {
        Some(path) => SessionFile::at(path),
        None => SessionFile::open_default().context("Failed to locate the session file")?,
    };

    let renderer = TerminalRenderer::new(!no_color);
    let cli = Cli::new(api, renderer, session_file, tokens.clone());

    info!("Jaunt started");

    let result = match command {
        Some(New(args)) => cli.handle_new(args).await,
        Some(Open(args)) => cli.handle_open(args).await,
        Some(Close) => cli.handle_close().await,
        Some(Show) => cli.handle_show().await,
        Some(List) => cli.handle_list().await,
        Some(Delete(args)) => cli.handle_delete(args).await,
        Some(Day { command }) => cli.handle_day_command(command).await,
        Some(Event { command }) => cli.handle_event_command(command).await,
        Some(Library { command }) => cli.handle_library_command(command).await,
        Some(Package { command }) => cli.handle_package_command(command).await,
        Some(Save) => cli.handle_save().await,
        Some(Publish) => cli.handle_publish().await,
        Some(View(args)) => cli.handle_view(args).await,
        Some(Auth { command }) => cli.handle_auth_command(command).await,
        Some(Company { command }) => cli.handle_company_command(command).await,
        Some(Image { command }) => cli.handle_image_command(command).await,
        None => cli.handle_default().await,
    };

    // A rejected token is useless; drop it so the next run starts clean.
    if let Err(error) = &result {
        if let Some(core) = error.downcast_ref::<jaunt_core::error::AuthoringError>() {
            if core.is_unauthorized() {
                if let Err(e) = tokens.clear() {
                    warn!("could not discard the rejected token: {e}");
                }
            }
        }
    }

    result
}
