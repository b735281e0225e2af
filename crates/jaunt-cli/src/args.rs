use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{
    AuthCommands, CompanyCommands, DayCommands, DeleteItineraryArgs, EventCommands, ImageCommands,
    LibraryCommands, NewItineraryArgs, OpenItineraryArgs, PackageCommands, ViewArgs,
};

/// Main command-line interface for the Jaunt itinerary authoring tool
///
/// Jaunt builds day-by-day travel itineraries from the terminal. Days and
/// events are edited locally in an authoring session, then persisted to the
/// backend as a draft or published for public viewing behind a share token.
/// Published itineraries carry a sellable package alongside the schedule.
#[derive(Parser)]
#[command(version, about, name = "jaunt")]
pub struct Args {
    /// Backend server origin
    #[arg(long, global = true, default_value = "http://localhost:8000")]
    pub api_url: String,

    /// Path to the session state file. Defaults to
    /// $XDG_STATE_HOME/jaunt/session.json
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Jaunt CLI
///
/// Session commands (`new`, `open`, `close`, `show`) manage which itinerary
/// is under edit; `day`, `event`, `library`, and `package` edit its content
/// locally; `save` and `publish` persist it to the backend; `view` reads a
/// published itinerary the way the public sees it.
#[derive(Subcommand)]
pub enum Commands {
    /// Start a new draft itinerary
    #[command(alias = "n")]
    New(NewItineraryArgs),
    /// Open an itinerary from the backend
    #[command(alias = "o")]
    Open(OpenItineraryArgs),
    /// Close the open session without saving
    Close,
    /// Show the itinerary under edit
    #[command(alias = "s")]
    Show,
    /// List itineraries stored on the backend
    #[command(aliases = ["l", "ls"])]
    List,
    /// Delete an itinerary permanently
    #[command(alias = "rm")]
    Delete(DeleteItineraryArgs),
    /// Manage days
    #[command(alias = "d")]
    Day {
        #[command(subcommand)]
        command: DayCommands,
    },
    /// Manage events in the selected day
    #[command(alias = "e")]
    Event {
        #[command(subcommand)]
        command: EventCommands,
    },
    /// Manage the session library of reusable events
    #[command(alias = "lib")]
    Library {
        #[command(subcommand)]
        command: LibraryCommands,
    },
    /// Manage the itinerary's package details
    #[command(alias = "pkg")]
    Package {
        #[command(subcommand)]
        command: PackageCommands,
    },
    /// Save the itinerary as a draft
    Save,
    /// Save and publish the itinerary
    Publish,
    /// View a published itinerary by its share token
    #[command(alias = "v")]
    View(ViewArgs),
    /// Manage the signed-in account
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Manage the company details shown on published itineraries
    Company {
        #[command(subcommand)]
        command: CompanyCommands,
    },
    /// Upload images for use in events and covers
    Image {
        #[command(subcommand)]
        command: ImageCommands,
    },
}
