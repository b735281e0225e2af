//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure using clap's derive API, following
//! a parameter wrapper pattern that keeps framework concerns out of the
//! core authoring types:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Authoring Session
//! ```
//!
//! Each command family has clap-specific argument structs that convert into
//! the framework-free parameter types from [`jaunt_core::params`]. Core
//! types stay free of clap attributes and derives, and the CLI can grow
//! aliases, help text, and argument validation without touching them.
//!
//! The [`Cli`] handler at the bottom executes parsed commands. Every
//! content command follows the same shape: load the authoring session from
//! the session file, apply the operation, store the session back, render
//! the outcome.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use jaunt_core::api::{CurrentUser, HttpApi, TravelApi};
use jaunt_core::auth::TokenStore;
use jaunt_core::display::{
    DeleteResult, ItinerarySummaries, LibraryItems, ShortDate, UploadResult,
};
use jaunt_core::error::AuthoringError;
use jaunt_core::models::{
    CompanyDetails, Event, EventCategory, EventDetails, EventKind, ItinerarySummary, Package,
    PriceType,
};
use jaunt_core::params::*;
use jaunt_core::session::{AuthoringSession, SaveMode, SessionBuilder};
use jaunt_core::viewer;
use jiff::civil::Date;

use crate::renderer::TerminalRenderer;
use crate::session_file::SessionFile;

// ============================================================================
// CLI Argument Wrapper Implementations
// ============================================================================
//
// These structures implement the CLI side of the parameter wrapper pattern.
// Wrappers that map onto a core parameter type carry a From impl; wrappers
// for operations addressed by ID feed the session methods directly.

/// Start a new draft itinerary
///
/// Opens a fresh authoring session on an unsaved itinerary. Nothing touches
/// the backend until `jaunt save` or `jaunt publish`.
#[derive(Args)]
pub struct NewItineraryArgs {
    /// Title of the itinerary
    pub title: String,
    /// Reference to an already-uploaded cover image
    #[arg(long)]
    pub cover_image: Option<String>,
}

impl From<NewItineraryArgs> for NewItinerary {
    fn from(val: NewItineraryArgs) -> Self {
        NewItinerary {
            title: val.title,
            cover_image: val.cover_image,
        }
    }
}

/// Open an itinerary from the backend
///
/// Fetches the itinerary and its linked package into a new authoring
/// session, replacing whatever session was open before.
#[derive(Args)]
pub struct OpenItineraryArgs {
    /// ID of the itinerary to open
    pub id: u64,
}

/// Delete an itinerary permanently
#[derive(Args)]
pub struct DeleteItineraryArgs {
    /// ID of the itinerary to delete
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

/// View a published itinerary
///
/// Uses the public share endpoint, so it works signed out and never sees
/// drafts.
#[derive(Args)]
pub struct ViewArgs {
    /// Share token from the published itinerary's link
    pub share_uuid: String,
}

/// Add a day to the open itinerary
///
/// The new day is auto-titled and becomes the selected day that
/// `event add` targets.
#[derive(Args)]
pub struct AddDayArgs {
    /// Title for the day, replacing the auto-generated one
    #[arg(short, long)]
    pub title: Option<String>,
    /// Calendar date for the day, e.g. 2026-09-14
    #[arg(short, long)]
    pub date: Option<Date>,
}

/// Rename a day
#[derive(Args)]
pub struct DayTitleArgs {
    /// ID of the day to rename
    pub id: u64,
    /// New title
    pub title: String,
}

/// Set or clear a day's date
#[derive(Args)]
pub struct DayDateArgs {
    /// ID of the day to date
    pub id: u64,
    /// Calendar date, e.g. 2026-09-14
    #[arg(required_unless_present = "clear")]
    pub date: Option<Date>,
    /// Remove the date instead of setting one
    #[arg(long, conflicts_with = "date")]
    pub clear: bool,
}

/// Select the day that later event operations target
#[derive(Args)]
pub struct SelectDayArgs {
    /// ID of the day to select
    pub id: u64,
}

/// Remove a day with all its events
#[derive(Args)]
pub struct RemoveDayArgs {
    /// ID of the day to remove
    pub id: u64,
}

#[derive(Subcommand)]
pub enum DayCommands {
    /// Add a day and select it
    #[command(alias = "a")]
    Add(AddDayArgs),
    /// Rename a day
    #[command(alias = "t")]
    Title(DayTitleArgs),
    /// Set or clear a day's date
    Date(DayDateArgs),
    /// Select the day that event operations target
    #[command(alias = "sel")]
    Select(SelectDayArgs),
    /// Remove a day and release its events' images
    #[command(aliases = ["r", "rm"])]
    Remove(RemoveDayArgs),
}

/// Category detail flags shared by `event add` and `event edit`
///
/// Only the flags matching the event's category apply; the rest are
/// ignored. A flight has a route and an airline, a hotel has room and bed
/// types, and so on.
#[derive(Args, Default)]
pub struct EventDetailFlags {
    /// Activity provider
    #[arg(long)]
    pub provider: Option<String>,
    /// Hotel room type
    #[arg(long)]
    pub room_type: Option<String>,
    /// Hotel bed type
    #[arg(long)]
    pub bed_type: Option<String>,
    /// Hotel property type
    #[arg(long)]
    pub hotel_type: Option<String>,
    /// Flight origin
    #[arg(long)]
    pub from: Option<String>,
    /// Flight destination
    #[arg(long)]
    pub to: Option<String>,
    /// Airline name
    #[arg(long)]
    pub airline: Option<String>,
    /// Airport terminal
    #[arg(long)]
    pub terminal: Option<String>,
    /// Boarding gate
    #[arg(long)]
    pub gate: Option<String>,
    /// Flight number
    #[arg(long)]
    pub flight_number: Option<String>,
    /// Transport carrier
    #[arg(long)]
    pub carrier: Option<String>,
    /// Transport service number
    #[arg(long)]
    pub number: Option<String>,
    /// Cruise cabin type
    #[arg(long)]
    pub cabin_type: Option<String>,
    /// Cruise cabin number
    #[arg(long)]
    pub cabin_number: Option<String>,
}

impl EventDetailFlags {
    /// Applies the set flags onto category details, leaving the rest alone.
    fn apply(&self, details: &mut EventDetails) {
        match details {
            EventDetails::Info => {}
            EventDetails::Hotel {
                room_type,
                bed_type,
                hotel_type,
            } => {
                merge(room_type, &self.room_type);
                merge(bed_type, &self.bed_type);
                merge(hotel_type, &self.hotel_type);
            }
            EventDetails::Activity { provider } => {
                merge(provider, &self.provider);
            }
            EventDetails::Flights {
                from,
                to,
                airline,
                terminal,
                gate,
                flight_number,
            } => {
                merge(from, &self.from);
                merge(to, &self.to);
                merge(airline, &self.airline);
                merge(terminal, &self.terminal);
                merge(gate, &self.gate);
                merge(flight_number, &self.flight_number);
            }
            EventDetails::Transport { carrier, number } => {
                merge(carrier, &self.carrier);
                merge(number, &self.number);
            }
            EventDetails::Cruise {
                cabin_type,
                cabin_number,
            } => {
                merge(cabin_type, &self.cabin_type);
                merge(cabin_number, &self.cabin_number);
            }
        }
    }
}

fn merge<T: Clone>(slot: &mut Option<T>, flag: &Option<T>) {
    if flag.is_some() {
        slot.clone_from(flag);
    }
}

/// Add an event to the selected day
#[derive(Args)]
pub struct AddEventArgs {
    /// Title of the event
    pub title: String,
    /// Event category deciding which detail flags apply
    #[arg(short, long, value_enum, default_value_t = EventCategoryArg::Info)]
    pub category: EventCategoryArg,
    /// Schedule marker shown next to the time
    #[arg(long, value_enum)]
    pub kind: Option<EventKindArg>,
    /// Free-form sub-category label
    #[arg(long)]
    pub sub_category: Option<String>,
    /// Free-form notes shown under the event
    #[arg(short, long)]
    pub notes: Option<String>,
    /// Start time, e.g. 08:15
    #[arg(long)]
    pub time: Option<String>,
    /// Duration, e.g. 2h
    #[arg(long)]
    pub duration: Option<String>,
    /// Time zone label for the start time
    #[arg(long)]
    pub timezone: Option<String>,
    /// Booking confirmation reference
    #[arg(long)]
    pub booking_reference: Option<String>,
    /// Agent or site the booking was made through
    #[arg(long)]
    pub booked_through: Option<String>,
    /// Booked price amount
    #[arg(long)]
    pub amount: Option<f64>,
    /// Currency code for the amount
    #[arg(long)]
    pub currency: Option<String>,
    /// Attach an already-uploaded image reference (repeatable)
    #[arg(long = "image")]
    pub images: Vec<String>,
    #[command(flatten)]
    pub details: EventDetailFlags,
}

impl From<AddEventArgs> for SaveEvent {
    fn from(val: AddEventArgs) -> Self {
        let mut details = EventDetails::empty_for(val.category.into());
        val.details.apply(&mut details);
        SaveEvent {
            form: EventForm {
                title: val.title,
                notes: val.notes,
                details,
                kind: val.kind.map(Into::into),
                sub_category: val.sub_category,
                time: val.time,
                duration: val.duration,
                timezone: val.timezone,
                booking_reference: val.booking_reference,
                booked_through: val.booked_through,
                amount: val.amount,
                currency: val.currency,
                images: val.images,
            },
            editing: None,
        }
    }
}

/// Edit an event in place
///
/// Unset flags keep the stored values; the event's ID and position in its
/// day never change. Passing a different `--category` resets the detail
/// fields before the detail flags apply.
#[derive(Args)]
pub struct EditEventArgs {
    /// ID of the event to edit
    pub id: u64,
    /// Updated title
    #[arg(short, long)]
    pub title: Option<String>,
    /// Move the event to a different category
    #[arg(short, long, value_enum)]
    pub category: Option<EventCategoryArg>,
    /// Schedule marker shown next to the time
    #[arg(long, value_enum)]
    pub kind: Option<EventKindArg>,
    /// Free-form sub-category label
    #[arg(long)]
    pub sub_category: Option<String>,
    /// Free-form notes shown under the event
    #[arg(short, long)]
    pub notes: Option<String>,
    /// Start time, e.g. 08:15
    #[arg(long)]
    pub time: Option<String>,
    /// Duration, e.g. 2h
    #[arg(long)]
    pub duration: Option<String>,
    /// Time zone label for the start time
    #[arg(long)]
    pub timezone: Option<String>,
    /// Booking confirmation reference
    #[arg(long)]
    pub booking_reference: Option<String>,
    /// Agent or site the booking was made through
    #[arg(long)]
    pub booked_through: Option<String>,
    /// Booked price amount
    #[arg(long)]
    pub amount: Option<f64>,
    /// Currency code for the amount
    #[arg(long)]
    pub currency: Option<String>,
    /// Replace the attached image references (repeatable)
    #[arg(long = "image")]
    pub images: Vec<String>,
    #[command(flatten)]
    pub details: EventDetailFlags,
}

impl EditEventArgs {
    /// Builds the full replacement form: the stored event with the set
    /// flags applied on top.
    fn merged_form(&self, event: &Event) -> EventForm {
        let mut form = EventForm::from_event(event);
        if let Some(title) = &self.title {
            form.title = title.clone();
        }
        if let Some(category) = self.category {
            let category: EventCategory = category.into();
            if category != form.details.category() {
                form.details = EventDetails::empty_for(category);
            }
        }
        self.details.apply(&mut form.details);
        if let Some(kind) = self.kind {
            form.kind = Some(kind.into());
        }
        merge(&mut form.notes, &self.notes);
        merge(&mut form.sub_category, &self.sub_category);
        merge(&mut form.time, &self.time);
        merge(&mut form.duration, &self.duration);
        merge(&mut form.timezone, &self.timezone);
        merge(&mut form.booking_reference, &self.booking_reference);
        merge(&mut form.booked_through, &self.booked_through);
        merge(&mut form.amount, &self.amount);
        merge(&mut form.currency, &self.currency);
        if !self.images.is_empty() {
            form.images = self.images.clone();
        }
        form
    }
}

/// Remove an event from the itinerary
#[derive(Args)]
pub struct RemoveEventArgs {
    /// ID of the event to remove
    pub id: u64,
}

#[derive(Subcommand)]
pub enum EventCommands {
    /// Add an event to the selected day
    #[command(alias = "a")]
    Add(AddEventArgs),
    /// Edit an event in place
    #[command(alias = "e")]
    Edit(EditEventArgs),
    /// Remove an event and release its images
    #[command(aliases = ["r", "rm"])]
    Remove(RemoveEventArgs),
}

/// Copy an event into the session library
#[derive(Args)]
pub struct LibraryAddArgs {
    /// ID of the event to copy into the library
    pub event_id: u64,
}

/// Materialize a library item as a fresh event
#[derive(Args)]
pub struct LibraryCopyArgs {
    /// ID of the library item to copy into the selected day
    pub item_id: u64,
}

/// Remove an item from the session library
#[derive(Args)]
pub struct LibraryRemoveArgs {
    /// ID of the library item to remove
    pub item_id: u64,
}

#[derive(Subcommand)]
pub enum LibraryCommands {
    /// Copy an event into the library
    #[command(alias = "a")]
    Add(LibraryAddArgs),
    /// Materialize a library item as a fresh event in the selected day
    #[command(alias = "c")]
    Copy(LibraryCopyArgs),
    /// List the library
    #[command(aliases = ["l", "ls"])]
    List,
    /// Remove an item from the library
    #[command(aliases = ["r", "rm"])]
    Remove(LibraryRemoveArgs),
}

/// Stage package details for the next save
///
/// Flags compose with whatever is already staged, so the form can be built
/// up across several invocations. The staged form is consumed by the next
/// successful save.
#[derive(Args)]
pub struct PackageSetArgs {
    /// Departure location the package starts from
    #[arg(long)]
    pub start_location: Option<String>,
    /// Last day the offer is valid, e.g. 2026-12-31
    #[arg(long)]
    pub valid_till: Option<Date>,
    /// Longer sales description
    #[arg(long)]
    pub description: Option<String>,
    /// Price amount
    #[arg(long)]
    pub price: Option<f64>,
    /// Whether the price is per person or a total
    #[arg(long, value_enum)]
    pub price_type: Option<PriceTypeArg>,
    /// Number of people the price covers
    #[arg(long)]
    pub people: Option<u32>,
    /// Covered location (repeatable, replaces the staged list)
    #[arg(long = "location")]
    pub locations: Vec<String>,
    /// What the price includes (repeatable, replaces the staged list)
    #[arg(long = "inclusion")]
    pub inclusions: Vec<String>,
    /// What the price excludes (repeatable, replaces the staged list)
    #[arg(long = "exclusion")]
    pub exclusions: Vec<String>,
}

impl PackageSetArgs {
    /// Applies the set flags onto the staged form, leaving the rest alone.
    fn apply(self, form: &mut PackageForm) {
        if let Some(start_location) = self.start_location {
            form.start_location = start_location;
        }
        if self.valid_till.is_some() {
            form.valid_till = self.valid_till;
        }
        if self.description.is_some() {
            form.description = self.description;
        }
        if let Some(price) = self.price {
            form.price = price;
        }
        if let Some(price_type) = self.price_type {
            form.price_type = price_type.into();
        }
        if self.people.is_some() {
            form.people = self.people;
        }
        if !self.locations.is_empty() {
            form.locations = self.locations;
        }
        if !self.inclusions.is_empty() {
            form.inclusions = self.inclusions;
        }
        if !self.exclusions.is_empty() {
            form.exclusions = self.exclusions;
        }
    }
}

#[derive(Subcommand)]
pub enum PackageCommands {
    /// Stage package details for the next save
    Set(PackageSetArgs),
    /// Show the staged or persisted package
    Show,
}

/// Store a bearer token for authenticated commands
#[derive(Args)]
pub struct AuthLoginArgs {
    /// Bearer token issued by the backend
    pub token: String,
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Store a bearer token and validate it
    Login(AuthLoginArgs),
    /// Report who is signed in
    Status,
    /// Discard the stored token
    Logout,
}

/// Create or update the account's company details
#[derive(Args)]
pub struct CompanySetArgs {
    /// Company name (required the first time)
    #[arg(long)]
    pub name: Option<String>,
    /// Reference to an already-uploaded logo image
    #[arg(long)]
    pub logo: Option<String>,
    /// Contact email
    #[arg(long)]
    pub email: Option<String>,
    /// Contact phone number
    #[arg(long)]
    pub phone: Option<String>,
    /// Postal address
    #[arg(long)]
    pub address: Option<String>,
    /// Website URL
    #[arg(long)]
    pub website: Option<String>,
    /// Facebook page URL
    #[arg(long)]
    pub facebook: Option<String>,
    /// Instagram profile URL
    #[arg(long)]
    pub instagram: Option<String>,
    /// Short blurb shown to itinerary viewers
    #[arg(long)]
    pub description: Option<String>,
}

impl CompanySetArgs {
    /// Applies the set flags onto existing details, leaving the rest alone.
    fn apply(self, details: &mut CompanyDetails) {
        if let Some(name) = self.name {
            details.company_name = name;
        }
        if self.logo.is_some() {
            details.logo = self.logo;
        }
        if self.email.is_some() {
            details.email = self.email;
        }
        if self.phone.is_some() {
            details.phone = self.phone;
        }
        if self.address.is_some() {
            details.address = self.address;
        }
        if self.website.is_some() {
            details.website = self.website;
        }
        if self.facebook.is_some() {
            details.facebook_url = self.facebook;
        }
        if self.instagram.is_some() {
            details.instagram_url = self.instagram;
        }
        if self.description.is_some() {
            details.description = self.description;
        }
    }
}

#[derive(Subcommand)]
pub enum CompanyCommands {
    /// Show the company details attached to the account
    Show,
    /// Create or update the company details
    Set(CompanySetArgs),
}

/// Upload image files to the backend
#[derive(Args)]
pub struct ImageUploadArgs {
    /// Image files to upload
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Subcommand)]
pub enum ImageCommands {
    /// Upload image files, printing their storage paths
    #[command(alias = "up")]
    Upload(ImageUploadArgs),
}

/// Command-line argument representation of event categories
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum EventCategoryArg {
    /// Plain informational entry
    Info,
    /// Hotel stay
    Hotel,
    /// Booked activity or excursion
    Activity,
    /// Flight leg
    Flights,
    /// Ground transport leg
    Transport,
    /// Cruise leg
    Cruise,
}

impl From<EventCategoryArg> for EventCategory {
    fn from(val: EventCategoryArg) -> Self {
        match val {
            EventCategoryArg::Info => EventCategory::Info,
            EventCategoryArg::Hotel => EventCategory::Hotel,
            EventCategoryArg::Activity => EventCategory::Activity,
            EventCategoryArg::Flights => EventCategory::Flights,
            EventCategoryArg::Transport => EventCategory::Transport,
            EventCategoryArg::Cruise => EventCategory::Cruise,
        }
    }
}

/// Command-line argument representation of schedule markers
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum EventKindArg {
    /// Hotel or venue check-in
    CheckIn,
    /// Hotel or venue check-out
    CheckOut,
    /// Departure leg
    Departure,
    /// Arrival leg
    Arrival,
}

impl From<EventKindArg> for EventKind {
    fn from(val: EventKindArg) -> Self {
        match val {
            EventKindArg::CheckIn => EventKind::CheckIn,
            EventKindArg::CheckOut => EventKind::CheckOut,
            EventKindArg::Departure => EventKind::Departure,
            EventKindArg::Arrival => EventKind::Arrival,
        }
    }
}

/// Command-line argument representation of package price types
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum PriceTypeArg {
    /// Price applies per person
    PerPerson,
    /// Price covers the whole group
    Total,
}

impl From<PriceTypeArg> for PriceType {
    fn from(val: PriceTypeArg) -> Self {
        match val {
            PriceTypeArg::PerPerson => PriceType::PerPerson,
            PriceTypeArg::Total => PriceType::Total,
        }
    }
}

// ============================================================================
// Command Execution
// ============================================================================

/// Executes parsed commands against the backend and the session file.
pub struct Cli {
    api: Arc<HttpApi>,
    renderer: TerminalRenderer,
    session_file: SessionFile,
    tokens: TokenStore,
}

impl Cli {
    /// Create a new CLI handler instance
    pub fn new(
        api: Arc<HttpApi>,
        renderer: TerminalRenderer,
        session_file: SessionFile,
        tokens: TokenStore,
    ) -> Self {
        Self {
            api,
            renderer,
            session_file,
            tokens,
        }
    }

    fn builder(&self) -> SessionBuilder {
        SessionBuilder::new(self.api.clone())
            .with_scratch_path(Some(self.session_file.scratch_path()))
    }

    /// Loads the open session, or fails with a pointer to `new`/`open`.
    fn resume(&self) -> Result<AuthoringSession> {
        let state = self.session_file.load_required()?;
        Ok(self.builder().resume(state)?)
    }

    fn persist(&self, session: &AuthoringSession) -> Result<()> {
        self.session_file.save(&session.state())?;
        Ok(())
    }

    /// Without a subcommand: show the open itinerary, or explain how to
    /// start one.
    pub async fn handle_default(&self) -> Result<()> {
        match self.session_file.load()? {
            Some(state) => {
                let session = self.builder().resume(state)?;
                self.renderer
                    .render(&session.document().itinerary().to_string());
            }
            None => {
                self.renderer.render(
                    "No itinerary is open. Start one with `jaunt new <title>` or list \
                     existing ones with `jaunt list`.\n",
                );
            }
        }
        Ok(())
    }

    pub async fn handle_new(&self, args: NewItineraryArgs) -> Result<()> {
        let session = self.builder().start(args.into())?;
        self.persist(&session)?;
        self.renderer
            .render(&format!("# New Itinerary\n\n{}", session.summary()));
        Ok(())
    }

    pub async fn handle_open(&self, args: OpenItineraryArgs) -> Result<()> {
        let mut session = self.builder().open(args.id).await?;
        let restored = session.restore_cached_package();
        self.persist(&session)?;
        self.renderer
            .render(&format!("# Opened Itinerary\n\n{}", session.summary()));
        if restored {
            self.renderer
                .render("Restored a staged package form from a previous run.\n");
        }
        Ok(())
    }

    pub async fn handle_close(&self) -> Result<()> {
        let state = self.session_file.load()?;
        self.session_file.clear()?;
        match state {
            Some(state) => self.renderer.render(&format!(
                "Closed '{}'. Unsaved changes are gone.\n",
                state.document.itinerary().title
            )),
            None => self.renderer.render("No itinerary was open.\n"),
        }
        Ok(())
    }

    pub async fn handle_show(&self) -> Result<()> {
        let session = self.resume()?;
        self.renderer
            .render(&session.document().itinerary().to_string());
        Ok(())
    }

    pub async fn handle_list(&self) -> Result<()> {
        let listed = self.api.list_itineraries().await?;
        let summaries =
            ItinerarySummaries::new(listed.iter().map(ItinerarySummary::from).collect());
        if summaries.is_empty() {
            self.renderer.render(&summaries.to_string());
        } else {
            self.renderer
                .render(&format!("# Itineraries\n\n{summaries}"));
        }
        Ok(())
    }

    pub async fn handle_delete(&self, args: DeleteItineraryArgs) -> Result<()> {
        if !args.confirm {
            self.renderer.render(&format!(
                "Pass --confirm to permanently delete itinerary {}.\n",
                args.id
            ));
            return Ok(());
        }
        let itinerary = self.api.get_itinerary(args.id).await?;
        self.api.delete_itinerary(args.id).await?;
        // A deleted itinerary cannot stay open.
        if let Ok(Some(state)) = self.session_file.load() {
            if state.document.itinerary().id == Some(args.id) {
                self.session_file.clear()?;
            }
        }
        self.renderer.render(&DeleteResult::new(itinerary).to_string());
        Ok(())
    }

    pub async fn handle_day_command(&self, command: DayCommands) -> Result<()> {
        match command {
            DayCommands::Add(args) => {
                let mut session = self.resume()?;
                let day_id = session.add_day();
                if let Some(title) = args.title {
                    session.set_day_title(day_id, title);
                }
                if let Some(date) = args.date {
                    session.set_day_date(day_id, Some(date));
                }
                self.persist(&session)?;
                self.renderer
                    .render(&format!("Added day with ID: {day_id}\n"));
            }
            DayCommands::Title(args) => {
                let mut session = self.resume()?;
                if !session.set_day_title(args.id, args.title) {
                    bail!("day {} not found in the open itinerary", args.id);
                }
                self.persist(&session)?;
                self.renderer.render(&format!("Renamed day {}.\n", args.id));
            }
            DayCommands::Date(args) => {
                let mut session = self.resume()?;
                let date = if args.clear { None } else { args.date };
                if !session.set_day_date(args.id, date) {
                    bail!("day {} not found in the open itinerary", args.id);
                }
                self.persist(&session)?;
                match date {
                    Some(date) => self.renderer.render(&format!(
                        "Set the date of day {} to {}.\n",
                        args.id,
                        ShortDate(&date)
                    )),
                    None => self
                        .renderer
                        .render(&format!("Cleared the date of day {}.\n", args.id)),
                }
            }
            DayCommands::Select(args) => {
                let mut session = self.resume()?;
                session.select_day(args.id)?;
                self.persist(&session)?;
                self.renderer
                    .render(&format!("Selected day {}.\n", args.id));
            }
            DayCommands::Remove(args) => {
                let mut session = self.resume()?;
                let removed = session.remove_day(args.id).await?;
                self.persist(&session)?;
                self.renderer.render(&format!(
                    "Removed day '{}' ({} events).\n",
                    removed.title,
                    removed.events.len()
                ));
            }
        }
        Ok(())
    }

    pub async fn handle_event_command(&self, command: EventCommands) -> Result<()> {
        match command {
            EventCommands::Add(args) => {
                let mut session = self.resume()?;
                let event_id = session.save_event(args.into())?;
                self.persist(&session)?;
                self.renderer
                    .render(&format!("Created event with ID: {event_id}\n"));
            }
            EventCommands::Edit(args) => {
                let mut session = self.resume()?;
                let (_, event) = session
                    .document()
                    .find_event(args.id)
                    .ok_or(AuthoringError::EventNotFound { id: args.id })?;
                let form = args.merged_form(event);
                session.save_event(SaveEvent {
                    form,
                    editing: Some(args.id),
                })?;
                self.persist(&session)?;
                self.renderer
                    .render(&format!("Updated event {}.\n", args.id));
            }
            EventCommands::Remove(args) => {
                let mut session = self.resume()?;
                let removed = session.remove_event(args.id).await?;
                self.persist(&session)?;
                self.renderer
                    .render(&format!("Removed event '{}'.\n", removed.title));
            }
        }
        Ok(())
    }

    pub async fn handle_library_command(&self, command: LibraryCommands) -> Result<()> {
        match command {
            LibraryCommands::Add(args) => {
                let mut session = self.resume()?;
                let item_id = session.add_to_library(args.event_id)?;
                self.persist(&session)?;
                self.renderer
                    .render(&format!("Added library item with ID: {item_id}\n"));
            }
            LibraryCommands::Copy(args) => {
                let mut session = self.resume()?;
                let event_id = session.copy_from_library(args.item_id)?;
                self.persist(&session)?;
                self.renderer
                    .render(&format!("Created event with ID: {event_id}\n"));
            }
            LibraryCommands::List => {
                let session = self.resume()?;
                let items = LibraryItems::new(session.library().items().to_vec());
                if items.is_empty() {
                    self.renderer.render(&items.to_string());
                } else {
                    self.renderer.render(&format!("# Library\n\n{items}"));
                }
            }
            LibraryCommands::Remove(args) => {
                let mut session = self.resume()?;
                let removed = session.remove_from_library(args.item_id)?;
                self.persist(&session)?;
                self.renderer
                    .render(&format!("Removed library item '{}'.\n", removed.title));
            }
        }
        Ok(())
    }

    pub async fn handle_package_command(&self, command: PackageCommands) -> Result<()> {
        match command {
            PackageCommands::Set(args) => {
                let mut session = self.resume()?;
                let mut form = session.pending_package().cloned().unwrap_or_default();
                args.apply(&mut form);
                session.stage_package(form);
                self.persist(&session)?;
                self.renderer
                    .render("Staged package details for the next save.\n");
            }
            PackageCommands::Show => {
                let session = self.resume()?;
                if let Some(form) = session.pending_package() {
                    let preview = Package::from_form(form, session.document().itinerary());
                    self.renderer
                        .render(&format!("# Staged Package\n\n{preview}"));
                } else if let Some(package) = session.linked_package() {
                    self.renderer.render(&package.to_string());
                } else {
                    self.renderer.render(
                        "No package details yet. Stage some with `jaunt package set`.\n",
                    );
                }
            }
        }
        Ok(())
    }

    pub async fn handle_save(&self) -> Result<()> {
        self.save_session(SaveMode::Draft).await
    }

    pub async fn handle_publish(&self) -> Result<()> {
        self.save_session(SaveMode::Publish).await
    }

    async fn save_session(&self, mode: SaveMode) -> Result<()> {
        let mut session = self.resume()?;
        let result = session.save(mode).await;
        // The document learns its server identity even when the package
        // write fails; store it before reporting so saving again retries
        // instead of duplicating.
        self.persist(&session)?;
        let report = result?;
        self.renderer.render(&report.to_string());
        Ok(())
    }

    pub async fn handle_view(&self, args: ViewArgs) -> Result<()> {
        let mut view = match viewer::fetch(self.api.as_ref(), &args.share_uuid).await {
            Ok(view) => view,
            Err(AuthoringError::ShareUnavailable { token }) => {
                // Stale or unpublished links get an empty state, not an error.
                self.renderer.render(&format!(
                    "# Nothing Published Here\n\nNo published itinerary answers to \
                     '{token}'. The link may be stale, or the itinerary was never \
                     published.\n"
                ));
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        view.resolve_images(self.api.origin());
        self.renderer.render(&view.to_string());
        Ok(())
    }

    pub async fn handle_auth_command(&self, command: AuthCommands) -> Result<()> {
        match command {
            AuthCommands::Login(args) => {
                self.api.set_token(Some(args.token.clone())).await;
                let user = self.api.current_user().await?;
                self.tokens.save(&args.token)?;
                self.renderer
                    .render(&format!("Signed in as {}.\n", describe(&user)));
            }
            AuthCommands::Status => {
                if !self.api.is_authenticated().await {
                    self.renderer.render("Signed out.\n");
                    return Ok(());
                }
                let user = self.api.current_user().await?;
                self.renderer
                    .render(&format!("Signed in as {}.\n", describe(&user)));
            }
            AuthCommands::Logout => {
                self.tokens.clear()?;
                self.api.set_token(None).await;
                self.renderer.render("Signed out.\n");
            }
        }
        Ok(())
    }

    pub async fn handle_company_command(&self, command: CompanyCommands) -> Result<()> {
        match command {
            CompanyCommands::Show => match self.api.company_details().await? {
                Some(details) => self.renderer.render(&details.to_string()),
                None => self
                    .renderer
                    .render("No company details yet. Add some with `jaunt company set`.\n"),
            },
            CompanyCommands::Set(args) => {
                let mut details = match self.api.company_details().await? {
                    Some(existing) => existing,
                    None => match &args.name {
                        Some(name) => CompanyDetails::named(name.as_str()),
                        None => bail!("no company details exist yet; pass --name to create them"),
                    },
                };
                args.apply(&mut details);
                let saved = self.api.save_company_details(&details).await?;
                self.renderer
                    .render(&format!("# Company Updated\n\n{saved}"));
            }
        }
        Ok(())
    }

    pub async fn handle_image_command(&self, command: ImageCommands) -> Result<()> {
        match command {
            ImageCommands::Upload(args) => {
                let mut files = Vec::with_capacity(args.files.len());
                for path in &args.files {
                    let bytes = fs::read(path)
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    let filename = path
                        .file_name()
                        .and_then(|name| name.to_str())
                        .ok_or_else(|| anyhow!("unusable file name: {}", path.display()))?;
                    files.push((filename.to_string(), bytes));
                }
                let paths = if files.len() == 1 {
                    let (filename, bytes) = files.swap_remove(0);
                    vec![self.api.upload_image(&filename, bytes).await?]
                } else {
                    self.api.upload_images(files).await?
                };
                let mut output = String::new();
                for path in paths {
                    output.push_str(&UploadResult(path).to_string());
                }
                self.renderer.render(&output);
            }
        }
        Ok(())
    }
}

fn describe(user: &CurrentUser) -> String {
    user.name
        .clone()
        .or_else(|| user.email.clone())
        .unwrap_or_else(|| format!("user #{}", user.id))
}
