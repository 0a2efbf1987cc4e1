//! Headless core for the character browser screen.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values for the
//! remote character collection, and owns the screen's filter/picker state
//! machine. The host executes the actual HTTP round-trip and draws the
//! result, which keeps the core deterministic and testable.
//!
//! # Design
//! - `CharacterClient` is stateless; it holds only `base_url`.
//! - Fetching is split into `build_fetch_characters` (produces request) and
//!   `parse_fetch_characters` (consumes response), so the I/O boundary is
//!   explicit. `Transport` closes the loop for hosts that want the core to
//!   drive the request.
//! - `CharacterListView` tags every fetch with a `FetchToken` and drops
//!   responses for superseded tokens.
//! - Types use owned `String` / `Vec` fields to simplify FFI mapping.

pub mod client;
pub mod error;
pub mod http;
pub mod present;
pub mod transport;
pub mod types;
pub mod view;

pub use client::{CharacterClient, DEFAULT_BASE_URL};
pub use error::FetchError;
pub use http::{HttpRequest, HttpResponse};
pub use present::{PickerOption, StatusTone};
pub use transport::Transport;
#[cfg(feature = "ureq-transport")]
pub use transport::UreqTransport;
pub use types::{Character, CharacterPage, FilterChoice, Filters, GenderFilter, StatusFilter};
pub use view::{CharacterListView, FetchOutcome, FetchTicket, FetchToken, Selection};
