//! # Pantry
//!
//! Client side of the pantry recipe service.
//!
//! ## Layout
//! - [`client`]: typed HTTP client over every `/api/v1` endpoint
//! - [`listing`]: list state kept in sync with URL query parameters
//! - [`display`]: formatting for times, match scores and expiry dates
//!
//! The wire types live in the `models` crate and are re-exported here.
//!
//! ## Notes
//!
//! Amounts travel as decimal strings (`"12.50"`) so clients never see float
//! rounding. Suggestions are ranked server side; the client only formats them.

pub mod client;
pub mod display;
pub mod listing;

pub use client::{ApiClient, ClientError};
pub use models;
