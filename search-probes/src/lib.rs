//! # search-probes
//!
//! Reachability and response-shape probes for the public services a dork
//! scanner leans on: an HTML search front-end (Brave Search), an
//! instant-answer JSON API (DuckDuckGo) and a historical URL index
//! (Wayback Machine CDX).
//!
//! ## Design
//!
//! - One struct per probe, each implementing [`Probe`] and owning its own
//!   configuration record (endpoint, query, timeout)
//! - Every request has a bounded per-request timeout; nothing is retried
//! - A probe returns `Result<Evidence, ProbeError>` and never propagates a
//!   transport or decoding failure any other way
//! - Progress lines go to a [`Transcript`] rather than stdout
//!
//! ## Logging
//!
//! Request details are logged at trace level, parsed counts at debug.

pub mod config;
pub mod error;
pub mod http;
pub mod probe;
pub mod probes;
pub mod types;

pub use config::ProbesConfig;
pub use error::{ConfigError, ProbeError};
pub use probe::Probe;
pub use types::{Evidence, ProbeKind, Transcript};
