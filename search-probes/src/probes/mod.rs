//! Probe implementations.
//!
//! Each module provides a struct implementing [`crate::probe::Probe`] for one
//! external service (or, for connectivity, a list of hosts).

pub mod archive;
pub mod compound;
pub mod connectivity;
pub mod html_search;
pub mod instant_answer;

pub use archive::ArchiveProbe;
pub use compound::CompoundQueryProbe;
pub use connectivity::ConnectivityProbe;
pub use html_search::HtmlSearchProbe;
pub use instant_answer::InstantAnswerProbe;
