//! Typed operations over the simap.ch API surface.
//!
//! Each operation is an async method on [`crate::SimapClient`], takes
//! per-call [`crate::RequestOptions`], and resolves to a
//! [`crate::CallResult`] envelope. HTTP error statuses never fail the
//! future; see [`crate::ensure_ok`].

mod types;

pub mod projects;
pub mod reference;

pub use types::LocalizedText;
