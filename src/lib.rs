//! Typed client for the simap.ch Swiss public procurement API.
//!
//! The crate is a thin runtime around the API's conventions:
//!
//! - every operation resolves to a uniform [`CallResult`] envelope
//!   (`data` / `error` / `response`) — HTTP error statuses are values,
//!   not errors, until [`ensure_ok`] converts them;
//! - [`with_auth`] / [`Auth`] compose the bearer `Authorization` header
//!   onto per-call [`RequestOptions`];
//! - configuration is explicit: build a [`SimapClient`] once via
//!   [`SimapClientBuilder`] and share the cheap-clone handle.
//!
//! ```no_run
//! use simap_client::{Auth, RequestOptions, SimapClient, with_auth};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = SimapClient::builder().build()?;
//! let authed = with_auth(Auth::bearer("token"));
//!
//! let cantons = client
//!     .list_cantons(authed(RequestOptions::new()))
//!     .await?
//!     .ensure_ok()?;
//! # Ok(())
//! # }
//! ```
//!
//! There is no retry, caching, or rate-limit handling: the envelope
//! exposes status and headers (e.g. `Retry-After`) and callers own that
//! policy.

pub mod api;
mod auth;
mod builder;
mod client;
mod config;
mod error;
mod options;
mod response;
mod tls;
mod transport;

pub use auth::{Auth, with_auth};
pub use builder::SimapClientBuilder;
pub use client::SimapClient;
pub use config::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT, TlsRootConfig, TransportSecurity,
};
pub use error::{ClientError, HttpError, InvalidUrlKind, ensure_ok};
pub use options::RequestOptions;
pub use response::{CallResult, ResponseMeta, TransportBody};
pub use transport::Transport;
