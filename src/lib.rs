//! terabox_relay - HTTP relay for resolving TeraBox share links.
//!
//! This library provides functionality to:
//! - Validate URLs against the fixed list of TeraBox share domains
//! - Extract the share identifier ("surl") from a share URL
//! - Fetch the shared file listing from the TeraBox API
//! - Serve the whole chain behind a small JSON HTTP API
//!
//! # Example
//!
//! ```no_run
//! use terabox_relay::{app, AppState, ShareListClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ShareListClient::new()?;
//!     let router = app(AppState { client });
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//!     axum::serve(listener, router).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod models;
pub mod server;
pub mod url_parser;

// Re-exports for convenience
pub use client::ShareListClient;
pub use error::{RelayError, Result};
pub use models::{DownloadResponse, ErrorResponse, FileRecord, ShareInfo};
pub use server::{app, AppState};
pub use url_parser::{is_share_url, parse_share_link, ShareLink};
