//! Read-only client for the Miro REST API items collection.
//!
//! Everything here is blocking and sequential: one request in flight, each
//! response fully consumed before the next page is requested.
//!
//! - [`model`] — items, item kinds, and the page envelope
//! - [`transport`] — the narrow HTTP seam ([`Transport`]) and its reqwest implementation
//! - [`client`] — [`ItemsClient`], which follows `next` links until a container is exhausted

pub mod client;
pub mod error;
pub mod model;
pub mod transport;

pub use client::{ClientConfig, ItemsClient, DEFAULT_API_BASE, DEFAULT_PAGE_LIMIT};
pub use error::{FetchError, Result};
pub use model::{Item, ItemData, ItemKind, Links, Page};
pub use transport::{HttpTransport, PageRequest, RawResponse, Transport};
