//! Client side of the ProjectForge list-page protocol.
//!
//! [`reducer::reduce`] is the pure state transition of one list page;
//! [`client::ListPageClient`] speaks the HTTP endpoints; [`page::ListPage`]
//! ties the two together and numbers requests so only the latest one per
//! state slice is merged.

pub mod action;
pub mod client;
pub mod page;
pub mod reducer;
pub mod state;

pub use action::{Action, Slice};
pub use client::{ClientError, ListPageClient};
pub use page::ListPage;
pub use state::{ListPageState, Status};
