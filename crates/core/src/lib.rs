//! Domain logic shared by the ProjectForge server and list-page client.
//!
//! Nothing in this crate performs I/O: storage lives in `pforge-db`, HTTP in
//! `pforge-api` and `pforge-client`.

pub mod error;
pub mod favorites;
pub mod filter;
pub mod format;
pub mod legacy;
pub mod mapping;
pub mod types;
pub mod ui;
