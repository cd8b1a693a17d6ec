//! Server side of the list-page protocol: per-category behavior and the
//! preference-backed filter state.

pub mod categories;
pub mod filter_state;

pub use filter_state::FilterState;
