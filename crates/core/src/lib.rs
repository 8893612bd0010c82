//! Domain types shared by the car admin crates.
//!
//! Holds the car record as served by the backend, the edit form used for
//! add/update submissions, and the display formatting rules the admin
//! card renders with.

pub mod car;
pub mod error;
pub mod form;
pub mod format;
pub mod types;
