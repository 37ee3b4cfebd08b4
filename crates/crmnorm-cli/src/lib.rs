//! Library components of the crmnorm CLI.

pub mod csv_store;
pub mod logging;
pub mod summary;
