//! Library components of the `tissue` command-line tool.

pub mod formats;
pub mod logging;
pub mod summary;
