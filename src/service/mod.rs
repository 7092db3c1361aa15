//! Read execution: runs the built SELECT and decodes rows to JSON.

mod read;
pub use read::fetch_rows;
