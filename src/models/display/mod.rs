//! Display model implementations for table and pretty output
//!
//! Display models turn API response types into CLI-friendly rows with
//! column names and masked secrets. JSON output serializes the API types
//! directly.

mod directory;

pub use directory::DirectoryDisplay;
