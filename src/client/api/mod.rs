//! API trait definitions
//!
//! The directory sync surface is small enough for a single trait,
//! [`DirectoryApi`], which covers reading, mutating and invalidating the
//! directory configured for a scope.

mod directory;

pub use directory::DirectoryApi;
