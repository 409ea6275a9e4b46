//! Directory sync API data models

mod directory;

pub use directory::{CreateDirectoryRequest, Directory, DirectoryProvider, ScimEndpoint};
