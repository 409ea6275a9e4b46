//! Directory sync API client

pub mod api;
#[cfg(test)]
pub mod fixtures;
pub mod http;
#[cfg(test)]
pub mod mock;
pub mod models;

pub use api::DirectoryApi;
pub use http::DirectorySyncClient;
#[cfg(test)]
pub use mock::MockDirectoryClient;
