pub mod app_config;
pub mod fixture;
pub mod memory;

pub use fixture::FixtureError;
pub use memory::InMemoryDocumentStore;
