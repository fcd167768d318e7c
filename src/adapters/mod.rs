// Adapters layer: concrete data sources behind the `DataSource` port.

pub mod fixture;
pub mod rest;

pub use fixture::FixtureSource;
pub use rest::RestSource;
