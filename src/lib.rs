pub mod app;
pub mod config;
pub mod database;
pub mod error;
pub mod http;
pub mod schema;
pub mod telemetry;
pub mod types;
pub mod util;

pub use app::App;
pub use error::Error;

pub(crate) mod internal;

#[cfg(test)]
pub(crate) mod test_utils;
