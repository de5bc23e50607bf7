pub mod api;
pub mod args;
pub mod commands;
mod config;
mod db;
mod error;
pub mod model;
pub mod session;
pub mod store;
mod utils;

#[cfg(test)]
mod test;

pub use config::Config;
pub use error::Error;
pub use error::Result;
