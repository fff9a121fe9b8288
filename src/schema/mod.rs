//! Schema module - configuration and seeding for runs.

mod config;
mod seed;

pub use config::*;
pub use seed::*;
