//! Infrastructure configuration modules.

pub mod logging;
pub mod portfolio;
pub mod settings;

pub use settings::{Config, TOKEN_ENV};
