//! API request handlers

mod health;
mod services;

pub use health::*;
pub use services::*;
