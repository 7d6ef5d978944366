//! Domain models for the appointments service.

mod appointment;
mod filter;

pub use appointment::*;
pub use filter::*;
