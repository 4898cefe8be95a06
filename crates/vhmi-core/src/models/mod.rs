//! Data model for the live vehicle snapshot

pub mod data;
pub mod fault;
pub mod state;

pub use data::*;
pub use fault::*;
pub use state::*;
