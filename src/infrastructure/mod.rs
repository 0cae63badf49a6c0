//! Filesystem access, the Windows-1252 codec and service wiring

pub mod di;
pub mod encoding;
pub mod error;
pub mod traits;

pub use error::InfraError;
