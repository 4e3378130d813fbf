//! Constant tables and shared error type for sha-trace.

#![forbid(unsafe_code)]

pub mod constants;
mod error;

pub use error::Error;

pub type Result<T> = std::result::Result<T, Error>;
