// Engine library root: sheet parsing, aggregation and the view service.

pub mod aggregators;
pub mod clock;
pub mod config;
pub mod data;
pub mod error;
pub mod parsers;
pub mod services;

pub use error::{EngineError, Result};
