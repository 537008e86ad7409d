//! Core dataset model, loading and aggregation

pub mod config;
pub mod log;
pub mod model;
pub mod observable;
pub mod service;
pub mod source;
pub mod stats;

// Re-export main types for cleaner imports
pub use model::{Country, Participation, Snapshot};
pub use service::OlympicService;
pub use source::{DataSource, LoadError};
