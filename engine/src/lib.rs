// Engine library root
// Report ingestion (data), the query engine (query), loading and session state
// (services), settings (config) and command-line rendering (presentation).

pub mod config;
pub mod data;
pub mod error;
pub mod presentation;
pub mod query;
pub mod services;

pub use error::EngineError;
