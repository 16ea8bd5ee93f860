//! Ports - trait boundaries between the core and infrastructure
//!
//! Following hexagonal architecture, these traits define what the core
//! needs from the outside world; the `adapters` module provides the
//! concrete implementations.

pub mod observer;
pub mod repository;

pub use observer::Observer;
pub use repository::ModelRepository;
