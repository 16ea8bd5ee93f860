//! Adapters - concrete implementations of the crate's ports.

pub mod json_repository;
pub mod remote;

pub use json_repository::JsonModelRepository;
pub use remote::RemoteModelSource;
