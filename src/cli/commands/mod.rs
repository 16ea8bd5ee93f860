//! CLI commands for the flap32 toolkit

pub mod evaluate;
pub mod fetch;
pub mod inspect;
pub mod train;
