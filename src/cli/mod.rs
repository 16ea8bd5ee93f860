//! CLI infrastructure for the flap32 toolkit
//!
//! This module provides the command-line interface for training,
//! evaluating, downloading, and inspecting learned models.

pub mod commands;
pub mod output;
