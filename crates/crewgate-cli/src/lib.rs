//! Crewgate CLI library

pub mod commands;
pub mod error;
