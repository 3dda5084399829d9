//! Outbound adapters implementing the domain ports.

pub mod files;
pub mod persistence;
