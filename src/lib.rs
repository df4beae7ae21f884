// Main library entry point for Callvine.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;
