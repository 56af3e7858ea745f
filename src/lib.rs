//! Beadgrid - photographs to bead patterns
//!
//! PNG intake, request validation and the pipeline orchestrator around the
//! `bead-convert` core, served over HTTP and the command line.
//! This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
