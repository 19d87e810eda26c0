//! Core domain types
//!
//! This module contains the structures the cleanup run is built from. They are
//! shared between the HTTP client (which produces candidates) and the CLI
//! (which decides what to do with them).

pub mod candidate;
pub mod path_spec;
pub mod retention;
pub mod skip_list;
