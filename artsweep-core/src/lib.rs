//! Artsweep Core
//!
//! Core types and abstractions for the artsweep repository cleanup tool.
//!
//! This crate contains:
//! - Domain types: path specifiers, retention periods, the skip list and
//!   cleanup candidates
//! - DTOs: wire shapes returned by the artifact repository service
//! - Configuration: the YAML cleanup plan
//! - Query: the typed AQL query builder

pub mod config;
pub mod domain;
pub mod dto;
pub mod query;
