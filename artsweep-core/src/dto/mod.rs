//! Data Transfer Objects for the artifact repository API
//!
//! Response bodies returned by the remote service. Only the fields the
//! cleanup run reads are modelled; everything else is ignored.

pub mod copy;
pub mod search;
