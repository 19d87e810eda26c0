//! Repository layer
//!
//! Repositories are stateless adapters over the artifact repository
//! service. They expose the four remote calls the cleanup run makes without
//! any business logic, behind a trait so the service layer can be exercised
//! against a recording fake.

mod artifacts;

pub use artifacts::{ArtifactRepository, HttpArtifactRepository};
