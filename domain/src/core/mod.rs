//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: text-generation models a persona can run on
//! - [`topic::Topic`]: a validated subject for a deliberation
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod topic;
