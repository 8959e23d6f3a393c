//! AWS-oriented adapters and handlers for the Salesforce account lookup.
//!
//! This crate owns runtime integration details (the Lambda handler, the
//! outbound Salesforce client, configuration, and logging) and exposes a
//! single runtime module boundary for the domain primitives.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod logging;
pub mod runtime;
