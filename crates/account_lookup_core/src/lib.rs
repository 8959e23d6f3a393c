//! Salesforce account lookup domain primitives.
//!
//! This crate owns request validation, SOQL construction, and the mapping of
//! Salesforce query payloads into the public account contract. It
//! intentionally excludes the Lambda runtime and HTTP client concerns.

pub mod contract;
pub mod error;
pub mod mapping;
pub mod soql;
