pub use account_lookup_core::{contract, error, mapping, soql};
