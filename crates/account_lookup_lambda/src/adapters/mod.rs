pub mod salesforce;
