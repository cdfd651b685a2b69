//! Integration tests for the start-session route.
//!
//! `common` holds the mock agent server and request helpers; the test modules
//! cover forwarding, upstream error relay, and failure normalization.

pub mod errors_test;
