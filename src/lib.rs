//! JSON-over-stdio adapter for EigenDA.
//!
//! Reads a single `{"action": ..., "data": ...}` request from stdin,
//! performs one operation against the EigenDA disperser (submit a blob, or
//! look up the status of a previously submitted one) and writes a single
//! JSON response to stdout. Intended to be shelled out to by a runtime that
//! cannot sign disperser requests natively.

pub mod adapter;
pub mod client;
pub mod config;
pub mod types;
