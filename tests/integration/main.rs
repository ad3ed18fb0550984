//! Cross-layer integration tests for Tabula
//!
//! Tests that verify correct interaction between multiple crates.

mod load_session;
mod rules_corpus;
