//! Integration test suite for bpl
//!
//! End-to-end tests that run the `bpl` binary against template trees in
//! temporary directories.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **generate**: value sources, name and content substitution, conflicts
//! - **strict**: strict-mode failures and the single-delimiter convention
//! - **ignore**: extension, name and directory ignore rules
//! - **describe**: the `describe` report
//! - **generate_config**: blank configuration files and filling them in

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod describe;
mod generate;
mod generate_config;
mod ignore;
mod strict;
