//! Common test utilities for Redeploy CLI tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated environment with fake `git`, `go` and `systemctl`
//! - Assertion macros: `assert_output_contains!`, `assert_called!`, etc.

#![allow(dead_code)]

pub mod env;

pub use env::*;
