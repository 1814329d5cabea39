//! Common utilities for tailsel.
//!
//! This crate provides shared infrastructure used by the library and the CLI:
//! - **Warning System** - colored, deduplicated terminal output for advisory
//!   diagnostics (unvalidated arbitrary variants, unresolvable classes)

pub mod warning;
