//! Argument definitions for the `beatchart` binary, exposed for tests.

pub mod cli;
