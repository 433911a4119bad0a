//! # Ferry CLI Library
//!
//! Command handlers for the `ferry` binary: reporting build status from
//! TeamCity to Stash and building vendored third-party libraries.

pub mod cli;
pub mod clients;
pub mod consts;
pub mod panic_hook;
