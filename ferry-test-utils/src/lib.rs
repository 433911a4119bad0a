//! Test utilities shared across the ferry workspace
//!
//! This crate provides common testing infrastructure including:
//! - In-memory `.tar.gz` archives ([`TarballBuilder`], [`lua_source_tarball`])
//! - Isolated working directory and project trees ([`BuildDirsGuard`])
//! - Isolated ferry config and cache directories ([`ConfigHomeGuard`])
//!
//! The dead_code lint is disabled for this crate because test utilities may
//! not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod archive;
pub mod dirs;

pub use archive::{TarballBuilder, lua_source_tarball};
pub use dirs::{BuildDirsGuard, ConfigHomeGuard};
