//! # TeamCity API Endpoints

pub mod builds;
