//! Test fixtures for route-optimizer.
//!
//! Provides:
//! - Collection stops (depot plus two daily rounds)
//! - A fake directions provider with canned replies

#![allow(dead_code)]

pub mod collection_points;
pub mod fake_provider;

pub use collection_points::*;
pub use fake_provider::*;
