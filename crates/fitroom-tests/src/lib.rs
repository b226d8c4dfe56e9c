//! Fitroom End-to-End Test Infrastructure
//!
//! This crate provides integration tests for the shape-key flows:
//!
//! - Playground: asset loading, slider grouping, value application
//! - Configs: export, validation, atomic import
//! - CLI: inspect, validate, export and apply against on-disk scenes
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p fitroom-tests
//! ```

pub mod fixtures;

// Re-export commonly used items
pub use fixtures::{
    all_influences, body_asset, influences, jacket_asset, sample_playground, skirt_asset,
    SceneFixture,
};
