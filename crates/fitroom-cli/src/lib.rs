//! Fitroom CLI library.
//!
//! This crate provides the command implementations behind the `fitroom`
//! binary, plus the scene loader that turns manifests and glTF files into
//! loaded assets.

pub mod commands;
pub mod scene;
