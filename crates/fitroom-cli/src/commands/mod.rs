//! CLI command implementations

pub mod apply;
pub mod export;
pub mod inspect;
pub mod json_output;
pub mod validate;

mod reporting;
