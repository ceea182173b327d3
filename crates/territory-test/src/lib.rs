//! Shared test fixtures for Territory crates.
//!
//! This crate provides small, hand-checked problems and assignments.
//! It depends only on `territory-core`, so every other crate can pull it in
//! as a dev-dependency.
//!
//! - [`problems`] - grids + requirements with known properties
//! - [`assignments`] - assignments with known scores
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! territory-test = { workspace = true }
//! ```

pub mod assignments;
pub mod problems;

pub use assignments::{checkerboard, row_stripes};
pub use problems::{ones_3x3, single_cell, skewed_weights_4x4, uniform_problem, weighted_6x6};
