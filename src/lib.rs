//! Shoot brief visualizer - turns a structured shoot brief into an AI-generated frame
//!
//! A user describes a planned photo/video shoot; the brief is validated,
//! formatted into a single prompt and forwarded to an OpenAI-compatible
//! provider, which returns either an image URL or a technical frame
//! description.

pub mod ai;
pub mod brief;
pub mod client;
pub mod error;
pub mod gateway;
pub mod models;
pub mod prompts;
pub mod reporting;
pub mod validation;
pub mod web;

pub use error::{Error, Result};
