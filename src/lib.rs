//! Incident Quiz
//!
//! Serves a two-page quiz over NTSB aviation incidents: a random incident is
//! shown with its key features, the visitor guesses whether the accident was
//! human error or just bad luck, and the answer is compared with a pre-fitted
//! classifier's prediction and the recorded outcome.

pub mod api;
pub mod config;
pub mod dataset;
pub mod display;
pub mod error;
pub mod ml;
pub mod models;
pub mod quiz;
pub mod state;

pub use error::{AppError, Result};
