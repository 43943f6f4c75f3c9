#![forbid(unsafe_code)]

pub mod clock;
pub mod domain;
pub mod engine;
mod error;
pub mod observation;
pub mod sink;
pub mod tracker;

pub use engine::{Engine, SAMPLE_INTERVAL, Services, TickReport};
pub use error::Error;
pub use tracker::ActivityTracker;
