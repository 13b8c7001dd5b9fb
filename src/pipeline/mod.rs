//! Session driving and training pipeline
//!
//! This module provides:
//! - The session driver that seats two agents and plays episodes
//! - A training loop over many episodes with pluggable observers
//! - Progress and metrics observers

pub mod observers;
pub mod session;
pub mod training;

pub use observers::{MetricsObserver, MetricsSummary, ProgressObserver};
pub use session::{EpisodeReport, Session};
pub use training::{TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::Observer;
