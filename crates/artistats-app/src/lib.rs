//! Artist popularity analysis pipeline

pub mod notifier;
pub mod pipeline;

pub use notifier::Notifier;
pub use pipeline::{Pipeline, PipelineReport};
