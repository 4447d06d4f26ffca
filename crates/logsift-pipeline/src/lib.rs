//! # logsift-pipeline
//!
//! Single-threaded batch driver: each stage's output is the next stage's
//! full input. Collaborators (index backend, lexicon) are handed in at
//! construction; nothing is global.

pub mod inputs;
pub mod outputs;
pub mod pipeline;
mod stage;
pub mod summary;

pub use inputs::PipelineInput;
pub use outputs::{PipelineOutputs, RecoveryResult};
pub use pipeline::Pipeline;
pub use summary::{DateWindow, Frequency, FrequencyTables, Summary};
