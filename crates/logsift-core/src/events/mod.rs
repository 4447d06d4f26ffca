//! Pipeline event system.
//! Handlers observe stage progress and non-fatal failures without owning
//! any pipeline state.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::PipelineEventHandler;
pub use types::*;
