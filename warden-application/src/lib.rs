// Warden Application Layer

pub mod error;
pub mod pipeline;
pub mod state;

pub use error::PipelineError;
pub use state::AppState;
