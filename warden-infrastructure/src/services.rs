pub mod heartbeat;
pub mod kick_service;
pub mod log_tailer;

pub use heartbeat::*;
pub use kick_service::*;
pub use log_tailer::*;
