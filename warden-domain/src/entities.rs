pub mod config;
pub mod player_event;
pub mod whitelist;

pub use config::*;
pub use player_event::*;
pub use whitelist::*;
