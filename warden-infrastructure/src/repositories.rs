pub mod json_whitelist;
pub mod sqlite_whitelist;

pub use json_whitelist::*;
pub use sqlite_whitelist::*;
