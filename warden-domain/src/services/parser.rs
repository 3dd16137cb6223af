// Extracts player join events from raw console log lines

use once_cell::sync::Lazy;
use regex::Regex;

use crate::entities::{PlayerAction, PlayerEvent};

// The identity id is a UUID-like lowercase hex token; no further validation
// is done on it here.
static JOIN_EVENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(Creating|Updating) player: PlayerId=(\d+), Name=([^,]+), IdentityId=([a-f0-9-]+)")
        .expect("join event pattern")
});

#[derive(Debug, Default)]
pub struct JoinEventParser;

impl JoinEventParser {
    pub fn new() -> Self {
        Self
    }

    /// Returns the structured event for a `Creating player` / `Updating
    /// player` line, or `None` for anything else. A match anywhere within
    /// the line is accepted; the rest of the line is ignored.
    pub fn parse(&self, line: &str) -> Option<PlayerEvent> {
        let captures = JOIN_EVENT.captures(line)?;
        let action = match &captures[1] {
            "Creating" => PlayerAction::Created,
            _ => PlayerAction::Updated,
        };
        Some(PlayerEvent {
            action,
            player_id: captures[2].to_string(),
            player_name: captures[3].trim().to_string(),
            identity_id: captures[4].to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_updating_player_line() {
        let parser = JoinEventParser::new();
        let line = "21:47:01.223 SCRIPT : Updating player: PlayerId=3, Name=TestGamertag, IdentityId=6fa40f96-f8e9-44ac-be26-e0660c79b88a";
        let event = parser.parse(line).expect("line should match");
        assert_eq!(event.action, PlayerAction::Updated);
        assert_eq!(event.player_id, "3");
        assert_eq!(event.player_name, "TestGamertag");
        assert_eq!(event.identity_id, "6fa40f96-f8e9-44ac-be26-e0660c79b88a");
    }

    #[test]
    fn parses_creating_player_line() {
        let parser = JoinEventParser::new();
        let line = "Creating player: PlayerId=17, Name=Someone Else, IdentityId=00000000-0000-0000-0000-000000000001";
        let event = parser.parse(line).expect("line should match");
        assert_eq!(event.action, PlayerAction::Created);
        assert_eq!(event.player_id, "17");
        assert_eq!(event.player_name, "Someone Else");
    }

    #[test]
    fn trims_whitespace_around_player_name() {
        let parser = JoinEventParser::new();
        let line = "Updating player: PlayerId=5, Name=  Padded  , IdentityId=6fa40f96-f8e9-44ac-be26-e0660c79b88a";
        let event = parser.parse(line).expect("line should match");
        assert_eq!(event.player_name, "Padded");
    }

    #[test]
    fn ignores_unrelated_lines() {
        let parser = JoinEventParser::new();
        assert!(parser.parse("").is_none());
        assert!(parser.parse("21:47:01.223 ENGINE : Game started").is_none());
        assert!(parser
            .parse("Deleting player: PlayerId=3, Name=Gone, IdentityId=abc-123")
            .is_none());
        // Missing identity id field
        assert!(parser
            .parse("Updating player: PlayerId=3, Name=NoIdentity")
            .is_none());
    }
}
