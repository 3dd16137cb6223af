// Whitelist records as stored by the external allow-list file

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Deserialize)]
pub struct WhitelistEntry {
    #[serde(default)]
    pub game_name: String,
    #[serde(default)]
    pub identity_id: String,
    #[serde(default, deserialize_with = "flag_from_int_or_bool")]
    pub whitelisted: bool,
}

impl WhitelistEntry {
    /// Case-insensitive match on either the game name or the identity id.
    /// Only entries actually flagged as whitelisted can match.
    pub fn allows(&self, player_name: &str, identity_id: &str) -> bool {
        self.whitelisted
            && (self.game_name.eq_ignore_ascii_case(player_name)
                || self.identity_id.eq_ignore_ascii_case(identity_id))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct WhitelistDocument {
    #[serde(default)]
    pub players: Vec<WhitelistEntry>,
}

impl WhitelistDocument {
    pub fn allows(&self, player_name: &str, identity_id: &str) -> bool {
        self.players
            .iter()
            .any(|entry| entry.allows(player_name, identity_id))
    }
}

// The file format stores the flag as 0/1; accept a plain bool as well.
// Only an exact 1 counts, any other integer leaves the entry disabled.
fn flag_from_int_or_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Int(value) => value == 1,
    })
}
