// src/models/server.rs
use serde::{Deserialize, Serialize};

/// Default UDP port the game itself is hosted on.
pub const DEFAULT_GAME_PORT: u16 = 7777;
/// Default UDP port the server answers pings on (usually in the 30xx range).
pub const DEFAULT_PING_PORT: u16 = 3075;
/// Default UDP port for A2S status queries.
pub const DEFAULT_QUERY_PORT: u16 = 7071;

pub const DEFAULT_SERVER_NAME: &str = "Chivalry 2 Server";
pub const DEFAULT_DESCRIPTION: &str = "No description";
pub const DEFAULT_MAP: &str = "Unknown";

/// Player counts are reported as -1 until the server knows better.
pub const UNKNOWN_COUNT: i32 = -1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerPorts {
    pub game: u16,
    pub ping: u16,
    pub a2s: u16,
}

impl Default for ServerPorts {
    fn default() -> Self {
        Self {
            game: DEFAULT_GAME_PORT,
            ping: DEFAULT_PING_PORT,
            a2s: DEFAULT_QUERY_PORT,
        }
    }
}

/// A server listing as sent to the backend when registering.
///
/// This is exactly the registration body: the nested `ports` object plus the
/// six top-level fields the backend expects, nothing more.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerListing {
    pub ports: ServerPorts,
    pub name: String,
    pub description: String,
    pub current_map: String,
    pub player_count: i32,
    pub max_players: i32,
    // Unimplemented backend-side; sent as an empty list until mod downloads
    // land in the backend.
    pub mods: Vec<String>,
}

impl Default for ServerListing {
    fn default() -> Self {
        Self {
            ports: ServerPorts::default(),
            name: DEFAULT_SERVER_NAME.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            current_map: DEFAULT_MAP.to_string(),
            player_count: UNKNOWN_COUNT,
            max_players: UNKNOWN_COUNT,
            mods: Vec::new(),
        }
    }
}

/// Live status fields that can change after registration. Sending these does
/// not renew the refresh deadline; only a heartbeat does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub player_count: i32,
    pub max_players: i32,
    pub current_map: String,
}

/// What the backend hands back for a successful registration. The key is the
/// only credential for later calls and is never re-issued; hold on to it.
#[derive(Debug, Clone)]
pub struct Registration {
    pub unique_id: String,
    pub key: String,
    /// Unix-epoch-like timestamp. A heartbeat must land before this moment or
    /// the backend drops the listing. Opaque beyond comparing against now.
    pub refresh_before: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_body_has_exactly_the_expected_fields() {
        let body = serde_json::to_value(ServerListing::default()).unwrap();
        let obj = body.as_object().unwrap();

        let mut keys: Vec<&str> = obj.keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "current_map",
                "description",
                "max_players",
                "mods",
                "name",
                "player_count",
                "ports",
            ]
        );

        let mut port_keys: Vec<&str> = obj["ports"]
            .as_object()
            .unwrap()
            .keys()
            .map(|k| k.as_str())
            .collect();
        port_keys.sort_unstable();
        assert_eq!(port_keys, vec!["a2s", "game", "ping"]);
    }

    #[test]
    fn default_listing_matches_domain_defaults() {
        let listing = ServerListing::default();
        assert_eq!(listing.ports.game, 7777);
        assert_eq!(listing.ports.ping, 3075);
        assert_eq!(listing.ports.a2s, 7071);
        assert_eq!(listing.name, "Chivalry 2 Server");
        assert_eq!(listing.description, "No description");
        assert_eq!(listing.current_map, "Unknown");
        assert_eq!(listing.player_count, -1);
        assert_eq!(listing.max_players, -1);
        assert!(listing.mods.is_empty());
    }

    #[test]
    fn update_body_serializes_all_three_fields() {
        let update = StatusUpdate {
            player_count: 12,
            max_players: 64,
            current_map: "ffa_courtyard".to_string(),
        };
        let body = serde_json::to_value(&update).unwrap();
        assert_eq!(body["player_count"], 12);
        assert_eq!(body["max_players"], 64);
        assert_eq!(body["current_map"], "ffa_courtyard");
        assert_eq!(body.as_object().unwrap().len(), 3);
    }
}
