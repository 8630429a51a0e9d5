// src/config.rs
use std::env;

use crate::models::server::{
    ServerListing, ServerPorts, DEFAULT_DESCRIPTION, DEFAULT_GAME_PORT, DEFAULT_MAP,
    DEFAULT_PING_PORT, DEFAULT_QUERY_PORT, DEFAULT_SERVER_NAME, UNKNOWN_COUNT,
};

#[derive(Clone)]
pub struct Config {
    // Backend to register with
    pub address: String,

    // Listing fields
    pub game_port: u16,
    pub ping_port: u16,
    pub query_port: u16,
    pub name: String,
    pub description: String,
    pub current_map: String,
    pub max_players: i32,

    // How many seconds before the refresh deadline the agent heartbeats
    pub heartbeat_margin_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: "http://127.0.0.1:8080".to_string(),
            game_port: DEFAULT_GAME_PORT,
            ping_port: DEFAULT_PING_PORT,
            query_port: DEFAULT_QUERY_PORT,
            name: DEFAULT_SERVER_NAME.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            current_map: DEFAULT_MAP.to_string(),
            max_players: UNKNOWN_COUNT,
            heartbeat_margin_secs: 30,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            address: env::var("SERVER_BROWSER_ADDRESS")
                .unwrap_or_else(|_| "http://127.0.0.1:8080".to_string()),

            game_port: env::var("GAME_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_GAME_PORT),

            ping_port: env::var("PING_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PING_PORT),

            query_port: env::var("QUERY_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_QUERY_PORT),

            name: env::var("SERVER_NAME").unwrap_or_else(|_| DEFAULT_SERVER_NAME.to_string()),

            description: env::var("SERVER_DESCRIPTION")
                .unwrap_or_else(|_| DEFAULT_DESCRIPTION.to_string()),

            current_map: env::var("CURRENT_MAP").unwrap_or_else(|_| DEFAULT_MAP.to_string()),

            max_players: env::var("MAX_PLAYERS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(UNKNOWN_COUNT),

            heartbeat_margin_secs: env::var("HEARTBEAT_MARGIN_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }

    /// The listing this configuration describes, ready to register.
    pub fn listing(&self) -> ServerListing {
        ServerListing {
            ports: ServerPorts {
                game: self.game_port,
                ping: self.ping_port,
                a2s: self.query_port,
            },
            name: self.name.clone(),
            description: self.description.clone(),
            current_map: self.current_map.clone(),
            player_count: UNKNOWN_COUNT,
            max_players: self.max_players,
            mods: Vec::new(),
        }
    }
}
