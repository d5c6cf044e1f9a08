use serde::{Deserialize, Serialize};

/// Sent to the service when the user leaves the theme empty.
pub const DEFAULT_THEME: &str = "a little bit of everything";

/// A single modpack generation request, built right before each send
/// and thrown away once the response is handled.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ModpackRequest {
    pub game_version: String,
    pub loader: String,
    pub theme: String,
}

impl ModpackRequest {
    pub fn new(game_version: String, loader: String, theme: String) -> Self {
        // empty only, whitespace themes are taken as typed
        let theme = if theme.is_empty() { DEFAULT_THEME.to_string() } else { theme };
        ModpackRequest { game_version, loader, theme }
    }

    pub fn archive_name(&self) -> String {
        format!("minecraft_{}_{}_modpack.zip", self.game_version, self.loader)
    }
}
