use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub vip_badge_color: String,
    pub mod_badge_color: String,
    pub background: Option<String>,
}

impl Theme {
    /// Monospaced look the name grids were designed around.
    pub fn consolas() -> Self {
        Self {
            font_family: "Consolas".to_string(),
            font_size: 16.0,
            vip_badge_color: "#fb0493".to_string(),
            mod_badge_color: "#14cb04".to_string(),
            background: None,
        }
    }

    pub fn badge_color(&self, role: crate::ir::Role) -> Option<&str> {
        match role {
            crate::ir::Role::None => None,
            crate::ir::Role::Moderator => Some(self.mod_badge_color.as_str()),
            crate::ir::Role::Vip => Some(self.vip_badge_color.as_str()),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::consolas()
    }
}
