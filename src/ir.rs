use serde::Serialize;

/// Channel role attached to a viewer. Only moderators and VIPs get a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    None,
    Moderator,
    Vip,
}

impl Role {
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "mod" | "moderator" => Self::Moderator,
            "vip" => Self::Vip,
            _ => Self::None,
        }
    }

    pub fn has_badge(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Id of the `<pattern>` the badge rect is filled with.
    pub fn badge_pattern_id(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Moderator => Some("mod_badge"),
            Self::Vip => Some("vip_badge"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub text: String,
    pub color: String,
    pub role: Role,
}

impl Entry {
    /// Builds an entry with its text normalized to uppercase.
    pub fn new(text: &str, color: impl Into<String>, role: Role) -> Self {
        Self {
            text: text.trim().to_uppercase(),
            color: color.into(),
            role,
        }
    }

    pub fn has_decoration(&self) -> bool {
        self.role.has_badge()
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}
