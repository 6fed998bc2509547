use serde::{Deserialize, Serialize};

/// Lifecycle flag every managed record carries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    Enabled,
    Disabled,
}

impl Status {
    pub const ALL: [Status; 2] = [Status::Enabled, Status::Disabled];

    /// Wire value, also used as the filter value and the DB column value
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Enabled => "ENABLED",
            Status::Disabled => "DISABLED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "ENABLED" => Some(Status::Enabled),
            "DISABLED" => Some(Status::Disabled),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Enabled => "Enabled",
            Status::Disabled => "Disabled",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Status::Enabled => Status::Disabled,
            Status::Disabled => Status::Enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Status::Enabled)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
