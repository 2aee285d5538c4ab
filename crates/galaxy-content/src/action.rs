use serde::{Deserialize, Serialize};

/// What hitting or clicking a signboard should open.
///
/// Serialized with a `type` tag, e.g. `{"type": "project", "id": "pap"}`.
/// Lookup keys are optional so a half-written scene entry still loads; a
/// missing key simply resolves to no content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    Profile,
    Skills {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        category: Option<String>,
    },
    Project {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },
    Link {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
}

impl Action {
    /// Tag name as written in scene files.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Profile => "profile",
            Action::Skills { .. } => "skills",
            Action::Project { .. } => "project",
            Action::Link { .. } => "link",
        }
    }

    #[must_use]
    pub fn skills(category: impl Into<String>) -> Self {
        Action::Skills {
            category: Some(category.into()),
        }
    }

    #[must_use]
    pub fn project(id: impl Into<String>) -> Self {
        Action::Project {
            id: Some(id.into()),
        }
    }

    #[must_use]
    pub fn link(url: impl Into<String>) -> Self {
        Action::Link {
            url: Some(url.into()),
        }
    }
}
