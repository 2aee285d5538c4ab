//! Panel payloads built from an action and the content provider.

use crate::action::Action;
use crate::provider::ContentProvider;

/// Accent used by profile, skills and link panels.
pub const ACCENT_DEFAULT: &str = "#00d4ff";
/// Accent used by project panels.
pub const ACCENT_PROJECT: &str = "#ff6b35";

/// One row of a skills panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelItem {
    pub name: String,
    pub level: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelLinks {
    pub repo: Option<String>,
    pub demo: Option<String>,
    pub link: Option<String>,
}

/// What a content panel displays.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelPayload {
    pub action: Action,
    pub title: String,
    pub subtitle: Option<String>,
    pub body: Option<String>,
    pub items: Vec<PanelItem>,
    pub links: PanelLinks,
    /// `#rrggbb` accent for the panel border and title.
    pub accent: String,
    pub photo: Option<String>,
    pub thumb: Option<String>,
}

impl PanelPayload {
    fn new(action: &Action, title: String, accent: &str) -> Self {
        Self {
            action: action.clone(),
            title,
            subtitle: None,
            body: None,
            items: Vec::new(),
            links: PanelLinks::default(),
            accent: accent.to_string(),
            photo: None,
            thumb: None,
        }
    }
}

/// Resolves an action into a panel payload.
///
/// Returns `None` when the action lacks its lookup key or the provider has no
/// matching record.
#[must_use]
pub fn build_panel_payload(action: &Action, provider: &dyn ContentProvider) -> Option<PanelPayload> {
    match action {
        Action::Profile => {
            let p = provider.profile()?;
            let mut payload = PanelPayload::new(action, p.name.clone(), ACCENT_DEFAULT);
            payload.subtitle = Some(format!("{} • {} • {}", p.title, p.company, p.location));
            payload.body = Some(p.bio.clone());
            payload.photo = p.photo.clone();
            Some(payload)
        }
        Action::Skills { category } => {
            let category = category.as_deref()?;
            let skills = provider.skills(category)?;
            let mut payload =
                PanelPayload::new(action, format!("Skills - {category}"), ACCENT_DEFAULT);
            payload.items = skills
                .iter()
                .map(|s| PanelItem {
                    name: s.name.clone(),
                    level: s.level,
                })
                .collect();
            Some(payload)
        }
        Action::Project { id } => {
            let project = provider.project_by_id(id.as_deref()?)?;
            let mut payload = PanelPayload::new(action, project.title.clone(), ACCENT_PROJECT);
            payload.body = Some(
                project
                    .summary
                    .clone()
                    .unwrap_or_else(|| project.description.clone()),
            );
            payload.links.repo = project.links.repo.clone();
            payload.links.demo = project.links.demo.clone();
            payload.thumb = project.thumb.clone();
            Some(payload)
        }
        Action::Link { url } => {
            let url = url.as_deref()?;
            let mut payload = PanelPayload::new(action, "Open link".to_string(), ACCENT_DEFAULT);
            payload.links.link = Some(url.to_string());
            Some(payload)
        }
    }
}
