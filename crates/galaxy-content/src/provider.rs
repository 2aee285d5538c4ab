//! Content lookups behind a trait so the engine can swap sources.

use std::path::Path;

use rustc_hash::FxHashMap;
use tracing::info;

use crate::data::{ContentData, Profile, Project, Skill};
use crate::error::ContentError;

/// Read-only access to profile, skills and project records.
pub trait ContentProvider {
    fn profile(&self) -> Option<&Profile>;

    /// Skills in one category, `None` when the category is unknown.
    fn skills(&self, category: &str) -> Option<&[Skill]>;

    fn project_by_id(&self, id: &str) -> Option<&Project>;

    fn projects_by_category(&self, category: &str) -> Vec<&Project>;

    fn projects_by_status(&self, status: &str) -> Vec<&Project>;
}

/// Provider over content loaded once into memory.
///
/// Project ids are indexed at construction; later lookups never touch the
/// source again.
#[derive(Debug, Clone, Default)]
pub struct StaticContentProvider {
    data: ContentData,
    by_id: FxHashMap<String, usize>,
}

impl StaticContentProvider {
    /// Wraps already-parsed content. When two projects share an id the
    /// first one wins.
    #[must_use]
    pub fn new(data: ContentData) -> Self {
        let mut by_id = FxHashMap::default();
        for (i, project) in data.projects.iter().enumerate() {
            by_id.entry(project.id.clone()).or_insert(i);
        }
        Self { data, by_id }
    }

    /// Parses RON content.
    pub fn from_ron_str(source: &str) -> Result<Self, ContentError> {
        let data: ContentData = ron::from_str(source).map_err(ContentError::Parse)?;
        Ok(Self::new(data))
    }

    /// Reads and parses a RON content file.
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let source = std::fs::read_to_string(path).map_err(|source| ContentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let provider = Self::from_ron_str(&source)?;
        info!(
            path = %path.display(),
            projects = provider.data.projects.len(),
            skill_categories = provider.data.skills.len(),
            "content loaded"
        );
        Ok(provider)
    }

    /// The underlying records.
    #[must_use]
    pub fn data(&self) -> &ContentData {
        &self.data
    }
}

impl ContentProvider for StaticContentProvider {
    fn profile(&self) -> Option<&Profile> {
        self.data.profile.as_ref()
    }

    fn skills(&self, category: &str) -> Option<&[Skill]> {
        self.data.skills.get(category).map(Vec::as_slice)
    }

    fn project_by_id(&self, id: &str) -> Option<&Project> {
        self.by_id.get(id).map(|&i| &self.data.projects[i])
    }

    fn projects_by_category(&self, category: &str) -> Vec<&Project> {
        self.data
            .projects
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    fn projects_by_status(&self, status: &str) -> Vec<&Project> {
        self.data
            .projects
            .iter()
            .filter(|p| p.status == status)
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SAMPLE: &str = r#"(
        profile: Some((
            name: "Ada",
            title: "Engineer",
            company: "Orbital",
            location: "Lisbon",
            bio: "Builds things that fly.",
            photo: Some("me.png"),
        )),
        skills: {
            "backend": [(name: "Rust", level: 90), (name: "Go", level: 70)],
        },
        projects: [
            (
                id: "pap",
                title: "Deliveries",
                description: "Point to point deliveries.",
                category: "mobile",
                status: "development",
                links: (repo: Some("https://example.org/pap")),
            ),
            (
                id: "solar",
                title: "Solar",
                summary: Some("Short solar pitch."),
                description: "Long solar text.",
                category: "web",
                status: "production",
                thumb: Some("solar.png"),
            ),
            (id: "pap", title: "Shadowed duplicate"),
        ],
    )"#;

    #[test]
    fn test_lookups() {
        let provider = StaticContentProvider::from_ron_str(SAMPLE).unwrap();
        assert_eq!(provider.profile().unwrap().name, "Ada");
        assert_eq!(provider.skills("backend").unwrap().len(), 2);
        assert!(provider.skills("frontend").is_none());
        assert_eq!(provider.project_by_id("pap").unwrap().title, "Deliveries");
        assert!(provider.project_by_id("missing").is_none());
        assert_eq!(provider.projects_by_category("web").len(), 1);
        assert_eq!(provider.projects_by_status("production")[0].id, "solar");
    }

    #[test]
    fn test_empty_content_is_valid() {
        let provider = StaticContentProvider::from_ron_str("()").unwrap();
        assert!(provider.profile().is_none());
        assert!(provider.projects_by_status("production").is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content.ron");
        std::fs::write(&path, SAMPLE).unwrap();
        let provider = StaticContentProvider::load(&path).unwrap();
        assert_eq!(provider.data().projects.len(), 3);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = StaticContentProvider::load(&dir.path().join("nope.ron")).unwrap_err();
        assert!(matches!(missing, ContentError::Read { .. }));

        let bad = dir.path().join("bad.ron");
        std::fs::write(&bad, "(projects: [ (id: ").unwrap();
        let err = StaticContentProvider::load(&bad).unwrap_err();
        assert!(matches!(err, ContentError::Parse(_)));
    }
}
