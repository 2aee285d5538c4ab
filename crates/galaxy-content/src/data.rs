//! Content records as stored in the content file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub bio: String,
    /// Portrait shown beside the profile panel.
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    pub name: String,
    /// Proficiency in percent.
    pub level: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectLinks {
    pub repo: Option<String>,
    pub demo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub summary: Option<String>,
    pub description: String,
    pub category: String,
    pub status: String,
    pub links: ProjectLinks,
    pub thumb: Option<String>,
}

/// Everything a content file holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentData {
    pub profile: Option<Profile>,
    /// Skills keyed by category id.
    pub skills: BTreeMap<String, Vec<Skill>>,
    pub projects: Vec<Project>,
}
