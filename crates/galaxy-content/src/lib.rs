//! Content boundary: what a signboard action points at, where the records
//! come from, and the payload a panel displays.
//!
//! The simulation never owns content. It holds a [`ContentProvider`] and asks
//! it for records by id or category; a miss is a quiet no-op.

mod action;
mod data;
mod error;
mod payload;
mod provider;

pub use action::Action;
pub use data::{ContentData, Profile, Project, ProjectLinks, Skill};
pub use error::ContentError;
pub use payload::{ACCENT_DEFAULT, ACCENT_PROJECT, PanelItem, PanelLinks, PanelPayload, build_panel_payload};
pub use provider::{ContentProvider, StaticContentProvider};
