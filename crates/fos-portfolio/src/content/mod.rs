//! Page content
//!
//! Inert data rendered straight into the DOM. None of it knows about the
//! reveal engine; the page host wraps whole sections.

mod skills;
mod citations;
mod footer;
mod analytics;

pub use skills::{Skill, SkillCategory, SkillsSection};
pub use citations::{Citation, CitationsSection};
pub use footer::Footer;
pub use analytics::AnalyticsTag;

use fos_dom::{DomResult, DomTree, NodeId};

/// A block of content that can live inside a reveal wrapper
pub trait Section {
    /// Written to the wrapper's `id` attribute
    fn id(&self) -> &str;

    /// Append the section's markup under `parent`
    fn render(&self, tree: &mut DomTree, parent: NodeId) -> DomResult<()>;
}
