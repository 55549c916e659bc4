//! fOS Portfolio
//!
//! A static portfolio page: skills, publications and a footer, with each
//! content section wrapped in a [`FadeIn`](fos_reveal::FadeIn) so it reveals
//! itself as it scrolls into view.

mod error;
mod config;
mod page;
pub mod content;

pub use error::SiteError;
pub use config::{SiteConfig, Viewport};
pub use page::PortfolioPage;
pub use content::{
    AnalyticsTag, Citation, CitationsSection, Footer, Section, Skill, SkillCategory, SkillsSection,
};
