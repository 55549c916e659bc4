//! Publication list

use std::path::Path;

use fos_dom::{DomResult, DomTree, NodeId};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{Section, SiteError};

/// One publication, keyed the way the exported publication list is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Citation {
    pub authors: String,
    #[serde(deserialize_with = "year_text")]
    pub year: String,
    pub title: String,
    #[serde(default)]
    pub journal: String,
    #[serde(default)]
    pub link: Option<String>,
}

/// Exports write the year either as a number or as text
fn year_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Number(u32),
        Text(String),
    }

    Ok(match Year::deserialize(deserializer)? {
        Year::Number(n) => n.to_string(),
        Year::Text(s) => s,
    })
}

impl Citation {
    /// `Authors (Year) Title Journal`
    pub fn formatted(&self) -> String {
        let mut line = format!("{} ({}) {}", self.authors, self.year, self.title);
        if !self.journal.is_empty() {
            line.push(' ');
            line.push_str(&self.journal);
        }
        line
    }
}

#[derive(Debug, Clone, Default)]
pub struct CitationsSection {
    citations: Vec<Citation>,
}

impl CitationsSection {
    pub fn new(citations: Vec<Citation>) -> Self {
        Self { citations }
    }

    pub fn from_json(json: &str) -> Result<Self, SiteError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn load(path: &Path) -> Result<Self, SiteError> {
        let json = std::fs::read_to_string(path).map_err(|source| SiteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let section = Self::from_json(&json)?;
        tracing::debug!(count = section.len(), path = %path.display(), "publications loaded");
        Ok(section)
    }

    pub fn len(&self) -> usize {
        self.citations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.citations.is_empty()
    }

    pub fn citations(&self) -> &[Citation] {
        &self.citations
    }
}

impl Section for CitationsSection {
    fn id(&self) -> &str {
        "publications"
    }

    fn render(&self, tree: &mut DomTree, parent: NodeId) -> DomResult<()> {
        let list = tree.append_element(parent, "div")?;
        tree.set_attribute(list, "class", "citations")?;

        for citation in &self.citations {
            let row = tree.append_element(list, "div")?;
            tree.set_attribute(row, "class", "citation")?;
            let line = tree.append_element(row, "h6")?;
            tree.append_text(line, citation.formatted())?;

            if let Some(link) = &citation.link {
                tree.append_text(line, " ")?;
                let anchor = tree.append_element(line, "a")?;
                tree.set_attribute(anchor, "href", link.as_str())?;
                tree.append_text(anchor, "Link")?;
            }
        }
        Ok(())
    }
}
