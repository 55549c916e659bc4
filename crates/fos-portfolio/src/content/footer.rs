//! Page footer

use fos_dom::{DomResult, DomTree, NodeId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footer {
    pub owner: String,
    pub year: i32,
    pub logo: String,
}

impl Footer {
    pub fn new(owner: &str, year: i32, logo: &str) -> Self {
        Self {
            owner: owner.to_string(),
            year,
            logo: logo.to_string(),
        }
    }

    /// Append `<footer>` under `parent` and return it
    pub fn render(&self, tree: &mut DomTree, parent: NodeId) -> DomResult<NodeId> {
        let footer = tree.append_element(parent, "footer")?;
        tree.set_attribute(footer, "class", "footer")?;

        let logo = tree.append_element(footer, "img")?;
        tree.set_attribute(logo, "class", "logo")?;
        tree.set_attribute(logo, "src", self.logo.as_str())?;
        tree.set_attribute(logo, "alt", format!("{} logo", self.owner))?;

        tree.append_text(footer, format!("\u{a9} {} {}", self.year, self.owner))?;

        let byline = tree.append_element(footer, "small")?;
        tree.set_attribute(byline, "class", "byline")?;
        tree.append_text(byline, " Built using fOS")?;
        Ok(footer)
    }
}
