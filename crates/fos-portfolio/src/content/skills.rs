//! Skill bars

use fos_dom::{DomResult, DomTree, NodeId};

use crate::{Section, SiteError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    pub name: String,
    /// Percentage, 0-100
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<Skill>,
}

impl SkillCategory {
    fn from_pairs(name: &str, pairs: &[(&str, u8)]) -> Self {
        Self {
            name: name.to_string(),
            skills: pairs
                .iter()
                .map(|&(name, level)| Skill { name: name.to_string(), level })
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SkillsSection {
    categories: Vec<SkillCategory>,
}

impl SkillsSection {
    pub fn new(categories: Vec<SkillCategory>) -> Result<Self, SiteError> {
        for skill in categories.iter().flat_map(|c| &c.skills) {
            if skill.level > 100 {
                return Err(SiteError::SkillLevel {
                    skill: skill.name.clone(),
                    level: skill.level,
                });
            }
        }
        Ok(Self { categories })
    }

    /// The skill set shown on the portfolio
    pub fn portfolio() -> Self {
        Self {
            categories: vec![
                SkillCategory::from_pairs(
                    "Data Science",
                    &[("R", 100), ("Git", 80), ("Bash", 80), ("Python", 50), ("SQL", 40)],
                ),
                SkillCategory::from_pairs(
                    "Web Dev",
                    &[("JS/TS", 80), ("HTML/CSS", 80), ("NodeJS", 60), ("Astro", 50), ("React", 50)],
                ),
                SkillCategory::from_pairs(
                    "Analytics",
                    &[("GIS", 100), ("GLMMs", 90), ("Data Viz", 90), ("Ordinations", 80), ("Machine Learning", 50)],
                ),
            ],
        }
    }

    pub fn categories(&self) -> &[SkillCategory] {
        &self.categories
    }
}

impl Section for SkillsSection {
    fn id(&self) -> &str {
        "skills"
    }

    fn render(&self, tree: &mut DomTree, parent: NodeId) -> DomResult<()> {
        let list = tree.append_element(parent, "div")?;
        tree.set_attribute(list, "class", "skills")?;

        for category in &self.categories {
            let column = tree.append_element(list, "div")?;
            tree.set_attribute(column, "class", "skill-category")?;
            let heading = tree.append_element(column, "h2")?;
            tree.append_text(heading, category.name.as_str())?;

            for skill in &category.skills {
                let row = tree.append_element(column, "div")?;
                tree.set_attribute(row, "class", "skill")?;
                let name = tree.append_element(row, "h3")?;
                tree.append_text(name, skill.name.as_str())?;

                let track = tree.append_element(row, "div")?;
                tree.set_attribute(track, "class", "skill-bar")?;
                let fill = tree.append_element(track, "div")?;
                tree.set_attribute(fill, "class", "skill-level")?;
                tree.set_attribute(fill, "style", format!("width: {}%;", skill.level))?;
            }
        }
        Ok(())
    }
}
