//! Google Analytics tag
//!
//! Injects the async `gtag.js` loader and the inline `dataLayer` bootstrap
//! into `<head>`.

use fos_dom::{DomResult, DomTree, NodeId};

use crate::SiteError;

const GTAG_URL: &str = "https://www.googletagmanager.com/gtag/js";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsTag {
    measurement_id: String,
}

impl AnalyticsTag {
    /// Accepts GA4 ids of the form `G-` followed by uppercase letters and digits
    pub fn new(measurement_id: &str) -> Result<Self, SiteError> {
        let valid = measurement_id
            .strip_prefix("G-")
            .is_some_and(|rest| {
                (4..=16).contains(&rest.len())
                    && rest.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
            });
        if !valid {
            return Err(SiteError::InvalidMeasurementId(measurement_id.to_string()));
        }
        Ok(Self {
            measurement_id: measurement_id.to_string(),
        })
    }

    pub fn measurement_id(&self) -> &str {
        &self.measurement_id
    }

    pub fn script_src(&self) -> String {
        format!("{GTAG_URL}?id={}", self.measurement_id)
    }

    pub fn bootstrap_script(&self) -> String {
        format!(
            "window.dataLayer = window.dataLayer || [];\
             function gtag(){{dataLayer.push(arguments);}}\
             gtag('js', new Date());\
             gtag('config', '{}');",
            self.measurement_id
        )
    }

    /// Append both scripts to `head`
    pub fn inject(&self, tree: &mut DomTree, head: NodeId) -> DomResult<()> {
        let loader = tree.append_element(head, "script")?;
        tree.set_attribute(loader, "async", "")?;
        tree.set_attribute(loader, "src", self.script_src())?;

        let bootstrap = tree.append_element(head, "script")?;
        tree.append_text(bootstrap, self.bootstrap_script())?;
        tracing::debug!(id = %self.measurement_id, "analytics tag injected");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ids() {
        assert!(AnalyticsTag::new("G-WY3MGM0JN2").is_ok());
        for bad in ["", "G-", "G-abc123", "UA-123456-1", "G-ABC", "G-ABC 123"] {
            assert!(AnalyticsTag::new(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_inject() {
        let tag = AnalyticsTag::new("G-TEST1234").unwrap();
        let mut tree = DomTree::new();
        let head = tree.append_element(tree.root(), "head").unwrap();
        tag.inject(&mut tree, head).unwrap();

        let html = tree.inner_html(head);
        assert!(html.starts_with(
            "<script async=\"\" src=\"https://www.googletagmanager.com/gtag/js?id=G-TEST1234\"></script><script>"
        ));
        assert!(html.contains("gtag('config', 'G-TEST1234');"));
    }
}
