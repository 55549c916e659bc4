//! Two-state visibility

/// Whether an observed element currently intersects the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisibilityState {
    #[default]
    Hidden,
    Visible,
}

impl VisibilityState {
    #[inline]
    pub fn is_visible(self) -> bool {
        self == Self::Visible
    }
}

impl From<bool> for VisibilityState {
    fn from(intersecting: bool) -> Self {
        if intersecting { Self::Visible } else { Self::Hidden }
    }
}

impl std::fmt::Display for VisibilityState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Hidden => "hidden",
            Self::Visible => "visible",
        })
    }
}
