//! Exact-match filters for course listing.

/// Exact-match predicates applied when listing courses.
///
/// Every set field must match; an empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    /// Course id
    pub id: Option<u64>,
    /// Course name, compared byte for byte
    pub name: Option<String>,
}

impl CourseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns true if no predicate is set.
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.name.is_none()
    }

    /// Checks a course's id and name against the filter.
    pub fn matches(&self, id: u64, name: &str) -> bool {
        self.id.map_or(true, |wanted| wanted == id)
            && self.name.as_deref().map_or(true, |wanted| wanted == name)
    }
}
