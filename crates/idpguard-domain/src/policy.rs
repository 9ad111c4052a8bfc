use crate::checks::CheckSpec;
use idpguard_types::Category;

/// Which registered checks a run executes.
///
/// Every filter is optional; `None` means "no restriction". Present filters
/// compose by intersection: include, then exclude, then categories.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunFilters {
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub categories: Option<Vec<Category>>,
}

impl RunFilters {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn admits(&self, spec: &CheckSpec) -> bool {
        if let Some(include) = &self.include
            && !include.iter().any(|id| *id == spec.id)
        {
            return false;
        }
        if let Some(exclude) = &self.exclude
            && exclude.iter().any(|id| *id == spec.id)
        {
            return false;
        }
        if let Some(categories) = &self.categories
            && !categories.contains(&spec.category)
        {
            return false;
        }
        true
    }
}
