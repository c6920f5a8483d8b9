use std::collections::BTreeMap;

use crate::storage::CategoriesConfig;

/// Colour used for categories without an entry.
pub const FALLBACK_COLOR: &str = "#FFFFFF";

/// Category -> `#RRGGBB` display colour.
#[derive(Debug, Clone)]
pub struct CategoryPalette {
    colors: BTreeMap<String, String>,
}

impl CategoryPalette {
    pub fn new(colors: BTreeMap<String, String>) -> Self {
        Self { colors }
    }

    pub fn from_config(categories: &CategoriesConfig) -> Self {
        Self::new(categories.colors.clone())
    }

    pub fn color_for(&self, category: &str) -> &str {
        self.colors
            .get(category)
            .map(String::as_str)
            .unwrap_or(FALLBACK_COLOR)
    }
}

impl Default for CategoryPalette {
    fn default() -> Self {
        Self::from_config(&CategoriesConfig::default())
    }
}
