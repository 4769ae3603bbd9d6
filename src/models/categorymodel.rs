use serde::{Deserialize, Serialize};

pub const DEFAULT_CATEGORY_NAME: &str = "Uncategorized";
pub const DEFAULT_CATEGORY_ICON: &str = "briefcase";

/// Externally seeded lookup row. Read-only from this service.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone, PartialEq)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub icon: Option<String>,
}

/// Display label for a category reference that may not resolve.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CategoryLabel {
    pub id: Option<i32>,
    pub name: String,
    pub icon: String,
}

impl CategoryLabel {
    pub fn resolve(id: Option<i32>, name: Option<String>, icon: Option<String>) -> Self {
        match name {
            Some(name) => CategoryLabel {
                id,
                name,
                icon: icon.unwrap_or_else(|| DEFAULT_CATEGORY_ICON.to_string()),
            },
            None => CategoryLabel::fallback(id),
        }
    }

    pub fn fallback(id: Option<i32>) -> Self {
        CategoryLabel {
            id,
            name: DEFAULT_CATEGORY_NAME.to_string(),
            icon: DEFAULT_CATEGORY_ICON.to_string(),
        }
    }
}

impl From<&Category> for CategoryLabel {
    fn from(category: &Category) -> Self {
        CategoryLabel::resolve(
            Some(category.id),
            Some(category.name.clone()),
            category.icon.clone(),
        )
    }
}
