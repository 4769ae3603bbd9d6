use serde::{Deserialize, Serialize};

use crate::models::categorymodel::Category;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NoticeVariant {
    Success,
    Destructive,
}

/// Transient user-facing message attached to a write result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    pub fn success(title: &str, description: &str) -> Self {
        Notice {
            title: title.to_string(),
            description: description.to_string(),
            variant: NoticeVariant::Success,
        }
    }

    pub fn destructive(title: &str, description: &str) -> Self {
        Notice {
            title: title.to_string(),
            description: description.to_string(),
            variant: NoticeVariant::Destructive,
        }
    }
}

/// Where the client should go next.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Navigation {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

#[derive(Serialize)]
struct WorkerScopeParams<'a> {
    category: i32,
    name: &'a str,
}

impl Navigation {
    pub fn to(path: &str) -> Self {
        Navigation {
            path: path.to_string(),
            query: None,
        }
    }

    /// The workers listing scoped to one category. `name` only labels the page.
    pub fn workers_in(category: &Category) -> Self {
        let params = WorkerScopeParams {
            category: category.id,
            name: &category.name,
        };
        Navigation {
            path: "/workers".to_string(),
            query: serde_urlencoded::to_string(&params).ok(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Outcome<T> {
    pub data: T,
    pub notice: Notice,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation: Option<Navigation>,
}
