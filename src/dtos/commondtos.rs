use serde::{Deserialize, Serialize};

use crate::error::HttpError;
use crate::models::categorymodel::{Category, CategoryLabel};
use crate::service::listing::ListingView;
use crate::service::outcome::Navigation;

/// Placeholder value the filter dropdowns send for "any".
pub const ANY_FILTER: &str = "_all";

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: &str, data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
            data: Some(data),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
    pub icon: String,
    pub browse: Navigation,
}

impl From<&Category> for CategoryDto {
    fn from(category: &Category) -> Self {
        let label = CategoryLabel::from(category);
        CategoryDto {
            id: category.id,
            name: label.name,
            icon: label.icon,
            browse: Navigation::workers_in(category),
        }
    }
}

impl CategoryDto {
    pub fn from_categories(categories: &[Category]) -> Vec<CategoryDto> {
        categories.iter().map(CategoryDto::from).collect()
    }
}

/// Wire shape of one listing's current state.
#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ListingDto<T> {
    Ready {
        items: Vec<T>,
        #[serde(skip_serializing_if = "Option::is_none")]
        empty_message: Option<String>,
    },
    Loading,
    Failed {
        message: String,
        retryable: bool,
    },
    LoginRequired {
        message: String,
        login: Navigation,
    },
}

impl<T> ListingDto<T> {
    pub fn from_view<S>(
        view: ListingView<'_, S>,
        to_dto: impl Fn(&S) -> T,
        empty_message: &str,
        login_message: &str,
    ) -> Self {
        match view {
            ListingView::Ready(items) => {
                let empty_message = items.is_empty().then(|| empty_message.to_string());
                ListingDto::Ready {
                    items: items.into_iter().map(|item| to_dto(item)).collect(),
                    empty_message,
                }
            }
            ListingView::Loading => ListingDto::Loading,
            ListingView::Failed(failure) => ListingDto::Failed {
                message: failure.message.clone(),
                retryable: failure.retryable,
            },
            ListingView::LoginRequired => ListingDto::LoginRequired {
                message: login_message.to_string(),
                login: Navigation::to(crate::service::error::AUTH_PATH),
            },
        }
    }
}

/// Reads an optional dropdown value. Blank and [`ANY_FILTER`] mean unspecified.
pub fn optional_filter(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty() && *value != ANY_FILTER)
}

pub fn parse_category_param(raw: Option<&str>) -> Result<Option<i32>, HttpError> {
    optional_filter(raw)
        .map(|value| {
            value
                .parse::<i32>()
                .map_err(|_| HttpError::bad_request(format!("Invalid category: {}", value)))
        })
        .transpose()
}
