use serde::Serialize;

use super::commondtos::CategoryDto;
use crate::service::forms::ProfileForm;
use crate::service::profile_service::ProfilePage;

#[derive(Debug, Serialize)]
pub struct ProfilePageDto {
    pub form: ProfileForm,
    pub registered_as_worker: bool,
    pub categories: Vec<CategoryDto>,
}

impl From<ProfilePage> for ProfilePageDto {
    fn from(page: ProfilePage) -> Self {
        ProfilePageDto {
            categories: CategoryDto::from_categories(&page.categories),
            form: page.form,
            registered_as_worker: page.registered_as_worker,
        }
    }
}
