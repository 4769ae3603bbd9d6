// db/categorydb.rs
use async_trait::async_trait;
use sqlx::Error;

use super::db::DBClient;
use crate::models::categorymodel::Category;

#[async_trait]
pub trait CategoryExt {
    async fn get_categories(&self) -> Result<Vec<Category>, Error>;
}

#[async_trait]
impl CategoryExt for DBClient {
    async fn get_categories(&self) -> Result<Vec<Category>, Error> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, icon
            FROM categories
            ORDER BY id
            "#
        )
        .fetch_all(&self.pool)
        .await
    }
}
