// db/db.rs
use sqlx::{Pool, Postgres};

use super::{categorydb::CategoryExt, jobdb::JobExt, profiledb::ProfileExt, workerdb::WorkerExt};

/// The hosted store. Every read and write of `categories`, `profiles`,
/// `workers` and `jobs` goes through the `*Ext` traits implemented here.
#[derive(Clone)]
pub struct DBClient {
    pub pool: Pool<Postgres>,
}

impl std::fmt::Debug for DBClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DBClient")
            .field("pool", &"Pool<Postgres>")
            .field("size", &self.pool.size())
            .finish()
    }
}

impl DBClient {
    pub fn new(pool: Pool<Postgres>) -> Self {
        DBClient { pool }
    }
}

/// Everything the page services need from the store, as one object-safe bound.
pub trait MarketplaceStore:
    CategoryExt + ProfileExt + WorkerExt + JobExt + Send + Sync + std::fmt::Debug
{
}

impl<T> MarketplaceStore for T where
    T: CategoryExt + ProfileExt + WorkerExt + JobExt + Send + Sync + std::fmt::Debug
{
}
