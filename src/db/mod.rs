pub mod categorydb;
pub mod db;
pub mod jobdb;
pub mod profiledb;
pub mod query_timeout;
pub mod workerdb;

#[cfg(test)]
pub mod memorydb;

pub use db::{DBClient, MarketplaceStore};
