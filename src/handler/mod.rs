pub mod categories;
pub mod jobs;
pub mod profile;
pub mod workers;

#[cfg(test)]
pub mod testutil;
