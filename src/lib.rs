pub mod alerts;
pub mod app;
pub mod config;
pub mod domain;
pub mod github;
pub mod infrastructure;
pub mod status;
pub mod storage;
pub mod tasks;

#[cfg(test)]
pub(crate) mod testing;
