pub mod app;
pub mod config;
pub mod database;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod project_management;
pub mod storage;

#[cfg(test)]
pub mod testing;
