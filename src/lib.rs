pub mod api;
pub mod cache;
pub mod commands;
pub mod config;
pub mod data_provider;
pub mod fixtures;
pub mod formatting;
pub mod match_list;
pub mod tui;

#[cfg(any(test, feature = "development"))]
pub mod dev;
