pub mod cli;
pub mod config;
pub mod date;
pub mod error;
pub mod filter;
pub mod gallery;
pub mod metadata;
pub mod session;
pub mod store;
