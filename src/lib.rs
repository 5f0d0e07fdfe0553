pub mod api;
pub mod app;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod session;
pub mod state;
