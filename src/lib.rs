pub mod api;
pub mod config;
pub mod error;
pub mod lookup;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
pub mod store;
