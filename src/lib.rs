// HTTP server modules
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod routes;
pub mod validation;

// Message storage
pub mod storage;

// API client and forms
pub mod client;
