pub mod client;
pub mod config;
pub mod errors;
pub mod metrics;
pub mod model;
pub mod poller;
pub mod render;
pub mod rest;
pub mod state;
pub mod status;
pub mod validate;
