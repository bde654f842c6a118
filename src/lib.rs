//! Deepo: a desktop front end for a text translation service.

pub mod actions;
pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod languages;
pub mod logger;
pub mod lorem;
pub mod server;
pub mod status;
pub mod store;
pub mod theme;
