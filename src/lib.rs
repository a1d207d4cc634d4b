//! Library entrypoint for strikewatch.
//!
//! This file exists mainly to make controller and engine tests easy
//! (integration tests under `tests/` can import the app state, routers,
//! controllers, services).

pub mod config;
pub mod error;
pub mod models;

pub mod services;

pub mod controllers;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub db: mongodb::Database,
    pub settings: config::Settings,
    pub binance: services::binance::BinanceClient,
    pub notifier: services::notifier::WebhookNotifier,
}
