pub mod binance;
pub mod db_init;
pub mod notifier;

pub mod alert_monitor;
pub mod alerts_service;
pub mod settings_service;
