pub mod alerts_controller;
pub mod candles_controller;
pub mod home_controller;
pub mod settings_controller;
