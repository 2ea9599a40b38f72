pub mod app;
mod config;
mod effects;
mod interactive;
mod logging;
mod ui;
