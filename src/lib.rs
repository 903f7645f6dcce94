/*
 * Responsibility
 * - モジュールの公開 (main.rs と tests/ から利用する)
 */
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
