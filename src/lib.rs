pub mod config;
pub mod db;
pub mod errors;
pub mod form;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
pub mod validation;
