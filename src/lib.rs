pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod utils;
pub mod views;

pub use config::Config;
pub use error::{AppError, Result};
pub use state::AppState;
