pub mod backends;
pub mod chat;
pub mod error;
pub mod models;
pub mod prompt;
