pub mod auth;
pub mod generators;
