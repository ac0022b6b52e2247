pub mod config;
pub mod events;
pub mod send;
pub mod webhooks;
