pub mod ask;
pub mod chat;
pub mod config;
pub mod record;
pub mod render;
