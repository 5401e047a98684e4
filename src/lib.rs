pub mod app;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod image_cache;
pub mod input;
pub mod random;
pub mod timing;
