pub mod api;
pub mod catalog;
pub mod config;
pub mod event;
pub mod host;
pub mod player;
pub mod purchase;
pub mod session;
pub mod util;
