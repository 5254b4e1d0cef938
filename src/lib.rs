pub mod config;
pub mod search;
pub mod shows;
pub mod store;
pub mod transcript;
pub mod youtube;
