pub mod compose;
pub mod error;
pub mod feed;
pub mod models;
pub mod worldmap;
