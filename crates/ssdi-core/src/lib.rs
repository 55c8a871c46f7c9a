pub mod action_items;
pub mod clock;
pub mod config;
pub mod contact;
pub mod db;
pub mod document;
pub mod error;
pub mod io;
pub mod paths;
pub mod progress;
pub mod section;
pub mod seed;
pub mod tracking;
pub mod types;
pub mod user;

pub use db::Database;
pub use error::{Result, TrackerError};
