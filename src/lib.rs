pub mod config;
pub mod dispatcher;
mod error;
pub mod menu;
pub mod models;
pub mod price_feed;
pub mod routes;
pub mod storage;
#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
pub mod tg_bot;
pub mod utils;

pub use error::{AppError, Result};
