//! Bazaar trading simulator: item catalog, live quotes, instant buy/sell
//! against a persisted account, and a terminal front end.

pub mod account;
pub mod api;
pub mod app;
pub mod catalog;
pub mod config;
pub mod events;
pub mod markup;
pub mod trade;
pub mod ui;
pub mod util;
