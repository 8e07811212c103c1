pub mod session;
pub mod state;
pub mod tooltips;
