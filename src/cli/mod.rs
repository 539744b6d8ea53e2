//! Command implementations and shared terminal UI helpers

pub mod balance;
pub mod deposit;
pub mod plan;
pub mod projections;
pub mod setup;
pub mod ui;
pub mod withdraw;
