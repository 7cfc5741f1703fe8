pub mod actions;
pub mod assignments;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod error;
pub mod roster;
pub mod rotation;
