// src/core/mod.rs

pub mod actions;
pub mod env_loader;
pub mod env_store;
pub mod fsm;
pub mod report;
