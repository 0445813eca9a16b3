pub mod commands;
pub mod config;
pub mod error;
pub mod gateway;
pub mod rest;
pub mod runes;
