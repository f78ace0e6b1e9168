pub mod backgammon;
pub mod config;
pub mod engine;
