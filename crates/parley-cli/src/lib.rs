pub mod config;
pub mod repl;
