pub mod commands;
pub mod prompt;
pub mod trace_init;
