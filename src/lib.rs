pub mod config;
pub mod environment;
pub mod output;
pub mod scanner;
pub mod stderr_buffer;
pub mod tui;
