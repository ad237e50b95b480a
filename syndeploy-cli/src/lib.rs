pub mod cli_parser;
pub mod commands;
pub mod error;
