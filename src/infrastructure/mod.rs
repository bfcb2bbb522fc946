pub mod config;
pub mod editor;
pub mod parser;
pub mod syntax;
