pub mod analyzers;
pub mod config;
pub mod error;
pub mod fetch;
pub mod output;
pub mod parser;
pub mod record;
pub mod services;
pub mod session;
pub mod submit;
