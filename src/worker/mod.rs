pub mod matcher;
pub mod parser;
pub mod processor;
