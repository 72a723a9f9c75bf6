pub mod error;
pub mod event;
pub mod fetch;
pub mod marker;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod render;
