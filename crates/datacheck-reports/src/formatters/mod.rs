pub mod json;
pub mod stdout;
pub mod table;
