pub mod validation_engine;

#[cfg(test)]
mod tests;

pub use validation_engine::{run, ValidationEngine};
