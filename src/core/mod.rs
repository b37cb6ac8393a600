pub mod error;
pub mod geo;
