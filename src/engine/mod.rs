pub mod aggregate;
pub mod decimal;
pub mod errors;
pub mod types;

pub use errors::*;
