pub mod error;
pub mod progress;
