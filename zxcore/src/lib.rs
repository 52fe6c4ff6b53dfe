pub mod ac;
pub mod error;
