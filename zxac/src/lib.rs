#[cfg(feature = "axum")]
pub mod axum;
#[cfg(feature = "bin")]
pub mod conf;
pub mod error;
pub mod guard;
pub mod identity;
pub mod nav;
pub mod platform;
pub mod route;
pub mod token;

pub use platform::Platform;
