#[macro_use]
pub mod macros;

pub mod prelude;

#[cfg(feature = "client")]
pub mod tokio;
