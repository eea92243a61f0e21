pub mod config;
pub mod option;

pub use config::*;
pub use option::*;
