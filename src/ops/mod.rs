pub mod filter;
pub mod script;
pub mod selection;
