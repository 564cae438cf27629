//! Route resolution module

mod table;

pub use table::{resolve, ApiRoute, Route};
