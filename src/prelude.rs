//! Imports for syntax extensions.

pub use crate::data::DataHandler as _;
pub use crate::grant::GrantHandler as _;
pub use crate::request::TokenRequest as _;
