//! # simpleui-shared
//!
//! Constants and submission rules shared by the SimpleUi store and server.

pub mod constants;
pub mod validation;

mod error;

pub use error::ValidationError;
