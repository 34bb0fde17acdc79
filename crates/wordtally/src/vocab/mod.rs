//! # Token Vocabularies
//!
//! [`TokenRegistry`] is the `{ token <-> id }` registry;
//! [`io`] reads and writes it.

pub mod io;

mod token_registry;

#[doc(inline)]
pub use token_registry::{INVALID_TOKEN, TokenRegistry};
