#![warn(missing_docs, unused)]
//! # `wordtally` Token Vocabulary Registry
//!
//! A bidirectional `{ token <-> id }` registry with per-token frequency counts,
//! and a plain-text file format which round-trips it.
//!
//! Ids are dense, zero-based, and assigned in first-seen order;
//! see [`types::TokenType`] for the supported id types.
//!
//! See:
//! * [`vocab::TokenRegistry`] to build and query a vocabulary.
//! * [`vocab::io`] to save and load vocabulary files.
//! * [`config`] for default vocabulary path resolution.
//! * [`errors`] for the error taxonomy.
//!
//! ## Crate Features
#![doc = document_features::document_features!()]
//!
//! ## Building a Vocabulary
//!
//! ```rust,no_run
//! use wordtally::vocab::TokenRegistry;
//!
//! fn example() -> wordtally::WTResult<()> {
//!     let mut registry: TokenRegistry<u32> = TokenRegistry::new();
//!
//!     assert_eq!(registry.add_token("cat")?, 0);
//!     assert_eq!(registry.add_token("dog")?, 1);
//!     assert_eq!(registry.add_token("cat")?, 0);
//!     assert_eq!(registry.frequency("cat"), Some(2));
//!
//!     registry.save("data/vocabulary.yaml")?;
//!
//!     let mut loaded: TokenRegistry<u32> = TokenRegistry::new();
//!     loaded.load("data/vocabulary.yaml")?;
//!     assert_eq!(loaded, registry);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod errors;
pub mod types;
pub mod vocab;

#[doc(inline)]
pub use errors::{WTError, WTResult};
#[doc(inline)]
pub use types::TokenType;
#[doc(inline)]
pub use vocab::TokenRegistry;
