//! # Vocabulary IO
//!
//! Vocabulary files are line-oriented text:
//!
//! ```text
//! id_to_token:
//! 0 :
//!    "cat" : 2
//! 1 :
//!    "dog" : 1
//! ```
//!
//! One two-line block per token, in id order.
//!
//! ## Loading A Vocab
//!
//! ```rust,no_run
//! use wordtally::{
//!     TokenRegistry,
//!     vocab::io::{LoadOptions, MalformedLinePolicy, load_registry_path},
//! };
//!
//! fn example() -> wordtally::WTResult<TokenRegistry<u32>> {
//!     let mut registry = TokenRegistry::new();
//!     load_registry_path(
//!         &mut registry,
//!         "data/vocabulary.yaml",
//!         LoadOptions::default().with_malformed_lines(MalformedLinePolicy::Skip),
//!     )?;
//!     Ok(registry)
//! }
//! ```

mod id_token_vocab;

#[doc(inline)]
pub use id_token_vocab::*;
