//! # Common Types and Traits

use core::fmt::{Debug, Display};
use core::hash::Hash;
use num_traits::{FromPrimitive, PrimInt, ToPrimitive, Unsigned};

/// A type that can be used as a token id.
///
/// Any unsigned primitive integer qualifies; `u32` is the common choice.
///
/// Ids are assigned densely from `0`, and stop strictly below
/// [`TokenType::max_value`], which is reserved as [`TokenType::invalid`].
pub trait TokenType:
    'static + PrimInt + Unsigned + FromPrimitive + ToPrimitive + Hash + Debug + Display + Send + Sync
{
    /// The legacy "invalid id" sentinel.
    ///
    /// This is never assigned to a token.
    fn invalid() -> Self {
        Self::max_value()
    }

    /// The first id which cannot be assigned, as a `u64`.
    ///
    /// Clamped to `u64::MAX` for wider types such as `u128`,
    /// so it is only exact for types of 64 bits or fewer.
    fn id_limit() -> u64 {
        Self::max_value().to_u64().unwrap_or(u64::MAX)
    }
}

impl<T> TokenType for T where
    T: 'static
        + PrimInt
        + Unsigned
        + FromPrimitive
        + ToPrimitive
        + Hash
        + Debug
        + Display
        + Send
        + Sync
{
}

/// Token occurrence count type.
pub type CountType = u64;

cfg_if::cfg_if! {
    if #[cfg(feature = "ahash")] {
        /// Type Alias for hash maps in this crate.
        pub type CommonHashMap<K, V> = std::collections::HashMap<K, V, ahash::RandomState>;
    } else if #[cfg(feature = "foldhash")] {
        /// Type Alias for hash maps in this crate.
        pub type CommonHashMap<K, V> = std::collections::HashMap<K, V, foldhash::fast::RandomState>;
    } else {
        /// Type Alias for hash maps in this crate.
        pub type CommonHashMap<K, V> = std::collections::HashMap<K, V>;
    }
}
