//! # Token Registry

use std::path::Path;

use num_traits::ToPrimitive;

use crate::{
    config::resolve_vocab_path,
    errors::{WTError, WTResult},
    types::{CommonHashMap, CountType, TokenType},
    vocab::io::{LoadOptions, load_registry_path, save_registry_path},
};

/// The legacy "invalid token" sentinel.
///
/// The empty string can never be registered, so it never collides with a real token.
pub const INVALID_TOKEN: &str = "";

/// A bidirectional `{ token <-> T }` registry with per-token frequency counts.
///
/// Ids are assigned densely, from `0`, in first-seen order; and are never reassigned.
///
/// The registry maintains:
/// * `reverse[forward[t]] == t` for every registered token `t`.
/// * `forward`, `reverse`, and the frequency map all cover the same token set;
///   and the id space is exactly `[0, len)`.
/// * every frequency is `>= 1`.
/// * the empty token is never registered.
///
/// [`TokenRegistry::add_token`] is the only mutation primitive.
///
/// ## Style Hints
/// Instance names should prefer `registry`, or `vocab`.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenRegistry<T: TokenType = u32> {
    /// `{ token -> T }`
    token_ids: CommonHashMap<String, T>,

    /// `[T] -> token`
    id_tokens: Vec<String>,

    /// `{ token -> count }`
    token_counts: CommonHashMap<String, CountType>,
}

impl<T: TokenType> Default for TokenRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TokenType> TokenRegistry<T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty registry with room for `capacity` tokens.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            token_ids: CommonHashMap::with_capacity_and_hasher(capacity, Default::default()),
            id_tokens: Vec::with_capacity(capacity),
            token_counts: CommonHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// The number of distinct registered tokens.
    pub fn len(&self) -> usize {
        self.id_tokens.len()
    }

    /// Returns true if no tokens are registered.
    pub fn is_empty(&self) -> bool {
        self.id_tokens.is_empty() && self.token_ids.is_empty() && self.token_counts.is_empty()
    }

    /// Register one occurrence of `token`.
    ///
    /// A new token is assigned the next sequential id, with a frequency of `1`;
    /// a known token has its frequency incremented, and keeps its id.
    ///
    /// ## Arguments
    /// * `token` - the token; must be non-empty.
    ///
    /// ## Returns
    /// The token's id.
    ///
    /// ## Errors
    /// * [`WTError::InvalidInput`] - `token` is empty.
    /// * [`WTError::CapacityExceeded`] - no id below `T::max_value()` remains.
    /// * [`WTError::FrequencyOverflow`] - the token's frequency is already `CountType::MAX`.
    /// * [`WTError::Invariant`] - the token's id does not resolve back to it.
    ///
    /// Nothing is modified when an error is returned.
    pub fn add_token(
        &mut self,
        token: &str,
    ) -> WTResult<T> {
        if token.is_empty() {
            return Err(WTError::InvalidInput("token cannot be empty".to_string()));
        }

        if let Some(&id) = self.token_ids.get(token) {
            self.check_resolves(token, id)?;

            return match self.token_counts.get_mut(token) {
                Some(count) => match count.checked_add(1) {
                    Some(next) => {
                        *count = next;
                        Ok(id)
                    }
                    None => Err(WTError::FrequencyOverflow {
                        token: token.to_string(),
                    }),
                },
                None => Err(WTError::Invariant(format!(
                    "token {token:?} has id {id} but no frequency"
                ))),
            };
        }

        // Check before insert; the boundary id is never handed out.
        let id = self.next_id()?;

        self.token_ids.insert(token.to_string(), id);
        self.id_tokens.push(token.to_string());
        self.token_counts.insert(token.to_string(), 1);

        Ok(id)
    }

    /// Look up the id of `token`.
    ///
    /// Does not modify frequencies.
    ///
    /// ## Returns
    /// `Ok(None)` if the token is not registered.
    ///
    /// ## Errors
    /// * [`WTError::Invariant`] - the token's id does not resolve back to it.
    pub fn lookup_token(
        &self,
        token: &str,
    ) -> WTResult<Option<T>> {
        match self.token_ids.get(token) {
            Some(&id) => {
                self.check_resolves(token, id)?;
                Ok(Some(id))
            }
            None => Ok(None),
        }
    }

    /// Look up the token registered at `id`.
    ///
    /// Any integer type is accepted; negative and out-of-range ids yield `None`.
    pub fn lookup_id<I: ToPrimitive>(
        &self,
        id: I,
    ) -> Option<&str> {
        id.to_usize()
            .and_then(|idx| self.id_tokens.get(idx))
            .map(String::as_str)
    }

    /// Returns true if `token` is registered.
    pub fn contains_token(
        &self,
        token: &str,
    ) -> bool {
        self.token_ids.contains_key(token)
    }

    /// The number of times `token` has been registered.
    pub fn frequency(
        &self,
        token: &str,
    ) -> Option<CountType> {
        self.token_counts.get(token).copied()
    }

    /// The sum of all token frequencies.
    ///
    /// ## Returns
    /// `None` if the sum does not fit in a [`CountType`].
    pub fn total_frequency(&self) -> Option<CountType> {
        self.token_counts
            .values()
            .try_fold(0 as CountType, |total, &count| total.checked_add(count))
    }

    /// Legacy variant of [`Self::lookup_token`].
    ///
    /// ## Returns
    /// The id, or [`TokenType::invalid`] if the token is not registered.
    pub fn token_id_or_invalid(
        &self,
        token: &str,
    ) -> WTResult<T> {
        Ok(self.lookup_token(token)?.unwrap_or_else(T::invalid))
    }

    /// Legacy variant of [`Self::lookup_id`].
    ///
    /// ## Returns
    /// The token, or [`INVALID_TOKEN`] if `id` is out of range.
    pub fn token_or_invalid<I: ToPrimitive>(
        &self,
        id: I,
    ) -> &str {
        self.lookup_id(id).unwrap_or(INVALID_TOKEN)
    }

    /// Iterate over `(id, token, frequency)` triples, in id order.
    pub fn iter(&self) -> impl Iterator<Item = (T, &str, CountType)> + '_ {
        self.id_tokens.iter().filter_map(|token| {
            let id = *self.token_ids.get(token)?;
            let count = *self.token_counts.get(token)?;
            Some((id, token.as_str(), count))
        })
    }

    /// Iterate over the tokens, in id order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> + '_ {
        self.id_tokens.iter().map(String::as_str)
    }

    /// Overwrite the frequency of an already registered token.
    pub(crate) fn set_frequency(
        &mut self,
        token: &str,
        count: CountType,
    ) -> WTResult<()> {
        if count == 0 {
            return Err(WTError::InvalidInput(format!(
                "frequency of {token:?} must be positive"
            )));
        }
        match self.token_counts.get_mut(token) {
            Some(slot) => {
                *slot = count;
                Ok(())
            }
            None => Err(WTError::Invariant(format!(
                "cannot set frequency of unregistered token {token:?}"
            ))),
        }
    }

    /// Check every registry invariant across the full token set.
    ///
    /// ## Errors
    /// * [`WTError::Invariant`] - on the first violation found.
    pub fn validate(&self) -> WTResult<()> {
        if self.token_ids.len() != self.id_tokens.len() {
            return Err(WTError::Invariant(format!(
                "forward map has {} tokens, reverse map has {}",
                self.token_ids.len(),
                self.id_tokens.len()
            )));
        }
        if self.token_counts.len() != self.id_tokens.len() {
            return Err(WTError::Invariant(format!(
                "frequency map has {} tokens, reverse map has {}",
                self.token_counts.len(),
                self.id_tokens.len()
            )));
        }

        for (idx, token) in self.id_tokens.iter().enumerate() {
            if token.is_empty() {
                return Err(WTError::Invariant(format!("empty token at id {idx}")));
            }

            match self.token_ids.get(token) {
                Some(id) if id.to_usize() == Some(idx) => (),
                Some(id) => {
                    return Err(WTError::Invariant(format!(
                        "token {token:?} at id {idx} maps forward to id {id}"
                    )));
                }
                None => {
                    return Err(WTError::Invariant(format!(
                        "token {token:?} at id {idx} is missing from the forward map"
                    )));
                }
            }

            match self.token_counts.get(token) {
                Some(&count) if count > 0 => (),
                Some(_) => {
                    return Err(WTError::Invariant(format!(
                        "token {token:?} has a zero frequency"
                    )));
                }
                None => {
                    return Err(WTError::Invariant(format!(
                        "token {token:?} is missing from the frequency map"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Save to a vocabulary file; see [`crate::vocab::io`].
    pub fn save<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> WTResult<()> {
        save_registry_path(self, path)
    }

    /// Save to the resolved default path; see [`crate::config::resolve_vocab_path`].
    pub fn save_default(&self) -> WTResult<()> {
        self.save(resolve_vocab_path::<&Path>(None))
    }

    /// Load a vocabulary file into this (empty) registry; see [`crate::vocab::io`].
    ///
    /// Uses the default [`LoadOptions`].
    pub fn load<P: AsRef<Path>>(
        &mut self,
        path: P,
    ) -> WTResult<()> {
        load_registry_path(self, path, LoadOptions::default())
    }

    /// Load from the resolved default path; see [`crate::config::resolve_vocab_path`].
    pub fn load_default(&mut self) -> WTResult<()> {
        self.load(resolve_vocab_path::<&Path>(None))
    }

    fn next_id(&self) -> WTResult<T> {
        match T::from_usize(self.id_tokens.len()) {
            Some(id) if id < T::max_value() => Ok(id),
            _ => Err(WTError::CapacityExceeded {
                limit: T::id_limit(),
            }),
        }
    }

    fn check_resolves(
        &self,
        token: &str,
        id: T,
    ) -> WTResult<()> {
        match id.to_usize().and_then(|idx| self.id_tokens.get(idx)) {
            Some(found) if found == token => Ok(()),
            Some(found) => Err(WTError::Invariant(format!(
                "id mismatch for token {token:?}: id {id} resolves to {found:?}"
            ))),
            None => Err(WTError::Invariant(format!(
                "id mismatch for token {token:?}: id {id} is out of range"
            ))),
        }
    }
}
