pub mod frequency;

use std::collections::HashMap;
use std::fmt::Debug;
use std::marker::PhantomData;

use ahash::RandomState;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, Result};

/// Marker for label ids (matrix rows)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelAxis {}

/// Marker for vocabulary ids (matrix columns)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermAxis {}

/// label <-> row id
pub type LabelIndex = IdIndex<LabelAxis>;
/// term <-> column id
pub type VocabularyIndex = IdIndex<TermAxis>;

/// Id for the entry at position `len`; positions past `u32::MAX` have none
#[inline]
fn next_id(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| ConvertError::IdOverflow(len))
}

/// Bijection between strings and dense ids `0..len`
///
/// Ids are handed out in first-seen order and never change afterwards.
/// The axis marker keeps label and vocabulary indexes from being swapped.
///
/// # Examples
/// ```
/// use labeled_freq_matrix::VocabularyIndex;
/// let mut vocab = VocabularyIndex::new();
/// assert_eq!(vocab.get_or_insert("x").unwrap(), 0);
/// assert_eq!(vocab.get_or_insert("y").unwrap(), 1);
/// assert_eq!(vocab.get_or_insert("x").unwrap(), 0);
/// assert_eq!(vocab.key_of(1), Some("y"));
/// ```
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct IdIndex<A> {
    keys: IndexSet<Box<str>, RandomState>,
    #[serde(skip)]
    _axis: PhantomData<A>,
}

impl<A> IdIndex<A> {
    pub fn new() -> Self {
        Self {
            keys: IndexSet::with_hasher(RandomState::new()),
            _axis: PhantomData,
        }
    }

    /// Rebuild an index from keys listed in id order
    ///
    /// Repeated keys keep their first id; later repeats are ignored.
    pub fn from_keys<I, T>(keys: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut index = Self::new();
        for key in keys {
            index.get_or_insert(key.as_ref())?;
        }
        Ok(index)
    }

    /// Id of `key`, assigning the next unused id if unseen
    ///
    /// # Errors
    /// * `IdOverflow` - every `u32` id is already taken
    #[inline]
    pub fn get_or_insert(&mut self, key: &str) -> Result<u32> {
        if let Some(id) = self.keys.get_index_of(key) {
            return Ok(id as u32);
        }
        let id = next_id(self.keys.len())?;
        self.keys.insert(key.into());
        Ok(id)
    }

    #[inline]
    pub fn id_of(&self, key: &str) -> Option<u32> {
        self.keys.get_index_of(key).map(|id| id as u32)
    }

    #[inline]
    pub fn key_of(&self, id: u32) -> Option<&str> {
        self.keys.get_index(id as usize).map(|key| key.as_ref())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// `(id, key)` in id order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.keys.iter().enumerate().map(|(id, key)| (id as u32, key.as_ref()))
    }

    /// Keys in id order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(|key| key.as_ref())
    }

    /// `key -> id` as a plain map
    pub fn to_hash_map(&self) -> HashMap<String, u32> {
        self.iter().map(|(id, key)| (key.to_string(), id)).collect()
    }
}

impl<A> Default for IdIndex<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for IdIndex<A> {
    fn clone(&self) -> Self {
        Self {
            keys: self.keys.clone(),
            _axis: PhantomData,
        }
    }
}

impl<A> PartialEq for IdIndex<A> {
    /// Same keys with the same ids
    fn eq(&self, other: &Self) -> bool {
        self.keys.len() == other.keys.len() && self.keys.iter().eq(other.keys.iter())
    }
}

impl<A> Eq for IdIndex<A> {}

impl<A> Debug for IdIndex<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter().map(|(id, key)| (key, id))).finish()
    }
}
