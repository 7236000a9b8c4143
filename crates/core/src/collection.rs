//! The contract shared by every persisted user collection.

use core::fmt::Debug;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// An in-memory collection that is mutated through a closed set of
/// operations and persisted as a whole.
///
/// Operations are values so that a store can journal the ones that arrive
/// before the persisted copy has been loaded and replay them afterwards.
pub trait Collection:
    Default + Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Mutation vocabulary of the collection.
    type Op: Clone + Debug + Send + Sync + 'static;

    /// Apply a single mutation in place.
    fn apply(&mut self, op: Self::Op);

    /// Number of entries.
    fn len(&self) -> usize;

    /// Whether the collection has no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
