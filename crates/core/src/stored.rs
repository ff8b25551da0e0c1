//! Bulk retrieval capability contracts
//!
//! Bulk retrieval walks every entry of a bucket and hands each decoded value
//! to the caller's collection. The walk is the same for every collection
//! shape; only the insertion differs:
//!
//! - [`Collect`]: how a decoded `(key, item)` pair is added (append to a
//!   sequence, insert into a keyed map)
//! - [`Stored`]: a `Collect` that also knows which bucket it draws from
//!
//! Both are implemented for `Vec<T>`, `BTreeMap` and `HashMap` keyed by
//! `String` or raw `Vec<u8>`. `Stored` is implemented for those shapes when
//! the item type is a [`Record`].

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::record::Record;

/// A collection shape that bulk retrieval can populate.
pub trait Collect {
    /// Element type each stored value is decoded into.
    type Item: DeserializeOwned;

    /// Add one freshly decoded entry stored under `key`.
    ///
    /// Keyed shapes insert under the key (replacing a previous element with
    /// the same key); sequences append and ignore the key.
    fn insert_entry(&mut self, key: &[u8], item: Self::Item) -> Result<()>;
}

/// A collection that knows the bucket it is materialized from.
pub trait Stored: Collect {
    /// Name of the bucket whose entries fill this collection.
    fn bucket(&self) -> &str;
}

/// Key conversion for string-keyed maps. The bucket is not known here, so
/// the error carries only the key; callers add the bucket.
fn utf8_key(key: &[u8]) -> Result<String> {
    String::from_utf8(key.to_vec())
        .map_err(|e| Error::decoding("", key, format!("key is not valid UTF-8: {}", e)))
}

// ============================================================================
// Collect implementations
// ============================================================================

impl<T: DeserializeOwned> Collect for Vec<T> {
    type Item = T;

    fn insert_entry(&mut self, _key: &[u8], item: T) -> Result<()> {
        self.push(item);
        Ok(())
    }
}

impl<T: DeserializeOwned> Collect for BTreeMap<String, T> {
    type Item = T;

    fn insert_entry(&mut self, key: &[u8], item: T) -> Result<()> {
        self.insert(utf8_key(key)?, item);
        Ok(())
    }
}

impl<T: DeserializeOwned, S: BuildHasher> Collect for HashMap<String, T, S> {
    type Item = T;

    fn insert_entry(&mut self, key: &[u8], item: T) -> Result<()> {
        self.insert(utf8_key(key)?, item);
        Ok(())
    }
}

impl<T: DeserializeOwned> Collect for BTreeMap<Vec<u8>, T> {
    type Item = T;

    fn insert_entry(&mut self, key: &[u8], item: T) -> Result<()> {
        self.insert(key.to_vec(), item);
        Ok(())
    }
}

impl<T: DeserializeOwned, S: BuildHasher> Collect for HashMap<Vec<u8>, T, S> {
    type Item = T;

    fn insert_entry(&mut self, key: &[u8], item: T) -> Result<()> {
        self.insert(key.to_vec(), item);
        Ok(())
    }
}

// ============================================================================
// Stored implementations (record collections)
// ============================================================================

impl<T: Record> Stored for Vec<T> {
    fn bucket(&self) -> &str {
        T::BUCKET
    }
}

impl<T: Record> Stored for BTreeMap<String, T> {
    fn bucket(&self) -> &str {
        T::BUCKET
    }
}

impl<T: Record, S: BuildHasher> Stored for HashMap<String, T, S> {
    fn bucket(&self) -> &str {
        T::BUCKET
    }
}

impl<T: Record> Stored for BTreeMap<Vec<u8>, T> {
    fn bucket(&self) -> &str {
        T::BUCKET
    }
}

impl<T: Record, S: BuildHasher> Stored for HashMap<Vec<u8>, T, S> {
    fn bucket(&self) -> &str {
        T::BUCKET
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: String,
    }

    impl Record for Note {
        const BUCKET: &'static str = "Notes";

        fn key(&self) -> Vec<u8> {
            self.id.as_bytes().to_vec()
        }
    }

    fn note(id: &str) -> Note {
        Note { id: id.to_string() }
    }

    fn fill<C: Collect<Item = Note>>(coll: &mut C) {
        coll.insert_entry(b"a", note("a")).unwrap();
        coll.insert_entry(b"b", note("b")).unwrap();
    }

    #[test]
    fn test_vec_appends_in_order() {
        let mut items: Vec<Note> = Vec::new();
        fill(&mut items);
        assert_eq!(items, vec![note("a"), note("b")]);
    }

    #[test]
    fn test_string_map_inserts_by_key() {
        let mut items: BTreeMap<String, Note> = BTreeMap::new();
        fill(&mut items);
        assert_eq!(items.len(), 2);
        assert_eq!(items["a"], note("a"));
    }

    #[test]
    fn test_hash_map_replaces_same_key() {
        let mut items: HashMap<String, Note> = HashMap::new();
        items.insert_entry(b"a", note("first")).unwrap();
        items.insert_entry(b"a", note("second")).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items["a"], note("second"));
    }

    #[test]
    fn test_string_map_rejects_non_utf8_key() {
        let mut items: BTreeMap<String, Note> = BTreeMap::new();
        let err = items.insert_entry(&[0xFF, 0xFE], note("x")).unwrap_err();
        assert!(err.is_decoding());
        assert!(items.is_empty());
    }

    #[test]
    fn test_raw_key_maps_accept_any_bytes() {
        let mut tree: BTreeMap<Vec<u8>, Note> = BTreeMap::new();
        tree.insert_entry(&[0xFF], note("x")).unwrap();
        assert!(tree.contains_key(&vec![0xFF]));

        let mut hash: HashMap<Vec<u8>, Note> = HashMap::new();
        hash.insert_entry(&[0xFF], note("x")).unwrap();
        assert!(hash.contains_key(&vec![0xFF]));
    }

    #[test]
    fn test_record_collections_name_record_bucket() {
        assert_eq!(Vec::<Note>::new().bucket(), "Notes");
        assert_eq!(BTreeMap::<String, Note>::new().bucket(), "Notes");
        assert_eq!(HashMap::<String, Note>::new().bucket(), "Notes");
        assert_eq!(BTreeMap::<Vec<u8>, Note>::new().bucket(), "Notes");
        assert_eq!(HashMap::<Vec<u8>, Note>::new().bucket(), "Notes");
    }
}
