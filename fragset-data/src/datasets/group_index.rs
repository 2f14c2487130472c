use crate::storage::{FragmentColumns, CONTENT_LABEL_COLUMN, ORIGIN_KEY_COLUMN};
use fragset_core::FragsetError;
use log::info;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// One member of an origin group: a stored crop and its content label.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment<I, L> {
    pub image: I,
    pub label: L,
}

/// Crops regrouped by the origin image they were cut from.
///
/// Built once from the flat storage columns and never mutated afterwards, so
/// a shared reference can be read from any number of threads.
///
/// The key list fixes enumeration order: first appearance in storage order,
/// or, once a portion filter has been applied, the kept prefix sorted
/// ascending. Groups dropped by the filter stay in the map but are no longer
/// reachable through [`key_at`](GroupIndex::key_at).
#[derive(Debug, Clone)]
pub struct GroupIndex<K, I, L> {
    groups: HashMap<K, Vec<Fragment<I, L>>>,
    keys: Vec<K>,
}

impl<K, I, L> GroupIndex<K, I, L>
where
    K: Eq + Hash + Ord + Clone + Debug,
{
    /// Groups `images[i]` and `content_labels[i]` under `origin_keys[i]`.
    ///
    /// Members keep storage order within their group.
    ///
    /// # Errors
    ///
    /// Returns `FragsetError::ColumnLengthMismatch` if the label or key column
    /// length differs from the image column length.
    pub fn build(
        images: Vec<I>,
        content_labels: Vec<L>,
        origin_keys: Vec<K>,
    ) -> Result<Self, FragsetError> {
        let expected = images.len();
        if content_labels.len() != expected {
            return Err(FragsetError::ColumnLengthMismatch {
                column: CONTENT_LABEL_COLUMN.to_string(),
                expected,
                actual: content_labels.len(),
            });
        }
        if origin_keys.len() != expected {
            return Err(FragsetError::ColumnLengthMismatch {
                column: ORIGIN_KEY_COLUMN.to_string(),
                expected,
                actual: origin_keys.len(),
            });
        }

        let mut groups: HashMap<K, Vec<Fragment<I, L>>> = HashMap::new();
        let mut keys = Vec::new();
        for ((image, label), key) in images.into_iter().zip(content_labels).zip(origin_keys) {
            let members = groups.entry(key).or_insert_with_key(|k| {
                keys.push(k.clone());
                Vec::new()
            });
            members.push(Fragment { image, label });
        }

        info!(
            "Built group index: {} records across {} origin groups",
            expected,
            keys.len()
        );
        Ok(Self { groups, keys })
    }

    /// Builds the index from columns read by a storage reader.
    pub fn from_columns(columns: FragmentColumns<I, L, K>) -> Result<Self, FragsetError> {
        columns.validate()?;
        Self::build(columns.images, columns.content_labels, columns.origin_keys)
    }

    /// Keeps only the first `floor(len * portion)` keys and sorts them.
    ///
    /// A portion of exactly 1 leaves the index untouched, order included.
    ///
    /// # Errors
    ///
    /// Returns `FragsetError::InvalidPortion` unless `0 < portion <= 1`.
    pub fn with_portion(mut self, portion: f64) -> Result<Self, FragsetError> {
        if !(portion > 0.0 && portion <= 1.0) {
            return Err(FragsetError::InvalidPortion(portion));
        }
        if portion == 1.0 {
            return Ok(self);
        }
        let before = self.keys.len();
        let keep = (before as f64 * portion).floor() as usize;
        self.keys.truncate(keep);
        self.keys.sort();
        info!(
            "Applied portion {}: kept {} of {} origin groups",
            portion, keep, before
        );
        Ok(self)
    }

    /// The members of one origin group, in storage order.
    ///
    /// # Errors
    ///
    /// Returns `FragsetError::MissingKey` if no group has this key.
    pub fn members_of(&self, key: &K) -> Result<&[Fragment<I, L>], FragsetError> {
        self.groups
            .get(key)
            .map(Vec::as_slice)
            .ok_or_else(|| FragsetError::MissingKey(format!("{:?}", key)))
    }

    /// Key and members of the group at position `idx` of the key list.
    pub fn group_at(&self, idx: usize) -> Result<(&K, &[Fragment<I, L>]), FragsetError> {
        let key = self.key_at(idx)?;
        Ok((key, self.members_of(key)?))
    }
}

impl<K, I, L> GroupIndex<K, I, L> {
    /// Number of reachable origin groups.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The enumeration order of origin keys.
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// # Errors
    ///
    /// Returns `FragsetError::IndexOutOfBounds` if `idx >= self.len()`.
    pub fn key_at(&self, idx: usize) -> Result<&K, FragsetError> {
        self.keys.get(idx).ok_or_else(|| FragsetError::IndexOutOfBounds {
            index: vec![idx],
            shape: vec![self.keys.len()],
        })
    }

    /// Total records held, reachable or not.
    pub fn num_records(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
#[path = "group_index_test.rs"]
mod tests;
