use std::collections::HashSet;

use crate::ProductId;

/// Ordered, duplicate-free collection of favorited product ids.
///
/// Insertion order is kept for presentation while membership stays O(1).
/// All operations are total: no input can leave the set partially updated.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(from = "Vec<ProductId>", into = "Vec<ProductId>")]
pub struct FavoriteIdSet {
    ids: Vec<ProductId>,
    index: HashSet<ProductId>,
}

impl FavoriteIdSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.index.contains(&id)
    }

    /// Appends `id`; returns whether it was absent.
    pub fn insert(&mut self, id: ProductId) -> bool {
        if !self.index.insert(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Removes `id`; returns whether it was present.
    pub fn remove(&mut self, id: ProductId) -> bool {
        if !self.index.remove(&id) {
            return false;
        }
        self.ids.retain(|other| *other != id);
        true
    }

    /// Membership flip: absent ids are appended, present ids removed.
    /// Returns whether `id` is favorited afterwards.
    pub fn toggle(&mut self, id: ProductId) -> bool {
        if self.contains(id) {
            self.remove(id);
            false
        } else {
            self.insert(id);
            true
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.ids.iter().copied()
    }

    pub fn as_slice(&self) -> &[ProductId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

// Equality is order-aware over the sequence; the index is derived state.
impl PartialEq for FavoriteIdSet {
    fn eq(&self, other: &Self) -> bool {
        self.ids == other.ids
    }
}

impl Eq for FavoriteIdSet {}

impl From<Vec<ProductId>> for FavoriteIdSet {
    fn from(ids: Vec<ProductId>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<FavoriteIdSet> for Vec<ProductId> {
    fn from(set: FavoriteIdSet) -> Self {
        set.ids
    }
}

impl FromIterator<ProductId> for FavoriteIdSet {
    fn from_iter<I: IntoIterator<Item = ProductId>>(iter: I) -> Self {
        let mut set = Self::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

impl IntoIterator for FavoriteIdSet {
    type Item = ProductId;
    type IntoIter = std::vec::IntoIter<ProductId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.into_iter()
    }
}
