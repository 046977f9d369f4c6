//! Maps backing the cache.

use std::hash::Hash;

use dashmap::mapref::multiple::RefMulti;
use dashmap::mapref::one::{Ref, RefMut};
use dashmap::DashMap;

pub(crate) type BuildHasher = fxhash::FxBuildHasher;

/// A map for one entity kind, absent when caching of that kind is turned off in [`Settings`].
///
/// Writes to a disabled map are dropped and reads always miss.
///
/// [`Settings`]: super::Settings
#[derive(Debug)]
pub(crate) struct MaybeMap<K: Eq + Hash, V>(Option<DashMap<K, V, BuildHasher>>);

impl<K: Eq + Hash, V> MaybeMap<K, V> {
    pub(super) fn enabled(enabled: bool) -> Self {
        Self(enabled.then(DashMap::default))
    }

    pub(super) fn iter(&self) -> impl Iterator<Item = RefMulti<'_, K, V, BuildHasher>> {
        self.0.iter().flat_map(DashMap::iter)
    }

    pub(super) fn get(&self, k: &K) -> Option<Ref<'_, K, V, BuildHasher>> {
        self.0.as_ref()?.get(k)
    }

    pub(super) fn get_mut(&self, k: &K) -> Option<RefMut<'_, K, V, BuildHasher>> {
        self.0.as_ref()?.get_mut(k)
    }

    pub(super) fn insert(&self, k: K, v: V) -> Option<V> {
        self.0.as_ref()?.insert(k, v)
    }

    pub(super) fn remove(&self, k: &K) -> Option<(K, V)> {
        self.0.as_ref()?.remove(k)
    }
}

#[cfg(test)]
mod tests {
    use super::MaybeMap;

    #[test]
    fn disabled_map_drops_writes() {
        let map = MaybeMap::enabled(false);
        assert_eq!(map.insert(1_u64, "one"), None);
        assert!(map.get(&1).is_none());
        assert_eq!(map.iter().count(), 0);

        let map = MaybeMap::enabled(true);
        map.insert(1_u64, "one");
        assert_eq!(*map.get(&1).unwrap(), "one");
        assert_eq!(map.remove(&1), Some((1, "one")));
    }
}
