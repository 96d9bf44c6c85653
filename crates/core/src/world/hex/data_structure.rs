use crate::{util, world::hex::Hex};
use fnv::{FnvBuildHasher, FnvHasher};
use indexmap::IndexSet;
use std::{
    collections::HashMap,
    fmt::{self, Debug},
    hash::{Hash, Hasher},
    iter::FromIterator,
    ops,
    sync::Arc,
};

/// An ORDERED set of some `T`. This has some extra memory overhead compared to
/// a hash set, so we should only use it when we actually need the ordering.
pub type FnvIndexSet<T> = IndexSet<T, FnvBuildHasher>;

/// Map key. `s` is redundant so it gets dropped.
type HexKey = (i32, i32);
/// One slice of a [HexMap]'s contents
type Shard<V> = HashMap<HexKey, V, FnvBuildHasher>;

/// A persistent (immutable) map of hexes to some `V`. Updating the map never
/// modifies it in place; instead, [HexMap::set] returns a new map and leaves
/// the old one untouched. That makes it cheap and safe to hang onto old
/// versions of a map, e.g. a snapshot from before a simulation pass.
///
/// ## Implementation
///
/// Entries are spread across [Self::SHARD_COUNT] shards by key hash. Each
/// shard sits behind an `Arc`, and so does the table of shards. Cloning the
/// map is just a refcount bump. Setting a value copies the shard table (which
/// is only pointers) and the one shard that holds the key, and every other
/// shard is shared with the previous version of the map.
///
/// Looking up a hex that isn't in the map via indexing (`map[hex]`) panics.
/// Use [HexMap::contains] or [HexMap::get] if the hex might be missing.
pub struct HexMap<V> {
    shards: Arc<Vec<Arc<Shard<V>>>>,
    len: usize,
}

impl<V> HexMap<V> {
    /// Number of shards that entries get split between. Bigger means cheaper
    /// updates but more expensive clones of the shard table.
    pub const SHARD_COUNT: usize = 64;

    /// Create a new map with no entries
    pub fn new() -> Self {
        let shards = (0..Self::SHARD_COUNT)
            .map(|_| Arc::new(Shard::default()))
            .collect();
        Self {
            shards: Arc::new(shards),
            len: 0,
        }
    }

    /// Initialize a new map that covers every hex within `radius` steps of the
    /// origin, in a super hexagon pattern.
    ///
    /// ## Arguments
    ///
    /// - `radius`: Distance from the origin to the edge of the map, in all
    ///   directions. 0 means a map of 1 tile, 1 is 7 tiles, 2 => 19, etc.
    /// - `initializer`: Function called to initialize each value in the map,
    ///   based on its position
    pub fn hexagon(radius: u16, initializer: impl Fn(Hex) -> V) -> Self {
        let map: Self = Hex::ZERO
            .spiral(radius)
            .map(|hex| (hex, initializer(hex)))
            .collect();
        debug_assert_eq!(map.len(), util::map_len(radius), "expected 3r²+3r+1");
        map
    }

    fn key(hex: Hex) -> HexKey {
        (hex.q(), hex.r())
    }

    fn shard_index(key: &HexKey) -> usize {
        let mut hasher = FnvHasher::default();
        key.hash(&mut hasher);
        (hasher.finish() as usize) % Self::SHARD_COUNT
    }

    fn shard(&self, key: &HexKey) -> &Shard<V> {
        &self.shards[Self::shard_index(key)]
    }

    /// Get the value at a hex, or `None` if the hex isn't in the map
    pub fn get(&self, hex: Hex) -> Option<&V> {
        let key = Self::key(hex);
        self.shard(&key).get(&key)
    }

    /// Does the map have an entry for this hex?
    pub fn contains(&self, hex: Hex) -> bool {
        let key = Self::key(hex);
        self.shard(&key).contains_key(&key)
    }

    /// Get the number of entries in the map
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate over every entry in the map. Iteration order is unspecified.
    pub fn iter(&self) -> impl Iterator<Item = (Hex, &V)> {
        self.shards.iter().flat_map(|shard| {
            shard.iter().map(|(&(q, r), value)| (Hex::new(q, r), value))
        })
    }
}

impl<V: Clone> HexMap<V> {
    /// Get a new map with `hex` mapped to `value`. If the hex already had a
    /// value, it's replaced in the new map. **This map is not modified.**
    pub fn set(&self, hex: Hex, value: V) -> Self {
        let key = Self::key(hex);
        let mut shards = Vec::clone(&self.shards);
        // The shard is shared with `self` so this will always clone it
        let shard = Arc::make_mut(&mut shards[Self::shard_index(&key)]);
        let replaced = shard.insert(key, value).is_some();
        Self {
            shards: Arc::new(shards),
            len: if replaced { self.len } else { self.len + 1 },
        }
    }

    /// Get a new map with the value at `hex` replaced by the output of the
    /// given function. Panics if the hex isn't in the map.
    pub fn update(&self, hex: Hex, f: impl FnOnce(&V) -> V) -> Self {
        self.set(hex, f(&self[hex]))
    }
}

impl<V> Default for HexMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

// Manual impl to avoid requiring V: Clone, we only clone pointers
impl<V> Clone for HexMap<V> {
    fn clone(&self) -> Self {
        Self {
            shards: Arc::clone(&self.shards),
            len: self.len,
        }
    }
}

impl<V: Debug> Debug for HexMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Two maps are equal if they have the same entries, regardless of whether
/// they share any structure.
impl<V: PartialEq> PartialEq for HexMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && self.iter().all(|(hex, value)| other.get(hex) == Some(value))
    }
}

impl<V: Eq> Eq for HexMap<V> {}

impl<V> ops::Index<Hex> for HexMap<V> {
    type Output = V;

    fn index(&self, hex: Hex) -> &Self::Output {
        crate::unwrap!(self.get(hex), "hex {} is not on the map", hex)
    }
}

// Building from an iterator mutates shards in place, since nothing else can
// have a reference to them yet
impl<V> FromIterator<(Hex, V)> for HexMap<V> {
    fn from_iter<I: IntoIterator<Item = (Hex, V)>>(iter: I) -> Self {
        let mut shards: Vec<Shard<V>> =
            (0..Self::SHARD_COUNT).map(|_| Shard::default()).collect();
        for (hex, value) in iter {
            let key = Self::key(hex);
            shards[Self::shard_index(&key)].insert(key, value);
        }
        let len = shards.iter().map(HashMap::len).sum();
        Self {
            shards: Arc::new(shards.into_iter().map(Arc::new).collect()),
            len,
        }
    }
}
