use std::borrow::Cow;

pub use paste;

/// Interned name. Equal strings always hash to the same id, so ids can be
/// compared, and declared as constants, without the map that stores their
/// text.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct AtomId(u64);

impl AtomId {
    pub const fn from_str(s: &str) -> Self {
        Self::from_bytes(s.as_bytes())
    }

    pub const fn from_bytes(bytes: &[u8]) -> Self {
        Self(xxhash_rust::const_xxh3::xxh3_64(bytes))
    }
}

impl nohash_hasher::IsEnabled for AtomId {}

/// Text of every name a tree or a pass has mentioned. Names taken from the
/// input borrow it; synthesized ones are owned.
#[derive(Debug)]
pub struct AtomMap<'cx> {
    names: nohash_hasher::IntMap<AtomId, Cow<'cx, str>>,
}

impl<'cx> AtomMap<'cx> {
    pub fn new(capacity: usize) -> Self {
        Self {
            names: qp_utils::no_hashmap_with_capacity(capacity),
        }
    }

    pub fn insert_by_str(&mut self, name: Cow<'cx, str>) -> AtomId {
        let id = AtomId::from_bytes(name.as_bytes());
        self.names.entry(id).or_insert(name);
        id
    }

    /// Registers the text of a precomputed id, such as a keyword constant.
    pub fn insert_if_not_exist(&mut self, atom: AtomId, name: impl FnOnce() -> Cow<'cx, str>) {
        self.names.entry(atom).or_insert_with(name);
    }

    #[track_caller]
    pub fn get(&self, atom: AtomId) -> &str {
        match self.names.get(&atom) {
            Some(name) => name,
            None => panic!("atom {atom:?} was never interned"),
        }
    }
}

/// Declares `NAME: AtomId` and `NAME_STR: &str` constants for fixed names.
///
/// ```
/// use qp_atom::{gen_atoms, paste, AtomId};
///
/// gen_atoms!((IDENT_A, "a"));
/// assert_eq!(IDENT_A, AtomId::from_str(IDENT_A_STR));
/// ```
#[macro_export]
macro_rules! gen_atoms {
    ($(($name:ident, $lit:literal)),* $(,)?) => {
        paste::paste! {
            $(pub const [<$name _STR>]: &str = $lit;)*
            $(pub const $name: AtomId = AtomId::from_str([<$name _STR>]);)*
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_text_same_id() {
        let mut atoms = AtomMap::new(4);
        let a = atoms.insert_by_str(Cow::Borrowed("foo"));
        let b = atoms.insert_by_str(Cow::Owned(String::from("foo")));
        assert_eq!(a, b);
        assert_eq!(a, AtomId::from_str("foo"));
        assert_eq!(atoms.get(a), "foo");
    }

    #[test]
    fn keyword_constants_resolve_once_registered() {
        gen_atoms!((BAR, "bar"), (BAZ, "baz"));
        let mut atoms = AtomMap::new(2);
        atoms.insert_if_not_exist(BAR, || Cow::Borrowed(BAR_STR));
        atoms.insert_if_not_exist(BAR, || unreachable!());
        assert_eq!(atoms.get(BAR), "bar");
        assert_eq!(AtomId::from_str("baz"), BAZ);
    }

    #[test]
    #[should_panic(expected = "was never interned")]
    fn unknown_atom_panics() {
        let atoms = AtomMap::new(0);
        atoms.get(AtomId::from_str("missing"));
    }
}
