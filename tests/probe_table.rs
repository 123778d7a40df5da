// ProbeTable and raw probe-function test suite.
//
// Each test documents what behavior is being verified. The core invariants
// exercised:
// - Hashing: exact FNV-1a values for both word widths.
// - Round-trip / overwrite / absence through lookup.
// - Chain integrity: deleting an entry never hides entries probed past it.
// - Tombstone reuse: reinsertion after deletes keeps other chains intact.
// - Truncation: keys sharing the first MAX_KEY_LENGTH bytes alias.
use probe_table::{
    delete, fnv1a, init_table, insert, lookup, vacant_array, Fnv32, Fnv64, InsertError, Key,
    ProbeTable, Slot, SlotState, MAX_KEY_LENGTH,
};
use test_log::test;

const TABLE_SIZE: usize = 10;

fn slot_of<V, S: std::hash::BuildHasher>(t: &ProbeTable<'_, V, S>, key: &str) -> Option<usize> {
    let key = Key::from(key);
    t.slots()
        .iter()
        .position(|s| !s.is_vacant() && s.key() == &key)
}

// Test: reference hash values.
// Verifies: both widths reproduce the published FNV-1a constants.
#[test]
fn hash_reference_values() {
    assert_eq!(fnv1a::<u32>(b""), 0x811c9dc5);
    assert_eq!(fnv1a::<u32>(b"hello"), 0x4f9f2cab);
    assert_eq!(fnv1a::<u32>(b"012345678912345"), 0xe9cce339);

    assert_eq!(fnv1a::<u64>(b""), 0xcbf29ce484222325);
    assert_eq!(fnv1a::<u64>(b"hello"), 0xa430d84680aabd0b);
    assert_eq!(fnv1a::<u64>(b"012345678912345"), 0xf0179b37002ce099);
}

// Test: the raw slice interface end to end.
// Assumes: init_table is called before use.
// Verifies: absence, round-trip, delete returns the stored value.
#[test]
fn raw_interface_round_trip() {
    let mut table: Vec<Slot<usize>> = (0..TABLE_SIZE).map(|_| Slot::default()).collect();
    init_table(&mut table);
    let h = Fnv64::new();

    assert_eq!(lookup(&table, b"doesnotexist", &h), None);
    insert(&mut table, b"exists", 0x1234, &h).unwrap();
    assert_eq!(lookup(&table, b"exists", &h), Some(&0x1234));
    assert_eq!(delete(&mut table, b"exists", &h), Some(0x1234));
    assert_eq!(lookup(&table, b"exists", &h), None);
    assert_eq!(delete(&mut table, b"exists", &h), None);

    init_table(&mut table);
    assert!(table.iter().all(|s| s.state() == SlotState::Vacant));
}

// Test: overwrite.
// Verifies: inserting the same key twice leaves only the latest value.
#[test]
fn overwrite_keeps_latest() {
    let mut storage: [Slot<usize>; TABLE_SIZE] = vacant_array();
    let mut t = ProbeTable::init_with_hasher(&mut storage, Fnv64::new());
    t.insert("another", 0x5678).unwrap();
    t.insert("another", 0x9abc).unwrap();
    assert_eq!(t.lookup("another"), Some(&0x9abc));
    assert_eq!(t.len(), 1);
}

fn load_collision_scenario(t: &mut ProbeTable<'_, usize, Fnv64>) {
    for (k, v) in [
        ("hello", 1),
        ("world", 2),
        ("universe", 3),
        ("goodbye", 4),
        ("example", 5),
        ("abc", 6),
    ] {
        t.insert(k, v).unwrap();
    }
}

// Test: chain integrity under deletion (64-bit hashing, 10 slots).
// Assumes: "universe" and "goodbye" share home slot 0; "hello" and "abc"
// share home slot 1, so "goodbye" and "abc" sit behind deleted entries.
// Verifies: deleting "hello" and "universe" leaves every other key reachable.
#[test]
fn chain_integrity_under_deletion() {
    let mut storage: [Slot<usize>; TABLE_SIZE] = vacant_array();
    let mut t = ProbeTable::init_with_hasher(&mut storage, Fnv64::new());
    load_collision_scenario(&mut t);

    assert_eq!(fnv1a::<u64>(b"universe") % TABLE_SIZE as u64, 0);
    assert_eq!(fnv1a::<u64>(b"goodbye") % TABLE_SIZE as u64, 0);
    assert_eq!(fnv1a::<u64>(b"hello") % TABLE_SIZE as u64, 1);
    assert_eq!(fnv1a::<u64>(b"abc") % TABLE_SIZE as u64, 1);
    assert_eq!(slot_of(&t, "universe"), Some(0));
    assert_eq!(slot_of(&t, "hello"), Some(1));
    assert_eq!(slot_of(&t, "goodbye"), Some(2));
    assert_eq!(slot_of(&t, "abc"), Some(3));

    assert_eq!(t.lookup("goodbye"), Some(&4));
    assert_eq!(t.delete("hello"), Some(1));
    assert_eq!(t.lookup("goodbye"), Some(&4));
    assert_eq!(t.delete("universe"), Some(3));
    assert_eq!(t.lookup("goodbye"), Some(&4));
    assert_eq!(t.lookup("abc"), Some(&6));

    assert_eq!(t.lookup("hello"), None);
    assert_eq!(t.lookup("world"), Some(&2));
    assert_eq!(t.lookup("example"), Some(&5));

    // Deleted keys stay in place as tombstones.
    assert_eq!(t.slots()[0].state(), SlotState::Tombstone);
    assert_eq!(t.slots()[1].state(), SlotState::Tombstone);
    assert_eq!(t.tombstones(), 2);
}

// Test: tombstone reuse after the deletions above.
// Assumes: "l" hashes to slot 1, the same home as "hello".
// Verifies: "abc" is updated in place, "l" claims hello's tombstone, and
// "goodbye"/"world" stay reachable.
#[test]
fn tombstone_reuse_preserves_chains() {
    let mut storage: [Slot<usize>; TABLE_SIZE] = vacant_array();
    let mut t = ProbeTable::init_with_hasher(&mut storage, Fnv64::new());
    load_collision_scenario(&mut t);
    t.delete("hello");
    t.delete("universe");

    assert_eq!(t.insert("abc", 7), Ok(Some(6)));
    assert_eq!(t.lookup("abc"), Some(&7));
    assert_eq!(slot_of(&t, "abc"), Some(3), "updated in place, not moved");

    assert_eq!(fnv1a::<u64>(b"l") % TABLE_SIZE as u64, 1);
    assert_eq!(t.insert("l", 8), Ok(None));
    assert_eq!(slot_of(&t, "l"), Some(1));
    assert_eq!(t.lookup("l"), Some(&8));
    assert_eq!(t.lookup("goodbye"), Some(&4));
    assert_eq!(t.lookup("world"), Some(&2));
    assert_eq!(t.lookup("hello"), None);
    assert_eq!(t.tombstones(), 1);
}

// Test: delete/reinsert churn on one key.
// Verifies: the key revives its own tombstone, so the chain behind it
// ("goodbye") keeps the same probe length.
#[test]
fn churn_does_not_lengthen_chains() {
    let mut storage: [Slot<usize>; TABLE_SIZE] = vacant_array();
    let mut t = ProbeTable::init_with_hasher(&mut storage, Fnv64::new());
    load_collision_scenario(&mut t);
    let before = t.probe_len("goodbye");
    for round in 0..20 {
        t.delete("universe");
        t.insert("universe", round).unwrap();
        assert_eq!(t.probe_len("goodbye"), before);
        assert_eq!(t.lookup("goodbye"), Some(&4));
    }
    assert_eq!(t.tombstones(), 0);
}

// Test: key truncation.
// Verifies: a key of exactly MAX_KEY_LENGTH bytes and a longer key with the
// same prefix alias to one stored key in one slot.
#[test]
fn truncated_keys_alias() {
    let exact = "012345678912345";
    let longer = "012345678912345-tail";
    assert_eq!(exact.len(), MAX_KEY_LENGTH);

    let mut storage: [Slot<usize>; TABLE_SIZE] = vacant_array();
    let mut t = ProbeTable::init_with_hasher(&mut storage, Fnv32::new());
    t.insert(exact, 1).unwrap();
    assert_eq!(t.lookup(longer), Some(&1));
    assert_eq!(t.insert(longer, 2), Ok(Some(1)));
    assert_eq!(t.len(), 1);
    assert_eq!(slot_of(&t, exact), slot_of(&t, longer));
    assert_eq!(t.lookup("012345678912346"), None);
    assert_eq!(t.delete(longer), Some(2));
    assert_eq!(t.lookup(exact), None);
}

// Test: both word widths behave identically apart from placement.
// Verifies: the same operation sequence yields the same observable map.
#[test]
fn word_widths_agree_on_contents() {
    let keys = ["a", "bb", "ccc", "dddd", "eeeee", "ffffff"];
    let mut s32: [Slot<usize>; 8] = vacant_array();
    let mut s64: [Slot<usize>; 8] = vacant_array();
    let mut t32 = ProbeTable::init_with_hasher(&mut s32, Fnv32::new());
    let mut t64 = ProbeTable::init_with_hasher(&mut s64, Fnv64::new());
    for (i, k) in keys.iter().enumerate() {
        t32.insert(k, i).unwrap();
        t64.insert(k, i).unwrap();
    }
    t32.delete("ccc");
    t64.delete("ccc");
    for k in keys {
        assert_eq!(t32.lookup(k), t64.lookup(k));
    }
}

// Test: exhaustion is reported instead of looping.
// Verifies: TableFull for new keys; existing keys keep working.
#[test]
fn exhaustion_is_an_error() {
    let mut storage: [Slot<usize>; 2] = vacant_array();
    let mut t = ProbeTable::init(&mut storage);
    t.insert("a", 1).unwrap();
    t.insert("b", 2).unwrap();
    let err = t.insert("c", 3).unwrap_err();
    assert_eq!(err, InsertError::TableFull);
    assert_eq!(err.to_string(), "probe table has no reusable slot");
    assert_eq!(t.lookup("c"), None);
    assert_eq!(t.insert("b", 20), Ok(Some(2)));
}
