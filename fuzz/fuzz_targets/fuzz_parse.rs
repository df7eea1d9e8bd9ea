//! Fuzz target for `SequenceStore::from_reader`.
//!
//! Feeds arbitrary bytes through format detection and record parsing,
//! checking that malformed input is rejected with an error rather than a
//! panic, and that accepted stores uphold their basic invariants.

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;
use std::path::Path;

use ktally::store::SequenceStore;

fuzz_target!(|data: &[u8]| {
    // Parsing must never panic - it either builds a store or reports an error
    let Ok(store) = SequenceStore::from_reader(Cursor::new(data.to_vec()), Path::new("fuzz.fa"))
    else {
        return;
    };

    // An accepted store is non-empty and every record is retrievable by name
    assert!(!store.is_empty());
    for seq in &store {
        let found = store.get(&seq.name).expect("record not indexed by name");
        assert_eq!(found.name, seq.name);
        assert_eq!(found.format, store.format());
    }
});
