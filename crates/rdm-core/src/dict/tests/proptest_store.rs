//! Property-based tests for the dictionary store.
//!
//! Random insert/remove sequences over a small alphabet, checking that the
//! code trie and the word index never disagree.

use proptest::prelude::*;

use super::{entry, sample_store};
use crate::dict::{DictStore, Entry, Line};

#[derive(Debug, Clone)]
enum Op {
    Insert(Entry),
    Remove(Entry),
}

fn arb_entry() -> impl Strategy<Value = Entry> {
    (
        prop::sample::select(vec!["光", "光明", "日月", "天", "地"]),
        prop::option::of("[a-c]{0,3}"),
        prop::option::of(prop::sample::select(vec!["1", "10", "50%"])),
    )
        .prop_map(|(word, code, weight)| {
            // A weight needs a code.
            let weight = weight.filter(|_| code.as_deref().is_some_and(|c| !c.is_empty()));
            entry(word, code.as_deref(), weight)
        })
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => arb_entry().prop_map(Op::Insert),
        2 => arb_entry().prop_map(Op::Remove),
    ]
}

fn arb_code_prefix() -> impl Strategy<Value = String> {
    "[a-c]{0,2}"
}

fn assert_indexes_agree(store: &DictStore, inserted: &[Entry]) {
    let all = store.search_by_code("", false);
    assert_eq!(all.len(), store.len());
    for e in &all {
        let code = e.code().unwrap_or("");
        assert!(store.search_by_code(code, true).iter().any(|x| x.same_as(e)));
        assert!(store.search_by_word(e.word()).iter().any(|x| x.same_as(e)));
    }
    for e in inserted {
        let by_code = store
            .search_by_code(e.code().unwrap_or(""), true)
            .iter()
            .any(|x| x.same_as(e));
        let by_word = store.search_by_word(e.word()).iter().any(|x| x.same_as(e));
        assert_eq!(by_code, by_word, "indexes disagree on {e}");
        assert_eq!(by_code, store.contains(e));
    }
}

fn arb_field() -> impl Strategy<Value = String> {
    "[a-z0-9%光明天]{0,4}"
}

fn arb_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "#[^\t\r\n]{0,8}",
        ("[a-z光明天][a-z光明天]{0,3}", prop::collection::vec(arb_field(), 0..=2))
            .prop_map(|(word, rest)| {
                let mut fields = vec![word];
                fields.extend(rest);
                fields.join("\t")
            }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn trie_and_word_index_agree(ops in prop::collection::vec(arb_op(), 1..60)) {
        let mut store = sample_store();
        let mut touched = Vec::new();
        for op in &ops {
            let (e, applied, present_before) = match op {
                Op::Insert(e) => {
                    let before = store.contains(e);
                    (e, store.insert(e.clone()), before)
                }
                Op::Remove(e) => {
                    let before = store.contains(e);
                    (e, store.remove(e), before)
                }
            };
            match op {
                Op::Insert(_) => prop_assert_eq!(applied, !present_before),
                Op::Remove(_) => prop_assert_eq!(applied, present_before),
            }
            touched.push(e.clone());
            assert_indexes_agree(&store, &touched);
        }
    }

    #[test]
    fn prefix_search_is_superset(
        ops in prop::collection::vec(arb_entry(), 0..40),
        prefix in arb_code_prefix(),
    ) {
        let mut store = sample_store();
        for e in ops {
            store.insert(e);
        }
        let prefixed = store.search_by_code(&prefix, false);
        for e in store.search_by_code(&prefix, true) {
            prop_assert!(prefixed.iter().any(|x| x.same_as(e)));
        }
        for e in &prefixed {
            prop_assert!(e.code().unwrap_or("").starts_with(prefix.as_str()));
        }
        let expected = store
            .search_by_code("", false)
            .into_iter()
            .filter(|e| e.code().unwrap_or("").starts_with(prefix.as_str()))
            .count();
        prop_assert_eq!(prefixed.len(), expected);
    }

    #[test]
    fn line_round_trip(raw in arb_line(), index in 0usize..10_000) {
        let line = Line::parse(index, &raw).unwrap();
        prop_assert_eq!(line.index(), Some(index));
        prop_assert_eq!(line.to_string(), raw);
    }
}
