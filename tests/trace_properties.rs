use algo_stepper::algorithms::{
    backtracking, dynamic, hashing, heap, trie, HeapOrder, PivotStrategy,
};
use algo_stepper::{Outcome, Params, StepKind, Topic, Trace};
use proptest::prelude::*;

const SORTS: [Topic; 5] = [
    Topic::BubbleSort,
    Topic::SelectionSort,
    Topic::InsertionSort,
    Topic::QuickSort,
    Topic::MergeSort,
];

fn generate(topic: Topic, collection: &[i64], params: &Params) -> Trace {
    let spec = topic.spec();
    let collection = spec.prepare_collection(collection.to_vec());
    spec.generate(&collection, &params.clone().clamped(topic))
}

fn sorted(values: &[i64]) -> Vec<i64> {
    let mut values = values.to_vec();
    values.sort_unstable();
    values
}

#[test]
fn generators_are_deterministic() {
    let collection = [42, 7, 19, 88, 3, 61, 25];
    for topic in Topic::ALL {
        let params = Params::for_topic(topic);
        let first = generate(topic, &collection, &params);
        let second = generate(topic, &collection, &params);
        assert_eq!(first, second, "{topic} produced two different traces");
    }
}

#[test]
fn bubble_sort_counts_every_comparison() {
    let trace = generate(Topic::BubbleSort, &[5, 3, 8, 1], &Params::default());
    assert_eq!(trace.count(StepKind::Compare), 6);
    assert_eq!(trace.comparisons(), 6);
    assert_eq!(trace.replay_onto(&[5, 3, 8, 1]), vec![1, 3, 5, 8]);
    assert_eq!(trace.outcome(), Some(&Outcome::Completed));
}

#[test]
fn every_sort_orders_the_collection() {
    let input = [9, 1, 5, 2, 7];
    for topic in SORTS {
        let trace = generate(topic, &input, &Params::for_topic(topic));
        assert_eq!(trace.replay_onto(&input), vec![1, 2, 5, 7, 9], "{topic}");
    }
}

#[test]
fn quick_sort_handles_every_pivot_strategy() {
    let input = [4, 4, 1, 9, 0, 7, 4, 3];
    for pivot in [PivotStrategy::First, PivotStrategy::Middle, PivotStrategy::Last] {
        let params = Params {
            pivot,
            ..Params::default()
        };
        let trace = generate(Topic::QuickSort, &input, &params);
        assert_eq!(trace.replay_onto(&input), sorted(&input), "pivot {pivot}");
    }
}

#[test]
fn sorts_of_empty_collections_are_empty() {
    for topic in SORTS {
        assert!(generate(topic, &[], &Params::default()).is_empty(), "{topic}");
    }
}

#[test]
fn binary_search_finds_target_in_few_probes() {
    let collection = [2, 5, 8, 12, 16, 23, 38, 45, 56, 67, 78];
    let params = Params::for_topic(Topic::BinarySearch);
    assert_eq!(params.target, 23);
    let trace = generate(Topic::BinarySearch, &collection, &params);
    assert_eq!(trace.outcome(), Some(&Outcome::Found { index: 5 }));
    assert!(trace.count(StepKind::Probe) <= 4);
}

#[test]
fn binary_search_sorts_unsorted_input_first() {
    let spec = Topic::BinarySearch.spec();
    let prepared = spec.prepare_collection(vec![23, 2, 16, 8]);
    assert_eq!(prepared, vec![2, 8, 16, 23]);
    let params = Params::for_topic(Topic::BinarySearch);
    let trace = spec.generate(&prepared, &params);
    assert_eq!(trace.outcome(), Some(&Outcome::Found { index: 3 }));
}

#[test]
fn missing_target_is_not_found_and_leaves_collection_alone() {
    let collection = [15, 7, 23, 42, 8, 31, 19, 5];
    for topic in [Topic::LinearSearch, Topic::BinarySearch, Topic::BstLookup] {
        let params = Params {
            target: 999,
            ..Params::for_topic(topic)
        };
        let prepared = topic.spec().prepare_collection(collection.to_vec());
        let trace = topic.spec().generate(&prepared, &params);
        assert_eq!(trace.outcome(), Some(&Outcome::NotFound), "{topic}");
        assert_eq!(trace.replay_onto(&prepared), prepared, "{topic}");
    }
}

#[test]
fn linear_search_probes_until_match() {
    let collection = [15, 7, 23, 42, 8];
    let trace = generate(Topic::LinearSearch, &collection, &Params::for_topic(Topic::LinearSearch));
    assert_eq!(trace.outcome(), Some(&Outcome::Found { index: 3 }));
    assert_eq!(trace.count(StepKind::Probe), 4);
}

#[test]
fn pair_sum_reports_both_indices() {
    let collection = [1, 3, 5, 7, 9, 11, 13, 15];
    let trace = generate(Topic::PairSum, &collection, &Params::for_topic(Topic::PairSum));
    match trace.outcome() {
        Some(Outcome::Pair { left, right }) => {
            assert_eq!(collection[*left] + collection[*right], 16);
        }
        other => panic!("expected a pair, got {other:?}"),
    }

    let params = Params {
        target: 2,
        ..Params::for_topic(Topic::PairSum)
    };
    let trace = generate(Topic::PairSum, &collection, &params);
    assert_eq!(trace.outcome(), Some(&Outcome::NotFound));
}

#[test]
fn pair_sum_handles_extreme_values() {
    let params = Params::for_topic(Topic::PairSum);
    let trace = generate(Topic::PairSum, &[i64::MAX, 1], &params);
    assert_eq!(trace.outcome(), Some(&Outcome::NotFound));
    assert_eq!(trace.count(StepKind::Compare), 1);

    let params = Params {
        target: -1,
        ..params
    };
    let trace = generate(Topic::PairSum, &[i64::MAX, i64::MIN], &params);
    assert_eq!(trace.outcome(), Some(&Outcome::Pair { left: 0, right: 1 }));
}

#[test]
fn graph_traversals_visit_in_expected_order() {
    let nodes: Vec<i64> = (0..6).collect();
    let bfs = generate(Topic::BreadthFirst, &nodes, &Params::default());
    assert_eq!(bfs.visit_order(), vec![0, 1, 2, 3, 4, 5]);
    let dfs = generate(Topic::DepthFirst, &nodes, &Params::default());
    assert_eq!(dfs.visit_order(), vec![0, 1, 3, 4, 5, 2]);

    let from_five = Params {
        start: 5,
        ..Params::default()
    };
    let bfs = generate(Topic::BreadthFirst, &nodes, &from_five);
    assert_eq!(bfs.visit_order(), vec![5, 2, 4, 0, 1, 3]);
}

#[test]
fn tree_traversals_follow_their_definitions() {
    let values = [4, 2, 6, 1, 3, 5, 7];
    let params = Params::default();
    let cases = [
        (Topic::InOrder, vec![1, 2, 3, 4, 5, 6, 7]),
        (Topic::PreOrder, vec![4, 2, 1, 3, 6, 5, 7]),
        (Topic::PostOrder, vec![1, 3, 2, 5, 7, 6, 4]),
        (Topic::LevelOrder, vec![4, 2, 6, 1, 3, 5, 7]),
    ];
    for (topic, expected) in cases {
        assert_eq!(generate(topic, &values, &params).visit_order(), expected, "{topic}");
    }
}

#[test]
fn bst_lookup_walks_root_to_target() {
    let values = [4, 2, 6, 1, 3, 5, 7];
    let trace = generate(Topic::BstLookup, &values, &Params::for_topic(Topic::BstLookup));
    assert_eq!(trace.outcome(), Some(&Outcome::Found { index: 5 }));
    assert_eq!(trace.count(StepKind::Probe), 3);
}

#[test]
fn heap_operations_keep_heap_order() {
    let max_heap = [90, 80, 70, 60, 50, 40, 30];
    let params = Params::for_topic(Topic::HeapInsert);
    let inserted = generate(Topic::HeapInsert, &max_heap, &params).replay_onto(&max_heap);
    assert_eq!(inserted, vec![90, 85, 70, 80, 50, 40, 30, 60]);
    assert!(heap::is_heap(&inserted, HeapOrder::Max));

    let trace = generate(Topic::HeapExtract, &max_heap, &params);
    assert_eq!(trace.outcome(), Some(&Outcome::Value(90)));
    let remaining = trace.replay_onto(&max_heap);
    assert_eq!(remaining.len(), 6);
    assert!(heap::is_heap(&remaining, HeapOrder::Max));

    let shuffled = [3, 9, 1, 7, 5, 8, 2];
    for order in [HeapOrder::Max, HeapOrder::Min] {
        let params = Params {
            heap_order: order,
            ..Params::default()
        };
        let built = generate(Topic::HeapBuild, &shuffled, &params).replay_onto(&shuffled);
        assert!(heap::is_heap(&built, order), "{order} heap");
        assert_eq!(sorted(&built), sorted(&shuffled));
    }
}

#[test]
fn n_queens_counts_solutions() {
    for (size, expected) in [(1, 1), (2, 0), (3, 0), (4, 2), (5, 10)] {
        let board = backtracking::empty_board(size);
        let trace = generate(Topic::NQueens, &board, &Params::default());
        assert_eq!(trace.outcome(), Some(&Outcome::Solutions(expected)), "n = {size}");
        assert_eq!(trace.count(StepKind::Solution), expected);
        assert_eq!(trace.replay_onto(&board), board, "board must be cleared by backtracking");
    }
}

#[test]
fn no_solution_banner_reads_like_any_other_result() {
    assert_eq!(Outcome::Solutions(0).banner(), "no solution");
    assert_eq!(Outcome::NotFound.banner(), "not found");
    assert_eq!(Outcome::Found { index: 2 }.banner(), "found at index 2");
}

#[test]
fn trie_queries_walk_the_dictionary() {
    let search = Params::for_topic(Topic::TrieSearch);
    let trace = generate(Topic::TrieSearch, &trie::query_collection("apple"), &search);
    assert_eq!(trace.outcome(), Some(&Outcome::Found { index: 4 }));

    let trace = generate(Topic::TrieSearch, &trie::query_collection("appl"), &search);
    assert_eq!(trace.outcome(), Some(&Outcome::NotFound));

    let prefix = Params::for_topic(Topic::TriePrefix);
    let trace = generate(Topic::TriePrefix, &trie::query_collection("ap"), &prefix);
    assert_eq!(trace.outcome(), Some(&Outcome::Found { index: 1 }));

    let trace = generate(Topic::TriePrefix, &trie::query_collection("cat"), &prefix);
    assert_eq!(trace.outcome(), Some(&Outcome::NotFound));

    let complete = Params::for_topic(Topic::TrieAutocomplete);
    let trace = generate(Topic::TrieAutocomplete, &trie::query_collection("app"), &complete);
    let expected: Vec<String> = ["app", "apple", "application", "apply"]
        .iter()
        .map(|w| w.to_string())
        .collect();
    assert_eq!(trace.outcome(), Some(&Outcome::Words(expected)));
}

#[test]
fn fibonacci_variants_agree() {
    let naive = generate(Topic::Fibonacci, &vec![0; 7], &Params::default());
    assert_eq!(naive.outcome(), Some(&Outcome::Value(8)));
    assert_eq!(naive.count(StepKind::Visit), 25);

    let memo = generate(Topic::FibonacciMemo, &vec![dynamic::UNSET; 7], &Params::default());
    assert_eq!(memo.outcome(), Some(&Outcome::Value(8)));
    assert!(memo.count(StepKind::CacheHit) > 0);
    assert_eq!(memo.replay_onto(&vec![dynamic::UNSET; 7]), vec![0, 1, 1, 2, 3, 5, 8]);
}

#[test]
fn coin_change_finds_minimum_coins() {
    let params = Params::for_topic(Topic::CoinChange);
    let row = vec![dynamic::UNREACHABLE; params.amount + 1];
    let trace = generate(Topic::CoinChange, &row, &params);
    assert_eq!(trace.outcome(), Some(&Outcome::Value(3)));

    let params = Params {
        coins: vec![2],
        amount: 3,
        ..Params::default()
    };
    let row = vec![dynamic::UNREACHABLE; 4];
    let trace = generate(Topic::CoinChange, &row, &params);
    assert_eq!(trace.outcome(), Some(&Outcome::Value(-1)));
}

proptest! {
    #[test]
    fn sort_steps_preserve_the_multiset(values in prop::collection::vec(-50i64..150, 0..24)) {
        let expected = sorted(&values);
        for topic in SORTS {
            let trace = generate(topic, &values, &Params::for_topic(topic));
            let mut data = values.clone();
            for step in &trace {
                if let Some(mutation) = &step.mutation {
                    mutation.apply(&mut data);
                }
                prop_assert_eq!(sorted(&data), expected.clone());
            }
            prop_assert_eq!(data, expected.clone());
        }
    }
}

#[test]
fn trie_lookups_match_the_dictionary() {
    let dictionary = trie::Trie::from_words(&trie::DEFAULT_WORDS[..]);
    assert!(dictionary.contains("april"));
    assert!(!dictionary.contains("apr"));
    assert!(dictionary.has_prefix("apr"));
    assert!(!dictionary.has_prefix("c"));
    assert_eq!(dictionary.complete("be"), vec!["best", "better"]);
    assert_eq!(trie::query_text(&trie::query_collection("apply")), "apply");
}

#[test]
fn single_element_sorts_resolve_without_comparing() {
    for topic in SORTS {
        let trace = generate(topic, &[42], &Params::for_topic(topic));
        assert_eq!(trace.comparisons(), 0, "{topic}");
        assert!(
            trace.iter().any(|step| step.resolved.contains(&0)),
            "{topic} never resolved the only element"
        );
    }
}

#[test]
fn hash_function_weights_each_character_by_position() {
    assert_eq!(hashing::bucket_of(""), 0);
    assert_eq!(hashing::bucket_of("a"), 97 % 7);
    assert_eq!(hashing::bucket_of("name"), 6);
    assert_eq!(hashing::bucket_of("age"), 4);
    assert_eq!(hashing::bucket_of("city"), 0);
    assert_eq!(hashing::bucket_of("role"), 0);

    let mut table = hashing::HashTable::default();
    assert!(table.insert("city", "Paris"));
    assert!(table.insert("role", "dev"));
    assert!(!table.insert("city", "Rome"));
    assert_eq!(table.chain(0).len(), 2);
    assert_eq!(table.get("city"), Some("Rome"));
    assert_eq!(table.remove("role").as_deref(), Some("dev"));
    assert_eq!(table.get("role"), None);
}

#[test]
fn hash_insert_chains_collisions_and_updates_existing_keys() {
    let params = Params::for_topic(Topic::HashInsert);
    let empty = vec![0; hashing::BUCKETS];
    let trace = generate(Topic::HashInsert, &empty, &params);
    assert_eq!(trace.replay_onto(&empty), vec![2, 0, 0, 0, 1, 0, 1]);
    assert_eq!(trace.outcome(), Some(&Outcome::Completed));

    let writes: Vec<&str> = trace
        .iter()
        .filter(|step| step.kind == StepKind::Write)
        .map(|step| step.note.as_str())
        .collect();
    assert_eq!(writes.len(), 5);
    assert!(writes[3].starts_with("collision"), "{}", writes[3]);
    assert!(writes[4].starts_with("update 'name'"), "{}", writes[4]);
    let update = trace.iter().rev().find(|step| step.kind == StepKind::Write).unwrap();
    assert!(update.mutation.is_none());
}

#[test]
fn hash_search_walks_the_chain_and_reports_misses() {
    let table = hashing::HashTable::from_entries(&hashing::default_entries()).chain_lengths();

    let params = Params::for_topic(Topic::HashSearch);
    let trace = generate(Topic::HashSearch, &table, &params);
    assert_eq!(
        trace.outcome(),
        Some(&Outcome::Entry {
            bucket: 0,
            value: "dev".to_string()
        })
    );
    assert_eq!(trace.count(StepKind::Compare), 2);
    assert_eq!(trace.replay_onto(&table), table);

    let missing = Params {
        word: "zzz".to_string(),
        ..params
    };
    let trace = generate(Topic::HashSearch, &table, &missing);
    assert_eq!(trace.outcome(), Some(&Outcome::NotFound));
    assert_eq!(trace.count(StepKind::Compare), 1);
    assert_eq!(Outcome::NotFound.banner(), "not found");
}

#[test]
fn hash_delete_unlinks_the_entry() {
    let table = hashing::HashTable::from_entries(&hashing::default_entries()).chain_lengths();
    let trace = generate(Topic::HashDelete, &table, &Params::for_topic(Topic::HashDelete));
    assert_eq!(
        trace.outcome(),
        Some(&Outcome::Removed {
            bucket: 0,
            value: "Paris".to_string()
        })
    );
    assert_eq!(trace.replay_onto(&table), vec![1, 0, 0, 0, 1, 0, 1]);

    let absent = Params {
        word: "email".to_string(),
        ..Params::for_topic(Topic::HashDelete)
    };
    let trace = generate(Topic::HashDelete, &table, &absent);
    assert_eq!(trace.outcome(), Some(&Outcome::NotFound));
    assert_eq!(trace.replay_onto(&table), table);
}

#[test]
fn linked_list_traversal_visits_head_to_tail() {
    let trace = generate(Topic::LinkedList, &[10, 20, 30, 40], &Params::default());
    assert_eq!(trace.visit_order(), vec![10, 20, 30, 40]);
    assert!(trace.steps()[3].note.ends_with("next is null"));
    assert!(generate(Topic::LinkedList, &[], &Params::default()).is_empty());
}
