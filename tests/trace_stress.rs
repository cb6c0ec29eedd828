use algo_stepper::algorithms::backtracking;
use algo_stepper::utils::random_collection::{collection_rng, random_collection, MAX_COLLECTION};
use algo_stepper::{Outcome, Params, StepKind, Topic};

#[test]
#[cfg_attr(not(feature = "stress-tests"), ignore = "enable with --features stress-tests")]
fn eight_queens_finds_all_solutions() {
    let board = backtracking::empty_board(8);
    let trace = Topic::NQueens.spec().generate(&board, &Params::default());
    assert_eq!(trace.outcome(), Some(&Outcome::Solutions(92)));
    assert_eq!(trace.count(StepKind::Solution), 92);
}

#[test]
#[cfg_attr(not(feature = "stress-tests"), ignore = "enable with --features stress-tests")]
fn large_random_sorts_agree() {
    let mut rng = collection_rng(Some(2024));
    for _ in 0..25 {
        let input = random_collection(&mut rng, MAX_COLLECTION);
        let mut expected = input.clone();
        expected.sort_unstable();
        for topic in [
            Topic::BubbleSort,
            Topic::SelectionSort,
            Topic::InsertionSort,
            Topic::QuickSort,
            Topic::MergeSort,
            Topic::HeapBuild,
        ] {
            let trace = topic.spec().generate(&input, &Params::for_topic(topic));
            let result = trace.replay_onto(&input);
            if topic == Topic::HeapBuild {
                let mut heap_sorted = result.clone();
                heap_sorted.sort_unstable();
                assert_eq!(heap_sorted, expected);
            } else {
                assert_eq!(result, expected, "{topic}");
            }
        }
    }
}

#[test]
fn random_collections_respect_bounds() {
    let mut rng = collection_rng(Some(1));
    assert_eq!(random_collection(&mut rng, 0).len(), 1);
    assert_eq!(random_collection(&mut rng, 500).len(), MAX_COLLECTION);
    assert!(random_collection(&mut rng, 32)
        .iter()
        .all(|v| (10..110).contains(v)));
}
