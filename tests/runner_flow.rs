use algo_stepper::runner::delay_for_speed;
use algo_stepper::sink::VizState;
use algo_stepper::{
    Outcome, Params, Phase, RunControl, RunStatus, Session, Step, StepKind, StepperConfig,
    Topic,
};
use std::time::Duration;

fn config(speed: u32) -> StepperConfig {
    StepperConfig {
        speed,
        seed: Some(7),
        ..StepperConfig::default()
    }
}

fn sorted(values: &[i64]) -> Vec<i64> {
    let mut values = values.to_vec();
    values.sort_unstable();
    values
}

#[test]
fn speed_maps_to_inverse_delay() {
    assert_eq!(delay_for_speed(1), Duration::from_millis(1000));
    assert_eq!(delay_for_speed(4), Duration::from_millis(250));
    assert_eq!(delay_for_speed(10), Duration::from_millis(100));
    assert_eq!(delay_for_speed(0), Duration::from_millis(1000));
    assert_eq!(delay_for_speed(50), Duration::from_millis(100));
}

#[test]
fn run_control_admits_one_run_at_a_time() {
    let control = RunControl::new(5);
    assert!(control.try_start());
    assert!(!control.try_start());
    let shared = control.clone();
    shared.request_stop();
    assert!(!control.is_running());
    assert!(control.try_start());
    control.finish();
    assert!(!control.is_running());
}

#[tokio::test(start_paused = true)]
async fn run_completes_and_resolves_everything() {
    let input = vec![5, 3, 8, 1];
    let mut session =
        Session::with_collection(Topic::BubbleSort, Params::default(), &config(10), input);
    assert!(session.start());
    let report = session.wait().await.unwrap().unwrap();

    assert_eq!(report.status, RunStatus::Completed);
    assert_eq!(report.applied, report.total);
    let state = session.snapshot();
    assert_eq!(state.collection, vec![1, 3, 5, 8]);
    assert_eq!(state.comparisons, 6);
    assert_eq!(sorted(&state.resolved.iter().map(|&i| i as i64).collect::<Vec<_>>()), vec![0, 1, 2, 3]);
    assert_eq!(state.outcome, Some(Outcome::Completed));
    assert_eq!(session.phase(), Phase::Idle);
}

#[tokio::test(start_paused = true)]
async fn stop_lands_between_whole_steps() {
    let input = vec![9, 4, 7, 1, 8, 2, 6];
    let mut session = Session::with_collection(
        Topic::InsertionSort,
        Params::default(),
        &config(1),
        input.clone(),
    );
    let trace = session.preview();
    assert!(session.start());
    assert_eq!(session.phase(), Phase::Running);

    tokio::time::sleep(Duration::from_millis(2500)).await;
    session.stop();
    let report = session.wait().await.unwrap().unwrap();

    assert_eq!(report.status, RunStatus::Cancelled);
    assert!(report.applied > 0 && report.applied < report.total);
    let state = session.snapshot();
    assert_eq!(state.step_index, report.applied);

    let mut expected = input.clone();
    for step in trace.steps().iter().take(report.applied) {
        if let Some(mutation) = &step.mutation {
            mutation.apply(&mut expected);
        }
    }
    assert_eq!(state.collection, expected);
    assert_eq!(sorted(&state.collection), sorted(&input));
    assert_eq!(state.phase, "idle");
    assert_eq!(session.phase(), Phase::Idle);
}

#[tokio::test(start_paused = true)]
async fn stopping_ignores_start_and_repeated_stop() {
    let mut session = Session::with_collection(
        Topic::BubbleSort,
        Params::default(),
        &config(1),
        vec![6, 5, 4, 3, 2, 1],
    );
    assert!(session.start());
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(session.phase(), Phase::Running);

    session.stop();
    assert_eq!(session.phase(), Phase::Stopping);
    assert_eq!(session.snapshot().phase, "stopping");
    assert!(!session.start());
    session.stop();
    let stop_entries = session
        .snapshot()
        .logs
        .iter()
        .filter(|entry| entry.as_str() == "stop requested")
        .count();
    assert_eq!(stop_entries, 1);

    let report = session.wait().await.unwrap().unwrap();
    assert_eq!(report.status, RunStatus::Cancelled);
    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(session.snapshot().phase, "idle");
}

#[tokio::test(start_paused = true)]
async fn start_while_running_is_ignored() {
    let mut session =
        Session::with_collection(Topic::SelectionSort, Params::default(), &config(2), vec![3, 2, 1]);
    assert!(session.start());
    let total = session.snapshot().steps_total;
    assert!(!session.start());
    assert_eq!(session.snapshot().steps_total, total);

    let report = session.wait().await.unwrap().unwrap();
    assert_eq!(report.status, RunStatus::Completed);
    assert_eq!(report.total, total);
}

#[tokio::test(start_paused = true)]
async fn start_after_completion_runs_on_current_collection() {
    let mut session =
        Session::with_collection(Topic::BubbleSort, Params::default(), &config(10), vec![2, 1]);
    assert!(session.start());
    session.wait().await.unwrap();
    assert_eq!(session.snapshot().collection, vec![1, 2]);

    assert!(session.start());
    let report = session.wait().await.unwrap().unwrap();
    assert_eq!(report.status, RunStatus::Completed);
    let state = session.snapshot();
    assert_eq!(state.collection, vec![1, 2]);
    assert_eq!(state.comparisons, 1);
}

#[tokio::test(start_paused = true)]
async fn reset_stops_the_run_and_is_idempotent() {
    let input = vec![6, 5, 4, 3, 2, 1];
    let mut session =
        Session::with_collection(Topic::BubbleSort, Params::default(), &config(1), input.clone());
    assert!(session.start());
    tokio::time::sleep(Duration::from_millis(3500)).await;

    session.reset().await.unwrap();
    let first = session.snapshot();
    assert_eq!(first.collection, input);
    assert_eq!(first.step_index, 0);
    assert!(first.resolved.is_empty());
    assert!(first.outcome.is_none());
    assert_eq!(session.phase(), Phase::Idle);

    session.reset().await.unwrap();
    let second = session.snapshot();
    assert_eq!(second.collection, first.collection);
    assert_eq!(second.step_index, 0);
    assert_eq!(session.phase(), Phase::Idle);
}

#[tokio::test(start_paused = true)]
async fn seeded_sessions_reseed_reproducibly() {
    let mut one = Session::new(Topic::MergeSort, Params::default(), &config(5));
    let two = Session::new(Topic::MergeSort, Params::default(), &config(5));
    assert_eq!(one.snapshot().collection, two.snapshot().collection);
    assert_eq!(one.snapshot().collection.len(), StepperConfig::default().collection_size);

    let before = one.snapshot().collection;
    one.reset().await.unwrap();
    let after = one.snapshot().collection;
    assert_eq!(after.len(), before.len());
    assert!(after.iter().all(|v| (10..110).contains(v)));
}

#[tokio::test(start_paused = true)]
async fn resolved_set_only_grows_during_a_run() {
    let mut session = Session::with_collection(
        Topic::QuickSort,
        Params::default(),
        &config(10),
        vec![8, 3, 9, 1, 7, 2, 6, 4],
    );
    assert!(session.start());
    let mut previous: Vec<usize> = Vec::new();
    loop {
        tokio::time::sleep(Duration::from_millis(50)).await;
        let state = session.snapshot();
        assert!(state.resolved.starts_with(&previous));
        previous = state.resolved;
        if session.phase() == Phase::Idle {
            break;
        }
    }
    let report = session.wait().await.unwrap().unwrap();
    assert_eq!(report.status, RunStatus::Completed);
    assert_eq!(previous.len(), 8);
}

#[tokio::test(start_paused = true)]
async fn empty_search_completes_as_not_found() {
    let mut session = Session::with_collection(
        Topic::LinearSearch,
        Params::for_topic(Topic::LinearSearch),
        &config(5),
        Vec::new(),
    );
    assert!(session.start());
    let report = session.wait().await.unwrap().unwrap();
    assert_eq!(report.status, RunStatus::Completed);
    assert_eq!(report.total, 0);
    let state = session.snapshot();
    assert_eq!(state.outcome, Some(Outcome::NotFound));
    assert_eq!(state.banner.as_deref(), Some("not found"));
}

#[tokio::test(start_paused = true)]
async fn search_keeps_only_the_match_resolved() {
    let mut session = Session::new(
        Topic::LinearSearch,
        Params::for_topic(Topic::LinearSearch),
        &config(10),
    );
    assert!(session.start());
    session.wait().await.unwrap();
    let state = session.snapshot();
    assert_eq!(state.outcome, Some(Outcome::Found { index: 3 }));
    assert_eq!(state.resolved, vec![3]);
}

#[tokio::test(start_paused = true)]
async fn speed_changes_apply_to_the_next_delay() {
    let mut session =
        Session::with_collection(Topic::BubbleSort, Params::default(), &config(1), vec![4, 3, 2, 1]);
    assert_eq!(session.set_speed(10), 10);
    assert_eq!(session.set_speed(0), 1);
    assert_eq!(session.set_speed(5), 5);
    assert_eq!(session.snapshot().speed, 5);
    assert_eq!(session.control().delay(), Duration::from_millis(200));
    assert!(session.start());
    session.wait().await.unwrap();
}

#[test]
fn sink_applies_a_step_in_full() {
    let mut state = VizState::new(Topic::BubbleSort, vec![3, 1, 2], 5);
    state.begin_run(2);
    let step = Step::new(StepKind::Swap, "swap")
        .highlight(vec![0, 1])
        .mutation(algo_stepper::Mutation::Swap(0, 1))
        .resolve(vec![1])
        .counts(1, 2);
    state.apply(&step);
    state.apply(&Step::new(StepKind::Resolve, "again").resolve(vec![1, 2]));

    assert_eq!(state.collection, vec![1, 3, 2]);
    assert_eq!(state.resolved, vec![1, 2]);
    assert!(state.highlight.is_empty());
    assert_eq!(state.comparisons, 1);
    assert_eq!(state.accesses, 2);
    assert_eq!(state.step_index, 2);
    assert_eq!(state.narration, "again");
}

#[test]
fn sink_log_is_bounded() {
    let mut state = VizState::new(Topic::BubbleSort, vec![1], 5);
    for i in 0..200 {
        state.log(format!("entry {i}"));
    }
    assert_eq!(state.logs.len(), algo_stepper::sink::LOG_LIMIT);
    assert_eq!(state.logs.back().map(String::as_str), Some("entry 199"));
}

#[tokio::test(start_paused = true)]
async fn traversals_only_resolve_visited_nodes() {
    let from_five = Params {
        start: 5,
        ..Params::default()
    };
    let mut short =
        Session::with_collection(Topic::BreadthFirst, from_five, &config(10), vec![1, 2, 3]);
    assert!(short.start());
    let report = short.wait().await.unwrap().unwrap();
    assert_eq!(report.total, 0);
    assert!(short.snapshot().resolved.is_empty());

    let mut long = Session::with_collection(
        Topic::DepthFirst,
        Params::default(),
        &config(10),
        (0..8).collect(),
    );
    assert!(long.start());
    long.wait().await.unwrap();
    let state = long.snapshot();
    assert_eq!(sorted(&state.resolved.iter().map(|&i| i as i64).collect::<Vec<_>>()), vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(state.visited.len(), 6);
}

#[tokio::test(start_paused = true)]
async fn hash_search_session_ends_on_the_banner() {
    let mut session =
        Session::new(Topic::HashSearch, Params::for_topic(Topic::HashSearch), &config(10));
    assert_eq!(session.snapshot().collection, vec![2, 0, 0, 0, 1, 0, 1]);
    assert!(session.start());
    session.wait().await.unwrap();
    let state = session.snapshot();
    assert_eq!(state.banner.as_deref(), Some("'dev' in bucket 0"));
    assert_eq!(state.resolved, vec![0]);
}
