use crate::registry::Params;
use crate::trace::{Outcome, Recorder, Step, StepKind, Trace};

/// Memo slot that has not been computed yet.
pub const UNSET: i64 = -1;
/// Coin-change amount that no combination reaches.
pub const UNREACHABLE: i64 = i64::MAX;

/// Naive recursion. The working collection is a histogram of calls per
/// argument, so the blow-up of repeated subproblems is visible.
pub fn fibonacci_naive(collection: &[i64], _params: &Params) -> Trace {
    if collection.is_empty() {
        return Trace::empty();
    }
    let n = collection.len() - 1;
    let mut rec = Recorder::new(collection);
    let value = fib_naive(&mut rec, n);
    rec.finish(Outcome::Value(value))
}

fn fib_naive(rec: &mut Recorder, k: usize) -> i64 {
    let calls = rec.get(k) + 1;
    rec.assign(k, calls, StepKind::Visit, format!("call fib({k}), call #{calls} for this argument"));
    if k <= 1 {
        return k as i64;
    }
    fib_naive(rec, k - 1) + fib_naive(rec, k - 2)
}

/// Top-down with a memo table as the working collection.
pub fn fibonacci_memo(collection: &[i64], _params: &Params) -> Trace {
    if collection.is_empty() {
        return Trace::empty();
    }
    let n = collection.len() - 1;
    let mut rec = Recorder::new(collection);
    let value = fib_memo(&mut rec, n);
    rec.finish(Outcome::Value(value))
}

fn fib_memo(rec: &mut Recorder, k: usize) -> i64 {
    let cached = rec.probe(vec![k], k, format!("call fib({k})"));
    if cached != UNSET {
        rec.record(
            Step::new(StepKind::CacheHit, format!("memo[{k}] = {cached}"))
                .highlight(vec![k])
                .resolve(vec![k]),
        );
        return cached;
    }
    let value = if k <= 1 {
        k as i64
    } else {
        fib_memo(rec, k - 1) + fib_memo(rec, k - 2)
    };
    rec.assign(k, value, StepKind::Write, format!("store memo[{k}] = {value}"));
    rec.resolve(vec![k]);
    value
}

/// Bottom-up minimum coin count. The working collection is the dp row.
pub fn coin_change(collection: &[i64], params: &Params) -> Trace {
    if collection.is_empty() {
        return Trace::empty();
    }
    let amount = collection.len() - 1;
    let mut rec = Recorder::new(collection);
    rec.assign(0, 0, StepKind::Write, "dp[0] = 0");
    for &coin in &params.coins {
        let Ok(coin) = usize::try_from(coin) else {
            continue;
        };
        if coin == 0 {
            continue;
        }
        for i in coin..=amount {
            let prev = rec.get(i - coin);
            let current = rec.get(i);
            let candidate = if prev == UNREACHABLE { UNREACHABLE } else { prev + 1 };
            rec.record(
                Step::new(
                    StepKind::Compare,
                    format!("coin {coin}: dp[{i}] vs dp[{}] + 1", i - coin),
                )
                .highlight(vec![i - coin, i])
                .counts(1, 2),
            );
            if candidate < current {
                rec.assign(i, candidate, StepKind::Write, format!("dp[{i}] = {candidate}"));
            }
        }
    }
    let best = rec.get(amount);
    let result = if best == UNREACHABLE { -1 } else { best };
    rec.resolve((0..=amount).collect());
    rec.finish(Outcome::Value(result))
}
