use crate::registry::Params;
use crate::trace::{Mutation, Outcome, Recorder, Step, StepKind, Trace};

/// Board cell marker for a row without a queen.
pub const EMPTY: i64 = -1;

pub const MIN_BOARD: usize = 1;
pub const MAX_BOARD: usize = 8;

pub fn empty_board(size: usize) -> Vec<i64> {
    vec![EMPTY; size]
}

/// Row-by-row N-Queens search. The working collection is the board: entry
/// `r` holds the column of the queen in row `r`, or [`EMPTY`].
pub fn n_queens(collection: &[i64], _params: &Params) -> Trace {
    if collection.is_empty() {
        return Trace::empty();
    }
    let mut rec = Recorder::new(&empty_board(collection.len()));
    let mut solutions = 0;
    place_row(&mut rec, 0, &mut solutions);
    rec.finish(Outcome::Solutions(solutions))
}

fn place_row(rec: &mut Recorder, row: usize, solutions: &mut usize) {
    let n = rec.len();
    if row == n {
        *solutions += 1;
        rec.record(
            Step::new(StepKind::Solution, format!("solution #{solutions}"))
                .highlight((0..n).collect::<Vec<_>>()),
        );
        return;
    }
    for col in 0..n {
        if is_safe(rec.data(), row, col) {
            rec.record(
                Step::new(StepKind::Place, format!("place queen at ({row}, {col})"))
                    .highlight(vec![row])
                    .mutation(Mutation::Assign { index: row, value: col as i64 })
                    .counts(1, row as u32),
            );
            place_row(rec, row + 1, solutions);
            rec.assign(row, EMPTY, StepKind::Backtrack, format!("remove queen from ({row}, {col})"));
        } else {
            rec.record(
                Step::new(StepKind::Reject, format!("({row}, {col}) is attacked"))
                    .highlight(vec![row])
                    .counts(1, row as u32),
            );
        }
    }
}

fn is_safe(board: &[i64], row: usize, col: usize) -> bool {
    let col = col as i64;
    board[..row].iter().enumerate().all(|(r, &c)| {
        let distance = (row - r) as i64;
        c != col && (c - col).abs() != distance
    })
}
