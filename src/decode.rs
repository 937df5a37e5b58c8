use crate::error::ScheduleError;
use crate::schedule::Schedule;
use crate::solver::Verdict;
use crate::vars::VarIndexer;

/// Parse the textual answer of a DIMACS solver.
///
/// Expects an `s SATISFIABLE` or `s UNSATISFIABLE` status line; a satisfiable
/// answer carries the assignment on one or more `v `-prefixed lines of signed
/// literals, optionally terminated by a `0` sentinel. Comment lines and solver
/// chatter are ignored. Anything else is a `Parse` error, never a partial
/// result.
pub fn parse_verdict(output: &str) -> Result<Verdict, ScheduleError> {
    let mut status: Option<bool> = None;
    let mut model: Vec<i32> = Vec::new();
    let mut model_done = false;

    for line in output.lines() {
        let line = line.trim();
        if let Some(token) = strip_marker(line, 's') {
            match token {
                "SATISFIABLE" => status = Some(true),
                "UNSATISFIABLE" => status = Some(false),
                other => {
                    return Err(ScheduleError::Parse(format!("unknown status token `{}`", other)));
                }
            }
        } else if let Some(lits) = strip_marker(line, 'v') {
            if model_done {
                continue;
            }
            for tok in lits.split_whitespace() {
                let lit: i32 = tok.parse().map_err(|_| {
                    ScheduleError::Parse(format!("bad literal `{}` in assignment", tok))
                })?;
                if lit == 0 {
                    model_done = true;
                    break;
                }
                model.push(lit);
            }
        }
    }

    match status {
        None => Err(ScheduleError::Parse("no status line in solver output".into())),
        Some(false) => Ok(Verdict::Unsatisfiable),
        Some(true) => {
            if model.is_empty() {
                Err(ScheduleError::Parse("satisfiable answer without an assignment".into()))
            } else {
                Ok(Verdict::Satisfiable(model))
            }
        }
    }
}

fn strip_marker(line: &str, marker: char) -> Option<&str> {
    let mut chars = line.chars();
    if chars.next() == Some(marker) {
        let rest = chars.as_str();
        if rest.is_empty() || rest.starts_with(' ') || rest.starts_with('\t') {
            return Some(rest.trim_start());
        }
    }
    None
}

/// Map the positive literals of a satisfying assignment back to schedule
/// facts and assemble the schedule. Auxiliary counter variables fall outside
/// the indexer's range and are skipped. The assembled schedule is validated
/// before it is returned.
pub fn schedule_from_model(idx: &VarIndexer, model: &[i32]) -> Result<Schedule, ScheduleError> {
    let mut schedule = Schedule::empty(idx.teams());
    for &lit in model {
        if lit <= 0 {
            continue;
        }
        if let Some(fact) = idx.fact(lit) {
            schedule.place(fact)?;
        }
    }
    schedule.verify()?;
    Ok(schedule)
}
