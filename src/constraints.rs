use itertools::Itertools;
use log::*;

use crate::cardinality;
use crate::cnf::{Clause, CnfFormula};
use crate::error::ScheduleError;
use crate::vars::{Fact, VarIndexer};

/// Per-team-per-period appearance cap: the fairness rule of the tournament.
pub const PERIOD_APPEARANCE_CAP: u32 = 2;

/// Every team plays exactly one match in every week: an at-least-one clause
/// over all of the team's candidate facts for that week, plus pairwise
/// exclusion over the same set.
pub fn one_match_per_team_and_week(idx: &VarIndexer) -> Vec<Clause> {
    let mut clauses = Vec::new();
    for team in 1..=idx.teams() {
        for week in 1..=idx.weeks() {
            let lits = team_week_lits(idx, team, week);
            clauses.push(lits.clone());
            clauses.extend(pairwise_at_most_one(&lits));
        }
    }
    clauses
}

/// Every unordered pair of teams meets exactly once over the tournament,
/// counting both home/away orientations in every week/period cell.
pub fn each_pair_meets_once(idx: &VarIndexer) -> Vec<Clause> {
    let mut clauses = Vec::new();
    for t1 in 1..=idx.teams() {
        for t2 in (t1 + 1)..=idx.teams() {
            let mut lits = Vec::new();
            for week in 1..=idx.weeks() {
                for period in 1..=idx.periods() {
                    lits.push(idx.var(Fact { week, period, home: t1, away: t2 }));
                    lits.push(idx.var(Fact { week, period, home: t2, away: t1 }));
                }
            }
            clauses.push(lits.clone());
            clauses.extend(pairwise_at_most_one(&lits));
        }
    }
    clauses
}

/// Every (week, period) slot hosts at most one match. Since a fact names both
/// occupants of the slot, pairwise exclusion over all facts in the cell covers
/// the home and the away position at once.
pub fn at_most_one_match_per_slot(idx: &VarIndexer) -> Vec<Clause> {
    let mut clauses = Vec::new();
    for week in 1..=idx.weeks() {
        for period in 1..=idx.periods() {
            let mut lits = Vec::new();
            for home in 1..=idx.teams() {
                for away in 1..=idx.teams() {
                    if home != away {
                        lits.push(idx.var(Fact { week, period, home, away }));
                    }
                }
            }
            clauses.extend(pairwise_at_most_one(&lits));
        }
    }
    clauses
}

/// Every team appears in any single period at most twice across the whole
/// tournament, via the sequential counter. Auxiliary ids continue from
/// `next_var`, which is advanced past the registers used.
pub fn period_appearance_cap(idx: &VarIndexer, next_var: &mut i32) -> Vec<Clause> {
    let mut clauses = Vec::new();
    for team in 1..=idx.teams() {
        for period in 1..=idx.periods() {
            let mut lits = Vec::new();
            for week in 1..=idx.weeks() {
                for other in 1..=idx.teams() {
                    if other != team {
                        lits.push(idx.var(Fact { week, period, home: team, away: other }));
                        lits.push(idx.var(Fact { week, period, home: other, away: team }));
                    }
                }
            }
            let enc = cardinality::at_most_k(&lits, PERIOD_APPEARANCE_CAP, *next_var);
            *next_var += enc.aux_used;
            clauses.extend(enc.clauses);
        }
    }
    clauses
}

/// Build the full formula for the tournament of `idx.teams()` teams.
///
/// Each constraint family returns its own owned clause set; they are merged
/// here. A final range check over all literals guards against numbering bugs.
pub fn build_formula(idx: &VarIndexer) -> Result<CnfFormula, ScheduleError> {
    let mut clauses = one_match_per_team_and_week(idx);
    clauses.extend(each_pair_meets_once(idx));
    clauses.extend(at_most_one_match_per_slot(idx));

    let mut next_var = idx.num_vars() + 1;
    clauses.extend(period_appearance_cap(idx, &mut next_var));
    let num_vars = next_var - 1;

    for clause in &clauses {
        for &lit in clause {
            if lit == 0 || lit.abs() > num_vars {
                return Err(ScheduleError::Encoding(format!(
                    "literal {} outside variable range 1..={}",
                    lit, num_vars
                )));
            }
        }
    }

    debug!(
        "encoded {} teams: {} vars ({} primary), {} clauses",
        idx.teams(),
        num_vars,
        idx.num_vars(),
        clauses.len()
    );

    Ok(CnfFormula { num_vars, clauses })
}

fn team_week_lits(idx: &VarIndexer, team: u32, week: u32) -> Vec<i32> {
    let mut lits = Vec::new();
    for period in 1..=idx.periods() {
        for other in 1..=idx.teams() {
            if other != team {
                lits.push(idx.var(Fact { week, period, home: team, away: other }));
                lits.push(idx.var(Fact { week, period, home: other, away: team }));
            }
        }
    }
    lits
}

fn pairwise_at_most_one(lits: &[i32]) -> Vec<Clause> {
    lits.iter()
        .copied()
        .tuple_combinations::<(_, _)>()
        .map(|(a, b)| vec![-a, -b])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formula_literals_stay_in_range() {
        for n in &[4u32, 6] {
            let idx = VarIndexer::new(*n);
            let formula = build_formula(&idx).unwrap();
            assert!(formula.num_vars > idx.num_vars());
            assert!(formula
                .clauses
                .iter()
                .flatten()
                .all(|l| *l != 0 && l.abs() <= formula.num_vars));
        }
    }

    #[test]
    fn at_least_one_clause_counts() {
        let idx = VarIndexer::new(4);
        let all_positive = |c: &Clause| c.iter().all(|l| *l > 0);

        // one per team and week
        let team_week = one_match_per_team_and_week(&idx);
        assert_eq!(team_week.iter().filter(|c| all_positive(c)).count(), 4 * 3);

        // one per unordered pair
        let pairs = each_pair_meets_once(&idx);
        assert_eq!(pairs.iter().filter(|c| all_positive(c)).count(), 6);

        // slot exclusivity is pure mutual exclusion
        let slots = at_most_one_match_per_slot(&idx);
        assert!(slots.iter().all(|c| c.len() == 2 && !all_positive(c)));
    }

    #[test]
    fn period_cap_draws_fresh_aux_ids() {
        let idx = VarIndexer::new(6);
        let mut next_var = idx.num_vars() + 1;
        let clauses = period_appearance_cap(&idx, &mut next_var);
        assert!(next_var > idx.num_vars() + 1);
        let max_lit = clauses.iter().flatten().map(|l| l.abs()).max().unwrap();
        assert_eq!(max_lit, next_var - 1);
    }
}
