use crate::cnf::Clause;

/// Result of encoding one at-most-k constraint: the clauses plus the number of
/// auxiliary variables the encoding consumed starting at `first_free_var`.
#[derive(Debug)]
pub struct AtMostK {
    pub clauses: Vec<Clause>,
    pub aux_used: i32,
}

/// Sinz sequential-counter encoding of "at most `bound` of `lits` are true".
///
/// Introduces registers `s[i][j]` ("at least j of the first i literals are
/// true") for `i` in `1..m`, `j` in `1..=k`, numbered consecutively from
/// `first_free_var`. The clauses are:
///  - propagation: a true literal i raises the count, `x_i ∧ s[i-1][j-1] → s[i][j]`,
///  - monotonicity: counts never drop, `s[i-1][j] → s[i][j]`,
///  - the bound: no literal may fire on a register that already reads k,
///    `x_i → ¬s[i-1][k]`.
///
/// Pure function of its inputs; callers thread the next-free-id counter.
pub fn at_most_k(lits: &[i32], bound: u32, first_free_var: i32) -> AtMostK {
    let m = lits.len();
    let k = bound as usize;

    if k == 0 {
        // Degenerate bound: every literal is simply forced false.
        return AtMostK {
            clauses: lits.iter().map(|l| vec![-l]).collect(),
            aux_used: 0,
        };
    }
    if m <= k {
        return AtMostK { clauses: Vec::new(), aux_used: 0 };
    }

    let reg = |i: usize, j: usize| -> i32 {
        debug_assert!(i >= 1 && i < m && j >= 1 && j <= k);
        first_free_var + ((i - 1) * k + (j - 1)) as i32
    };

    let mut clauses: Vec<Clause> = Vec::new();

    clauses.push(vec![-lits[0], reg(1, 1)]);
    for j in 2..=k {
        clauses.push(vec![-reg(1, j)]);
    }

    for i in 2..m {
        clauses.push(vec![-lits[i - 1], reg(i, 1)]);
        clauses.push(vec![-reg(i - 1, 1), reg(i, 1)]);
        for j in 2..=k {
            clauses.push(vec![-lits[i - 1], -reg(i - 1, j - 1), reg(i, j)]);
            clauses.push(vec![-reg(i - 1, j), reg(i, j)]);
        }
        clauses.push(vec![-lits[i - 1], -reg(i - 1, k)]);
    }
    clauses.push(vec![-lits[m - 1], -reg(m - 1, k)]);

    AtMostK {
        clauses,
        aux_used: ((m - 1) * k) as i32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// With the primary literals fixed, every clause of the sequential counter
    /// has at most one positive (auxiliary) literal, so the clause set is a
    /// Horn theory: it is satisfiable iff its least model, obtained by unit
    /// propagation over the definite clauses, satisfies all clauses.
    fn aux_assignment_exists(clauses: &[Clause], m: usize, mask: u32) -> bool {
        let mut forced: HashSet<i32> = HashSet::new();

        let value = |lit: i32, forced: &HashSet<i32>| -> bool {
            let v = lit.abs();
            let truth = if v as usize <= m {
                mask >> (v - 1) & 1 == 1
            } else {
                forced.contains(&v)
            };
            if lit > 0 { truth } else { !truth }
        };

        loop {
            let mut changed = false;
            for clause in clauses {
                let head = clause.iter().find(|l| **l > m as i32);
                if let Some(&head) = head {
                    if !forced.contains(&head)
                        && clause.iter().filter(|l| **l != head).all(|l| !value(*l, &forced))
                    {
                        forced.insert(head);
                        changed = true;
                    }
                }
            }
            if !changed {
                break;
            }
        }

        clauses
            .iter()
            .all(|clause| clause.iter().any(|l| value(*l, &forced)))
    }

    #[test]
    fn differential_against_brute_force() {
        for m in 1usize..=8 {
            for k in 1u32..=3 {
                let lits: Vec<i32> = (1..=m as i32).collect();
                let enc = at_most_k(&lits, k, m as i32 + 1);
                for mask in 0..(1u32 << m) {
                    let count = mask.count_ones();
                    let sat = aux_assignment_exists(&enc.clauses, m, mask);
                    assert_eq!(
                        sat,
                        count <= k,
                        "m={} k={} mask={:b}: encoding says {}, count is {}",
                        m, k, mask, sat, count
                    );
                }
            }
        }
    }

    #[test]
    fn negated_input_literals_are_supported() {
        // at most one of {!1, 2} true
        let enc = at_most_k(&[-1, 2], 1, 3);
        for mask in 0..4u32 {
            let x1 = mask & 1 == 1;
            let x2 = mask & 2 == 2;
            let count = (!x1 as u32) + (x2 as u32);
            assert_eq!(aux_assignment_exists(&enc.clauses, 2, mask), count <= 1);
        }
    }

    #[test]
    fn trivial_bound_produces_no_clauses() {
        let enc = at_most_k(&[1, 2], 2, 3);
        assert!(enc.clauses.is_empty());
        assert_eq!(enc.aux_used, 0);
    }

    #[test]
    fn zero_bound_forces_all_literals_false() {
        let enc = at_most_k(&[1, 2, 3], 0, 4);
        assert_eq!(enc.clauses, vec![vec![-1], vec![-2], vec![-3]]);
        assert_eq!(enc.aux_used, 0);
    }

    #[test]
    fn aux_count_matches_register_layout() {
        let enc = at_most_k(&[1, 2, 3, 4, 5], 2, 6);
        assert_eq!(enc.aux_used, 4 * 2);
        let max_var = enc
            .clauses
            .iter()
            .flat_map(|c| c.iter().map(|l| l.abs()))
            .max()
            .unwrap();
        assert_eq!(max_var, 5 + enc.aux_used);
    }
}
