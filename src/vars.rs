pub type TeamId = u32;
pub type WeekId = u32;
pub type PeriodId = u32;

/// One scheduling fact: `home` hosts `away` in the given week and period.
///
/// The home/away orientation is carried by the ordering of the two teams, so
/// each match has exactly one fact per orientation and no separate slot tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fact {
    pub week: WeekId,
    pub period: PeriodId,
    pub home: TeamId,
    pub away: TeamId,
}

/// Bijection between valid facts and dense DIMACS variable ids `1..=num_vars`.
///
/// The numbering is a fixed arithmetic layout (week-major, then period, then
/// ordered team pair), so the same team count always produces the same ids.
/// Auxiliary variables introduced later by cardinality encodings live strictly
/// above `num_vars`.
#[derive(Debug, Clone, Copy)]
pub struct VarIndexer {
    teams: u32,
}

impl VarIndexer {
    pub fn new(teams: u32) -> VarIndexer {
        assert!(teams >= 4 && teams % 2 == 0);
        VarIndexer { teams }
    }

    pub fn teams(&self) -> u32 {
        self.teams
    }

    pub fn weeks(&self) -> u32 {
        self.teams - 1
    }

    pub fn periods(&self) -> u32 {
        self.teams / 2
    }

    /// Number of primary variables: one per valid fact.
    pub fn num_vars(&self) -> i32 {
        let n = self.teams;
        (self.weeks() * self.periods() * n * (n - 1)) as i32
    }

    pub fn var(&self, f: Fact) -> i32 {
        let n = self.teams;
        assert!(f.home != f.away);
        assert!(f.home >= 1 && f.home <= n && f.away >= 1 && f.away <= n);
        assert!(f.week >= 1 && f.week <= self.weeks());
        assert!(f.period >= 1 && f.period <= self.periods());

        // Ordered pair (home, away) with the diagonal removed.
        let pair = (f.home - 1) * (n - 1) + if f.away < f.home { f.away - 1 } else { f.away - 2 };
        let cell = (f.week - 1) * self.periods() + (f.period - 1);
        (cell * n * (n - 1) + pair + 1) as i32
    }

    /// Inverse of `var`. Returns `None` for ids outside the primary range,
    /// which is how auxiliary counter variables are skipped during decoding.
    pub fn fact(&self, var: i32) -> Option<Fact> {
        assert!(var >= 1);
        if var > self.num_vars() {
            return None;
        }
        let n = self.teams;
        let v = (var - 1) as u32;
        let pair = v % (n * (n - 1));
        let cell = v / (n * (n - 1));
        let home = pair / (n - 1) + 1;
        let off = pair % (n - 1);
        let away = if off + 1 < home { off + 1 } else { off + 2 };
        Some(Fact {
            week: cell / self.periods() + 1,
            period: cell % self.periods() + 1,
            home,
            away,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn all_facts(idx: &VarIndexer) -> Vec<Fact> {
        let mut facts = Vec::new();
        for week in 1..=idx.weeks() {
            for period in 1..=idx.periods() {
                for home in 1..=idx.teams() {
                    for away in 1..=idx.teams() {
                        if home != away {
                            facts.push(Fact { week, period, home, away });
                        }
                    }
                }
            }
        }
        facts
    }

    #[test]
    fn ids_are_dense_and_unique() {
        for n in &[4u32, 6, 8] {
            let idx = VarIndexer::new(*n);
            let facts = all_facts(&idx);
            assert_eq!(facts.len() as i32, idx.num_vars());

            let ids: HashSet<i32> = facts.iter().map(|f| idx.var(*f)).collect();
            assert_eq!(ids.len(), facts.len());
            assert_eq!(*ids.iter().min().unwrap(), 1);
            assert_eq!(*ids.iter().max().unwrap(), idx.num_vars());
        }
    }

    #[test]
    fn var_fact_round_trip() {
        for n in &[4u32, 6, 8] {
            let idx = VarIndexer::new(*n);
            for v in 1..=idx.num_vars() {
                let f = idx.fact(v).unwrap();
                assert_eq!(idx.var(f), v);
            }
        }
    }

    #[test]
    fn numbering_is_deterministic() {
        let a = VarIndexer::new(6);
        let b = VarIndexer::new(6);
        for f in all_facts(&a) {
            assert_eq!(a.var(f), b.var(f));
        }
    }

    #[test]
    fn aux_range_is_transparent() {
        let idx = VarIndexer::new(4);
        assert_eq!(idx.fact(idx.num_vars() + 1), None);
    }

    #[test]
    #[should_panic]
    fn team_playing_itself_is_rejected() {
        let idx = VarIndexer::new(6);
        idx.var(Fact { week: 1, period: 1, home: 2, away: 2 });
    }

    #[test]
    #[should_panic]
    fn out_of_range_week_is_rejected() {
        let idx = VarIndexer::new(6);
        idx.var(Fact { week: 6, period: 1, home: 1, away: 2 });
    }
}
