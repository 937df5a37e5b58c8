use std::fmt;

use crate::error::ScheduleError;
use crate::vars::{Fact, TeamId};

/// One scheduled match with its home/away designation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Game {
    pub home: TeamId,
    pub away: TeamId,
}

/// A complete tournament schedule: a week × period grid of games.
///
/// Built only from a decoded satisfying assignment; `verify` re-checks the
/// structural invariants as a defense against encoder/decoder bugs, so a
/// schedule that reached the caller can be trusted.
#[derive(Debug, Clone)]
pub struct Schedule {
    teams: u32,
    grid: Vec<Vec<Option<Game>>>,
}

impl Schedule {
    pub(crate) fn empty(teams: u32) -> Schedule {
        let weeks = (teams - 1) as usize;
        let periods = (teams / 2) as usize;
        Schedule {
            teams,
            grid: vec![vec![None; periods]; weeks],
        }
    }

    pub(crate) fn place(&mut self, f: Fact) -> Result<(), ScheduleError> {
        let cell = &mut self.grid[(f.week - 1) as usize][(f.period - 1) as usize];
        if let Some(existing) = cell {
            return Err(ScheduleError::InvariantViolation(format!(
                "week {} period {} hosts both {} v {} and {} v {}",
                f.week, f.period, existing.home, existing.away, f.home, f.away
            )));
        }
        *cell = Some(Game { home: f.home, away: f.away });
        Ok(())
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

    pub fn game(&self, week: u32, period: u32) -> Option<Game> {
        self.grid[(week - 1) as usize][(period - 1) as usize]
    }

    /// Check the four structural invariants of a round-robin schedule:
    /// a full grid with valid teams, one game per team per week, every pair
    /// meeting exactly once, and no team in the same period more than twice.
    pub fn verify(&self) -> Result<(), ScheduleError> {
        let n = self.teams;
        let violation = |msg: String| Err(ScheduleError::InvariantViolation(msg));

        for week in 1..=self.weeks() {
            for period in 1..=self.periods() {
                match self.game(week, period) {
                    None => {
                        return violation(format!("week {} period {} has no game", week, period));
                    }
                    Some(g) => {
                        if g.home == g.away || g.home < 1 || g.home > n || g.away < 1 || g.away > n {
                            return violation(format!(
                                "week {} period {} has invalid game {} v {}",
                                week, period, g.home, g.away
                            ));
                        }
                    }
                }
            }
        }

        for team in 1..=n {
            for week in 1..=self.weeks() {
                let games = (1..=self.periods())
                    .filter_map(|p| self.game(week, p))
                    .filter(|g| g.home == team || g.away == team)
                    .count();
                if games != 1 {
                    return violation(format!("team {} plays {} games in week {}", team, games, week));
                }
            }
        }

        for t1 in 1..=n {
            for t2 in (t1 + 1)..=n {
                let meetings = self
                    .grid
                    .iter()
                    .flatten()
                    .filter_map(|g| *g)
                    .filter(|g| {
                        (g.home == t1 && g.away == t2) || (g.home == t2 && g.away == t1)
                    })
                    .count();
                if meetings != 1 {
                    return violation(format!("teams {} and {} meet {} times", t1, t2, meetings));
                }
            }
        }

        for team in 1..=n {
            for period in 1..=self.periods() {
                let appearances = (1..=self.weeks())
                    .filter_map(|w| self.game(w, period))
                    .filter(|g| g.home == team || g.away == team)
                    .count();
                if appearances > 2 {
                    return violation(format!(
                        "team {} appears {} times in period {}",
                        team, appearances, period
                    ));
                }
            }
        }

        Ok(())
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:<10}", "")?;
        for week in 1..=self.weeks() {
            write!(f, " {:^7} ", format!("w{}", week))?;
        }
        writeln!(f)?;
        for period in 1..=self.periods() {
            write!(f, "{:<10}", format!("period {}", period))?;
            for week in 1..=self.weeks() {
                match self.game(week, period) {
                    Some(g) => write!(f, " {:>3},{:<3} ", g.home, g.away)?,
                    None => write!(f, " {:^7} ", "-")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
