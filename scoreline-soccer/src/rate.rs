//! Estimation of a team's expected-goals rate from its recent matches.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::domain::{MatchRecord, TeamId, VenueFilter};

/// The fewest matches from which a rate will be estimated.
pub const MIN_MATCHES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("insufficient data: required {required} matches, got {got}")]
pub struct InsufficientData {
    pub required: usize,
    pub got: usize,
}
impl InsufficientData {
    fn check(got: usize) -> Result<(), InsufficientData> {
        if got < MIN_MATCHES {
            Err(InsufficientData {
                required: MIN_MATCHES,
                got,
            })
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateEstimate {
    /// Mean goals per finished match.
    pub lambda: f64,

    /// Matches admitted by the venue filter, whether finished or not.
    pub considered: usize,

    /// Finished matches with a complete score that contributed to the mean.
    pub finished: usize,

    /// Total goals scored by the team across the finished matches.
    pub goals: u32,
}

/// Mean goals scored by `team` across the matches admitted by `filter`.
///
/// Fails if fewer than [MIN_MATCHES] are admitted by the filter, or if fewer than
/// [MIN_MATCHES] of those are finished with a complete score. Unfinished matches and those
/// missing a goal count are skipped rather than counted as scoreless.
pub fn estimate(
    matches: &[MatchRecord],
    team: &TeamId,
    filter: VenueFilter,
) -> Result<f64, InsufficientData> {
    estimate_detailed(matches, team, filter).map(|estimate| estimate.lambda)
}

pub fn estimate_detailed(
    matches: &[MatchRecord],
    team: &TeamId,
    filter: VenueFilter,
) -> Result<RateEstimate, InsufficientData> {
    let admitted = matches
        .iter()
        .filter(|record| filter.admits(record, team))
        .collect::<Vec<_>>();
    InsufficientData::check(admitted.len())?;

    let (mut goals, mut finished) = (0u32, 0usize);
    for record in &admitted {
        if let Some(scored) = record.goals_scored_by(team) {
            goals += scored as u32;
            finished += 1;
        }
    }
    debug!(
        "team {team} ({filter}): {} admitted, {finished} finished, {goals} goals",
        admitted.len()
    );
    InsufficientData::check(finished)?;

    Ok(RateEstimate {
        lambda: goals as f64 / finished as f64,
        considered: admitted.len(),
        finished,
        goals,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use crate::domain::{FixtureId, Goals, LeagueId, MatchStatus, Season};

    use super::*;

    const TEAM: TeamId = TeamId(50);
    const RIVAL: TeamId = TeamId(51);

    fn finished(id: u64, home: TeamId, away: TeamId, home_goals: u8, away_goals: u8) -> MatchRecord {
        record(id, home, away, Some(MatchStatus::FullTime), Some(home_goals), Some(away_goals))
    }

    fn record(
        id: u64,
        home: TeamId,
        away: TeamId,
        status: Option<MatchStatus>,
        home_goals: Option<u8>,
        away_goals: Option<u8>,
    ) -> MatchRecord {
        MatchRecord {
            id: FixtureId(id),
            date: Utc.with_ymd_and_hms(2023, 9, 1, 15, 0, 0).unwrap() + Duration::days(id as i64 * 7),
            league: LeagueId(39),
            season: Season(2023),
            home,
            away,
            status,
            goals: Goals {
                home: home_goals,
                away: away_goals,
            },
        }
    }

    #[test]
    fn home_only_mean() {
        let matches = vec![
            finished(1, TEAM, RIVAL, 2, 0),
            finished(2, TEAM, RIVAL, 3, 3),
            finished(3, TEAM, RIVAL, 1, 2),
            finished(4, RIVAL, TEAM, 4, 4),
        ];
        assert_eq!(Ok(2.0), estimate(&matches, &TEAM, VenueFilter::HomeOnly));
    }

    #[test]
    fn away_only_mean() {
        let matches = vec![
            finished(1, RIVAL, TEAM, 0, 1),
            finished(2, RIVAL, TEAM, 0, 0),
            finished(3, RIVAL, TEAM, 0, 2),
            finished(4, TEAM, RIVAL, 5, 0),
        ];
        assert_eq!(Ok(1.0), estimate(&matches, &TEAM, VenueFilter::AwayOnly));
    }

    #[test]
    fn all_venues_mean() {
        let matches = vec![
            finished(1, TEAM, RIVAL, 2, 0),
            finished(2, RIVAL, TEAM, 1, 1),
            finished(3, TEAM, RIVAL, 0, 0),
            finished(4, RIVAL, TEAM, 3, 1),
            finished(5, RIVAL, TeamId(99), 6, 0),
        ];
        let estimate = estimate_detailed(&matches, &TEAM, VenueFilter::All).unwrap();
        assert_eq!(
            RateEstimate {
                lambda: 1.0,
                considered: 4,
                finished: 4,
                goals: 4,
            },
            estimate
        );
    }

    #[test]
    fn scoreless_history_is_a_zero_rate() {
        let matches = vec![
            finished(1, TEAM, RIVAL, 0, 1),
            finished(2, TEAM, RIVAL, 0, 0),
            finished(3, TEAM, RIVAL, 0, 2),
        ];
        assert_eq!(Ok(0.0), estimate(&matches, &TEAM, VenueFilter::HomeOnly));
    }

    #[test]
    fn too_few_admitted() {
        let matches = vec![
            finished(1, TEAM, RIVAL, 2, 0),
            finished(2, TEAM, RIVAL, 1, 0),
            finished(3, RIVAL, TEAM, 1, 0),
        ];
        assert_eq!(
            Err(InsufficientData { required: 3, got: 2 }),
            estimate(&matches, &TEAM, VenueFilter::HomeOnly)
        );
        assert_eq!(
            Err(InsufficientData { required: 3, got: 0 }),
            estimate(&[], &TEAM, VenueFilter::All)
        );
    }

    #[test]
    fn unfinished_match_drops_below_threshold() {
        let matches = vec![
            finished(1, TEAM, RIVAL, 2, 0),
            finished(2, TEAM, RIVAL, 3, 1),
            record(3, TEAM, RIVAL, Some(MatchStatus::NotStarted), None, None),
        ];
        assert_eq!(
            Err(InsufficientData { required: 3, got: 2 }),
            estimate(&matches, &TEAM, VenueFilter::HomeOnly)
        );
    }

    #[test]
    fn unfinished_match_excluded_from_mean() {
        let matches = vec![
            finished(1, TEAM, RIVAL, 2, 0),
            finished(2, TEAM, RIVAL, 3, 1),
            record(3, TEAM, RIVAL, Some(MatchStatus::SecondHalf), Some(5), Some(0)),
            finished(4, TEAM, RIVAL, 1, 1),
        ];
        let estimate = estimate_detailed(&matches, &TEAM, VenueFilter::HomeOnly).unwrap();
        assert_eq!(2.0, estimate.lambda);
        assert_eq!(4, estimate.considered);
        assert_eq!(3, estimate.finished);
    }

    #[test]
    fn missing_status_or_goals_skipped() {
        let matches = vec![
            finished(1, TEAM, RIVAL, 1, 0),
            finished(2, TEAM, RIVAL, 2, 0),
            record(3, TEAM, RIVAL, None, Some(4), Some(0)),
            record(4, TEAM, RIVAL, Some(MatchStatus::FullTime), None, Some(0)),
            finished(5, TEAM, RIVAL, 3, 0),
        ];
        let estimate = estimate_detailed(&matches, &TEAM, VenueFilter::HomeOnly).unwrap();
        assert_eq!(2.0, estimate.lambda);
        assert_eq!(5, estimate.considered);
        assert_eq!(3, estimate.finished);
        assert_eq!(6, estimate.goals);
    }

    #[test]
    fn insufficient_data_message() {
        let err = InsufficientData { required: 3, got: 1 };
        assert_eq!("insufficient data: required 3 matches, got 1", err.to_string());
    }
}
