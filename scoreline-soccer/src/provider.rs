//! Sourcing of fixtures and match histories.

use std::io;
use std::path::Path;

use bincode::Encode;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use scoreline::file::ReadJsonFile;

use crate::domain::{FixtureId, LeagueId, MatchRecord, Season, TeamId};

/// The number of most recent matches that make up a team's history.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Encode, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Window(u8);
impl Window {
    pub const MIN: u8 = 3;
    pub const MAX: u8 = 50;

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl Default for Window {
    fn default() -> Self {
        Self(10)
    }
}

impl TryFrom<u8> for Window {
    type Error = InvalidWindow;

    fn try_from(size: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&size) {
            Ok(Self(size))
        } else {
            Err(InvalidWindow(size))
        }
    }
}

impl From<Window> for u8 {
    fn from(window: Window) -> Self {
        window.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("window size {0} is outside {min}..={max}", min = Window::MIN, max = Window::MAX)]
pub struct InvalidWindow(pub u8);

#[derive(Clone, Debug, Hash, PartialEq, Eq, Encode)]
pub struct HistoryQuery {
    pub team: TeamId,
    pub league: LeagueId,
    pub season: Season,
    pub window: Window,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct FixtureQuery {
    pub date: NaiveDate,
    pub league: LeagueId,
    pub season: Season,
}

impl Encode for FixtureQuery {
    fn encode<E: bincode::enc::Encoder>(
        &self,
        encoder: &mut E,
    ) -> Result<(), bincode::error::EncodeError> {
        self.date.num_days_from_ce().encode(encoder)?;
        self.league.encode(encoder)?;
        self.season.encode(encoder)
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("transport: {0}")]
    Transport(String),

    #[error("{0}")]
    Io(#[from] io::Error),
}

/// A source of fixtures and completed matches.
#[allow(async_fn_in_trait)]
pub trait MatchHistoryProvider {
    async fn fixture(&self, id: FixtureId) -> Result<MatchRecord, ProviderError>;

    /// The team's `window` most recent matches in the league and season, newest first,
    /// regardless of their status.
    async fn team_history(&self, query: &HistoryQuery) -> Result<Vec<MatchRecord>, ProviderError>;

    async fn fixtures_on(&self, query: &FixtureQuery) -> Result<Vec<MatchRecord>, ProviderError>;
}

/// Serves queries from a list of records held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    records: Vec<MatchRecord>,
}
impl MemoryProvider {
    pub fn new(records: Vec<MatchRecord>) -> Self {
        Self { records }
    }

    /// Loads a JSON array of match records.
    pub fn read_json_file(path: impl AsRef<Path>) -> Result<Self, ProviderError> {
        let path = path.as_ref();
        let records = Vec::<MatchRecord>::read_json_file(path).map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                ProviderError::NotFound(path.display().to_string())
            } else {
                ProviderError::from(err)
            }
        })?;
        debug!("loaded {} records from {}", records.len(), path.display());
        Ok(Self::new(records))
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }
}

impl MatchHistoryProvider for MemoryProvider {
    async fn fixture(&self, id: FixtureId) -> Result<MatchRecord, ProviderError> {
        self.records
            .iter()
            .find(|record| record.id == id)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(format!("fixture {id}")))
    }

    async fn team_history(&self, query: &HistoryQuery) -> Result<Vec<MatchRecord>, ProviderError> {
        let mut history = self
            .records
            .iter()
            .filter(|record| {
                record.league == query.league
                    && record.season == query.season
                    && record.involves(&query.team)
            })
            .cloned()
            .collect::<Vec<_>>();
        history.sort_by(|a, b| b.date.cmp(&a.date));
        history.truncate(query.window.get() as usize);
        Ok(history)
    }

    async fn fixtures_on(&self, query: &FixtureQuery) -> Result<Vec<MatchRecord>, ProviderError> {
        let mut fixtures = self
            .records
            .iter()
            .filter(|record| {
                record.league == query.league
                    && record.season == query.season
                    && record.date.date_naive() == query.date
            })
            .cloned()
            .collect::<Vec<_>>();
        fixtures.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        Ok(fixtures)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use crate::domain::{Goals, MatchStatus};

    use super::*;

    const TEAM: TeamId = TeamId(1);

    fn record(id: u64, days: i64, home: TeamId, away: TeamId, season: u16) -> MatchRecord {
        MatchRecord {
            id: FixtureId(id),
            date: Utc.with_ymd_and_hms(2023, 8, 12, 14, 0, 0).unwrap() + Duration::days(days),
            league: LeagueId(39),
            season: Season(season),
            home,
            away,
            status: Some(MatchStatus::FullTime),
            goals: Goals {
                home: Some(1),
                away: Some(1),
            },
        }
    }

    fn create_test_provider() -> MemoryProvider {
        MemoryProvider::new(vec![
            record(1, 0, TEAM, TeamId(2), 2023),
            record(2, 7, TeamId(3), TEAM, 2023),
            record(3, 14, TEAM, TeamId(4), 2023),
            record(4, 14, TeamId(5), TeamId(6), 2023),
            record(5, 21, TeamId(7), TEAM, 2023),
            record(6, -300, TEAM, TeamId(2), 2022),
        ])
    }

    #[test]
    fn window_bounds() {
        assert_eq!(Err(InvalidWindow(2)), Window::try_from(2));
        assert_eq!(3, Window::try_from(3).unwrap().get());
        assert_eq!(50, Window::try_from(50).unwrap().get());
        assert_eq!(Err(InvalidWindow(51)), Window::try_from(51));
        assert_eq!(10, Window::default().get());
        assert_eq!(
            "window size 51 is outside 3..=50",
            InvalidWindow(51).to_string()
        );
    }

    #[test]
    fn window_deserialize_validates() {
        assert_eq!(Window::try_from(5).unwrap(), serde_json::from_str::<Window>("5").unwrap());
        assert!(serde_json::from_str::<Window>("1").is_err());
    }

    #[tokio::test]
    async fn fixture_lookup() {
        let provider = create_test_provider();
        assert_eq!(FixtureId(3), provider.fixture(FixtureId(3)).await.unwrap().id);
        let err = provider.fixture(FixtureId(99)).await.unwrap_err();
        assert!(matches!(err, ProviderError::NotFound(_)), "{err:?}");
    }

    #[tokio::test]
    async fn team_history_newest_first_within_window() {
        let provider = create_test_provider();
        let history = provider
            .team_history(&HistoryQuery {
                team: TEAM,
                league: LeagueId(39),
                season: Season(2023),
                window: Window::try_from(3).unwrap(),
            })
            .await
            .unwrap();
        let ids = history.iter().map(|record| record.id.0).collect::<Vec<_>>();
        assert_eq!(vec![5, 3, 2], ids);
    }

    #[tokio::test]
    async fn team_history_excludes_other_seasons() {
        let provider = create_test_provider();
        let history = provider
            .team_history(&HistoryQuery {
                team: TEAM,
                league: LeagueId(39),
                season: Season(2022),
                window: Window::default(),
            })
            .await
            .unwrap();
        assert_eq!(1, history.len());
        assert_eq!(FixtureId(6), history[0].id);
    }

    #[tokio::test]
    async fn fixtures_on_date() {
        let provider = create_test_provider();
        let fixtures = provider
            .fixtures_on(&FixtureQuery {
                date: NaiveDate::from_ymd_opt(2023, 8, 26).unwrap(),
                league: LeagueId(39),
                season: Season(2023),
            })
            .await
            .unwrap();
        let ids = fixtures.iter().map(|record| record.id.0).collect::<Vec<_>>();
        assert_eq!(vec![3, 4], ids);
    }

    #[test]
    fn read_missing_file() {
        let err = MemoryProvider::read_json_file("/nonexistent/history.json").unwrap_err();
        assert!(matches!(err, ProviderError::NotFound(_)), "{err:?}");
    }
}
