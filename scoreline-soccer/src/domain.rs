use std::fmt::{Display, Formatter};

use bincode::Encode;
use chrono::{DateTime, Utc};
use ordinalizer::Ordinal;
use serde::{Deserialize, Serialize};
use strum_macros::{Display as StrumDisplay, EnumCount, EnumIter, EnumString};

use scoreline::linear::matrix::Matrix;

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Encode, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub u32);

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Encode, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeagueId(pub u32);

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Encode, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixtureId(pub u64);

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Encode, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Season(pub u16);

macro_rules! display_inner {
    ($($ty:ty),*) => {
        $(
            impl Display for $ty {
                fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}", self.0)
                }
            }
        )*
    };
}
display_inner!(TeamId, LeagueId, FixtureId, Season);

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Encode, Serialize, Deserialize)]
pub enum Side {
    Home,
    Away,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}
impl Score {
    pub fn new(home: u8, away: u8) -> Self {
        Self { home, away }
    }

    pub fn nil_all() -> Self {
        Self { home: 0, away: 0 }
    }

    pub fn total(&self) -> u16 {
        self.home as u16 + self.away as u16
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}

/// Short status codes reported by the fixture feed.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    #[serde(rename = "TBD")]
    TimeToBeDefined,
    #[serde(rename = "NS")]
    NotStarted,
    #[serde(rename = "1H")]
    FirstHalf,
    #[serde(rename = "HT")]
    HalfTime,
    #[serde(rename = "2H")]
    SecondHalf,
    #[serde(rename = "ET")]
    ExtraTime,
    #[serde(rename = "BT")]
    BreakTime,
    #[serde(rename = "P")]
    PenaltiesInProgress,
    #[serde(rename = "FT")]
    FullTime,
    #[serde(rename = "AET")]
    AfterExtraTime,
    #[serde(rename = "PEN")]
    AfterPenalties,
    #[serde(rename = "PST")]
    Postponed,
    #[serde(rename = "CANC")]
    Cancelled,
    #[serde(rename = "ABD")]
    Abandoned,
    #[serde(rename = "SUSP")]
    Suspended,
    #[serde(rename = "INT")]
    Interrupted,
    #[serde(rename = "AWD")]
    Awarded,
    #[serde(rename = "WO")]
    WalkOver,
    #[serde(other)]
    Other,
}
impl MatchStatus {
    /// Whether the match was played to completion. Awarded results and walkovers carry
    /// administrative scores, so they are not counted.
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            MatchStatus::FullTime | MatchStatus::AfterExtraTime | MatchStatus::AfterPenalties
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goals {
    pub home: Option<u8>,
    pub away: Option<u8>,
}
impl Goals {
    pub fn score(&self) -> Option<Score> {
        match (self.home, self.away) {
            (Some(home), Some(away)) => Some(Score { home, away }),
            _ => None,
        }
    }
}

/// One fixture from a team's history, as reported by the feed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: FixtureId,
    pub date: DateTime<Utc>,
    pub league: LeagueId,
    pub season: Season,
    pub home: TeamId,
    pub away: TeamId,
    #[serde(default)]
    pub status: Option<MatchStatus>,
    #[serde(default)]
    pub goals: Goals,
}
impl MatchRecord {
    pub fn side_of(&self, team: &TeamId) -> Option<Side> {
        if self.home == *team {
            Some(Side::Home)
        } else if self.away == *team {
            Some(Side::Away)
        } else {
            None
        }
    }

    pub fn involves(&self, team: &TeamId) -> bool {
        self.side_of(team).is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.status.as_ref().is_some_and(MatchStatus::is_finished)
    }

    /// The final score, provided the match is finished and both goal counts are present.
    pub fn final_score(&self) -> Option<Score> {
        if self.is_finished() {
            self.goals.score()
        } else {
            None
        }
    }

    /// Goals scored by `team` in a finished match with a complete score.
    pub fn goals_scored_by(&self, team: &TeamId) -> Option<u8> {
        let side = self.side_of(team)?;
        let score = self.final_score()?;
        match side {
            Side::Home => Some(score.home),
            Side::Away => Some(score.away),
        }
    }
}

/// Selects which of a team's matches count as evidence for its scoring rate.
#[derive(
    Clone, Copy, Debug, Hash, PartialEq, Eq, EnumString, StrumDisplay, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum VenueFilter {
    HomeOnly,
    AwayOnly,
    All,
}
impl VenueFilter {
    pub fn admits(&self, record: &MatchRecord, team: &TeamId) -> bool {
        match self {
            VenueFilter::HomeOnly => record.home == *team,
            VenueFilter::AwayOnly => record.away == *team,
            VenueFilter::All => record.involves(team),
        }
    }

    /// Filters for the home and away teams of a fixture. A split applies each team's own
    /// venue; otherwise every match counts.
    pub fn for_fixture(split: bool) -> (VenueFilter, VenueFilter) {
        if split {
            (VenueFilter::HomeOnly, VenueFilter::AwayOnly)
        } else {
            (VenueFilter::All, VenueFilter::All)
        }
    }
}

/// The three mutually exclusive results of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Ordinal, EnumCount, EnumIter)]
pub enum MatchResult {
    HomeWin,
    Draw,
    AwayWin,
}
impl MatchResult {
    #[inline]
    pub fn classify(home_goals: usize, away_goals: usize) -> Self {
        if home_goals > away_goals {
            MatchResult::HomeWin
        } else if home_goals == away_goals {
            MatchResult::Draw
        } else {
            MatchResult::AwayWin
        }
    }
}

/// An event whose probability can be read off a scoregrid.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Outcome {
    Win(Side),
    Draw,
    /// More than `n` total goals; i.e., over the `n + 0.5` line.
    Over(u8),
    /// Fewer than `n` total goals; i.e., under the `n - 0.5` line.
    Under(u8),
    Score(Score),
    BothScore,
}
impl Outcome {
    pub fn gather(&self, scoregrid: &Matrix<f64>) -> f64 {
        match self {
            Outcome::Win(side) => Self::gather_win(side, scoregrid),
            Outcome::Draw => Self::gather_draw(scoregrid),
            Outcome::Over(goals) => Self::gather_goals_over(*goals, scoregrid),
            Outcome::Under(goals) => Self::gather_goals_under(*goals, scoregrid),
            Outcome::Score(score) => Self::gather_correct_score(score, scoregrid),
            Outcome::BothScore => Self::gather_both_score(scoregrid),
        }
    }

    fn gather_win(side: &Side, scoregrid: &Matrix<f64>) -> f64 {
        let mut prob = 0.0;
        match side {
            Side::Home => {
                for row in 1..scoregrid.rows() {
                    for col in 0..usize::min(row, scoregrid.cols()) {
                        prob += scoregrid[(row, col)];
                    }
                }
            }
            Side::Away => {
                for col in 1..scoregrid.cols() {
                    for row in 0..usize::min(col, scoregrid.rows()) {
                        prob += scoregrid[(row, col)];
                    }
                }
            }
        }
        prob
    }

    fn gather_draw(scoregrid: &Matrix<f64>) -> f64 {
        let mut prob = 0.0;
        for index in 0..usize::min(scoregrid.rows(), scoregrid.cols()) {
            prob += scoregrid[(index, index)];
        }
        prob
    }

    fn gather_goals_over(goals: u8, scoregrid: &Matrix<f64>) -> f64 {
        let goals = goals as usize;
        let mut prob = 0.0;
        for row in 0..scoregrid.rows() {
            for col in 0..scoregrid.cols() {
                if row + col > goals {
                    prob += scoregrid[(row, col)];
                }
            }
        }
        prob
    }

    fn gather_goals_under(goals: u8, scoregrid: &Matrix<f64>) -> f64 {
        let goals = goals as usize;
        let mut prob = 0.0;
        for row in 0..scoregrid.rows() {
            for col in 0..scoregrid.cols() {
                if row + col < goals {
                    prob += scoregrid[(row, col)];
                }
            }
        }
        prob
    }

    fn gather_correct_score(score: &Score, scoregrid: &Matrix<f64>) -> f64 {
        if (score.home as usize) < scoregrid.rows() && (score.away as usize) < scoregrid.cols() {
            scoregrid[(score.home as usize, score.away as usize)]
        } else {
            0.0
        }
    }

    fn gather_both_score(scoregrid: &Matrix<f64>) -> f64 {
        let mut prob = 0.0;
        for row in 1..scoregrid.rows() {
            for col in 1..scoregrid.cols() {
                prob += scoregrid[(row, col)];
            }
        }
        prob
    }
}
