//! The scoreline probability grid and the outcome probabilities derived from it.
//!
//! Rows of the grid are home goals and columns are away goals, each spanning `0..=max_goals`.
//! Mass beyond `max_goals` is truncated and never renormalised, so the aggregates sum to
//! slightly less than one.

use ordinalizer::Ordinal;
use serde::Serialize;
use strum::EnumCount;

use scoreline::linear::matrix::Matrix;
use scoreline::poisson;

use crate::domain::{MatchResult, Score};

/// Goals per side at which the grid is truncated, unless a caller asks otherwise.
pub const DEFAULT_MAX_GOALS: u8 = 6;

/// Truncation bound of the earlier ten-goal grid, for reproducing its output.
pub const LEGACY_MAX_GOALS: u8 = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeProbs {
    pub home_win: f64,
    pub draw: f64,
    pub away_win: f64,
    pub over_1_5: f64,
    pub over_2_5: f64,
}
impl OutcomeProbs {
    /// The mass of the grid covered by the three results.
    pub fn booksum(&self) -> f64 {
        self.home_win + self.draw + self.away_win
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbableScore {
    pub score: Score,
    pub probability: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detail {
    /// Aggregate probabilities and the most likely score.
    Summary,

    /// As above, with the full grid retained.
    Full,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    pub probs: OutcomeProbs,
    pub most_likely: ProbableScore,
    pub scoregrid: Option<Matrix<f64>>,
}

/// Populates `scoregrid` with the joint probabilities of two independent Poisson scorers.
/// The grid's dimensions set the truncation bound.
pub fn from_univariate_poisson(home_rate: f64, away_rate: f64, scoregrid: &mut Matrix<f64>) {
    let home_probs = poisson::univariate_series(home_rate, (scoregrid.rows() - 1) as u8);
    let away_probs = poisson::univariate_series(away_rate, (scoregrid.cols() - 1) as u8);
    for (home_goals, home_prob) in home_probs.iter().enumerate() {
        let row_slice = scoregrid.row_slice_mut(home_goals);
        for (away_goals, away_prob) in away_probs.iter().enumerate() {
            row_slice[away_goals] = home_prob * away_prob;
        }
    }
}

/// Aggregates the grid in a single pass over `(home, away)` in lexicographic order. The most
/// likely score is the first cell holding the greatest probability.
pub fn summarise(scoregrid: &Matrix<f64>) -> (OutcomeProbs, ProbableScore) {
    let mut results = [0.0; MatchResult::COUNT];
    let (mut over_1_5, mut over_2_5) = (0.0, 0.0);
    let mut most_likely = ProbableScore {
        score: Score::nil_all(),
        probability: f64::NEG_INFINITY,
    };

    for home_goals in 0..scoregrid.rows() {
        for away_goals in 0..scoregrid.cols() {
            let prob = scoregrid[(home_goals, away_goals)];
            results[MatchResult::classify(home_goals, away_goals).ordinal()] += prob;

            let total_goals = home_goals + away_goals;
            if total_goals > 1 {
                over_1_5 += prob;
            }
            if total_goals > 2 {
                over_2_5 += prob;
            }

            if prob > most_likely.probability {
                most_likely = ProbableScore {
                    score: Score::new(home_goals as u8, away_goals as u8),
                    probability: prob,
                };
            }
        }
    }

    let probs = OutcomeProbs {
        home_win: results[MatchResult::HomeWin.ordinal()],
        draw: results[MatchResult::Draw.ordinal()],
        away_win: results[MatchResult::AwayWin.ordinal()],
        over_1_5,
        over_2_5,
    };
    (probs, most_likely)
}

/// Derives the outcome distribution of a match between sides scoring at `home_rate` and
/// `away_rate`, with each side's goals truncated at `max_goals`.
pub fn compute(home_rate: f64, away_rate: f64, max_goals: u8, detail: Detail) -> Distribution {
    let dim = max_goals as usize + 1;
    let mut scoregrid = Matrix::allocate(dim, dim);
    from_univariate_poisson(home_rate, away_rate, &mut scoregrid);
    let (probs, most_likely) = summarise(&scoregrid);
    Distribution {
        probs,
        most_likely,
        scoregrid: match detail {
            Detail::Summary => None,
            Detail::Full => Some(scoregrid),
        },
    }
}

/// Expected goals for each side, as implied by the truncated grid.
pub fn home_away_expectations(scoregrid: &Matrix<f64>) -> (f64, f64) {
    let (mut home_expectation, mut away_expectation) = (0.0, 0.0);

    for home_goals in 0..scoregrid.rows() {
        for away_goals in 0..scoregrid.cols() {
            let prob = scoregrid[(home_goals, away_goals)];
            home_expectation += home_goals as f64 * prob;
            away_expectation += away_goals as f64 * prob;
        }
    }

    (home_expectation, away_expectation)
}
