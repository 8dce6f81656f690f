//! Match predictions: a scoring rate for each side from its recent history, then the outcome
//! distribution those rates imply.

use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use scoreline::timed::Timed;

use crate::cache::TtlCache;
use crate::domain::{FixtureId, MatchRecord, Side, TeamId, VenueFilter};
use crate::provider::{FixtureQuery, HistoryQuery, MatchHistoryProvider, ProviderError, Window};
use crate::rate::{InsufficientData, RateEstimate};
use crate::scoregrid::{Detail, Distribution, DEFAULT_MAX_GOALS};
use crate::{rate, scoregrid};

#[derive(Debug, Error)]
#[error("{0}")]
pub struct ValidationError(#[from] pub anyhow::Error);

#[derive(Debug, Clone)]
pub struct Config {
    pub max_goals: u8,
    pub cache_ttl: Duration,
}
impl Config {
    pub fn validate(&self) -> Result<(), ValidationError> {
        const MAX_GOALS: u8 = 20;
        if self.max_goals == 0 || self.max_goals > MAX_GOALS {
            return Err(anyhow!("max goals must lie in 1..={MAX_GOALS}").into());
        }

        if self.cache_ttl.is_zero() {
            return Err(anyhow!("cache TTL cannot be zero").into());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_goals: DEFAULT_MAX_GOALS,
            cache_ttl: Duration::from_secs(600),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionRequest {
    pub fixture: FixtureId,
    pub window: Window,
    /// Rate each team on its own venue only (home team at home, away team away), rather than
    /// on all of its matches.
    pub split: bool,
}

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("not enough historical data for the {side:?} side: {source}")]
    Insufficient {
        side: Side,
        #[source]
        source: InsufficientData,
    },

    #[error("{0}")]
    Upstream(#[from] ProviderError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub fixture: FixtureId,
    pub home: TeamId,
    pub away: TeamId,
    pub home_filter: VenueFilter,
    pub away_filter: VenueFilter,
    pub home_rate: RateEstimate,
    pub away_rate: RateEstimate,
    pub distribution: Distribution,
}

pub type HistoryCache = TtlCache<Vec<MatchRecord>>;

pub struct Predictor<P> {
    provider: P,
    config: Config,
    cache: Option<Arc<HistoryCache>>,
}
impl<P: MatchHistoryProvider> Predictor<P> {
    pub fn new(provider: P, config: Config) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self {
            provider,
            config,
            cache: None,
        })
    }

    /// Serves provider queries through `cache`, which may be shared with other predictors.
    pub fn with_cache(self, cache: Arc<HistoryCache>) -> Self {
        Self {
            cache: Some(cache),
            ..self
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cache(&self) -> Option<&Arc<HistoryCache>> {
        self.cache.as_ref()
    }

    pub async fn predict(&self, request: &PredictionRequest) -> Result<Prediction, PredictError> {
        let fixture = self.provider.fixture(request.fixture).await?;
        debug!(
            "fixture {}: {} vs {} (league {}, season {})",
            fixture.id, fixture.home, fixture.away, fixture.league, fixture.season
        );

        let (home_filter, away_filter) = VenueFilter::for_fixture(request.split);
        let home_history = self
            .team_history(&HistoryQuery {
                team: fixture.home,
                league: fixture.league,
                season: fixture.season,
                window: request.window,
            })
            .await?;
        let away_history = self
            .team_history(&HistoryQuery {
                team: fixture.away,
                league: fixture.league,
                season: fixture.season,
                window: request.window,
            })
            .await?;

        let home_rate = rate::estimate_detailed(&home_history, &fixture.home, home_filter)
            .map_err(|source| PredictError::Insufficient {
                side: Side::Home,
                source,
            })?;
        let away_rate = rate::estimate_detailed(&away_history, &fixture.away, away_filter)
            .map_err(|source| PredictError::Insufficient {
                side: Side::Away,
                source,
            })?;

        let distribution = Timed::value(|| {
            scoregrid::compute(
                home_rate.lambda,
                away_rate.lambda,
                self.config.max_goals,
                Detail::Full,
            )
        });
        info!(
            "fixture {}: λ {:.3} vs {:.3}, 1X2 {:.3}/{:.3}/{:.3}, most likely {} ({:.3}), took {:?}",
            fixture.id,
            home_rate.lambda,
            away_rate.lambda,
            distribution.value.probs.home_win,
            distribution.value.probs.draw,
            distribution.value.probs.away_win,
            distribution.value.most_likely.score,
            distribution.value.most_likely.probability,
            distribution.elapsed
        );

        Ok(Prediction {
            fixture: fixture.id,
            home: fixture.home,
            away: fixture.away,
            home_filter,
            away_filter,
            home_rate,
            away_rate,
            distribution: distribution.value,
        })
    }

    pub async fn fixtures_on(&self, query: &FixtureQuery) -> Result<Vec<MatchRecord>, PredictError> {
        if let Some(cached) = self.cache.as_ref().and_then(|cache| cache.get(query)) {
            return Ok(cached);
        }
        let fixtures = self.provider.fixtures_on(query).await?;
        if let Some(cache) = self.cache.as_ref() {
            cache.insert(query, fixtures.clone());
        }
        Ok(fixtures)
    }

    async fn team_history(&self, query: &HistoryQuery) -> Result<Vec<MatchRecord>, PredictError> {
        if let Some(cached) = self.cache.as_ref().and_then(|cache| cache.get(query)) {
            debug!("team {}: {} cached records", query.team, cached.len());
            return Ok(cached);
        }
        let history = self.provider.team_history(query).await?;
        debug!("team {}: fetched {} records", query.team, history.len());
        if let Some(cache) = self.cache.as_ref() {
            cache.insert(query, history.clone());
        }
        Ok(history)
    }
}
