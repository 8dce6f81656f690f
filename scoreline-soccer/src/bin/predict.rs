use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, bail};
use chrono::NaiveDate;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info, warn};

use scoreline::file::WriteJsonFile;
use scoreline::timed::Timed;
use scoreline_soccer::domain::{FixtureId, LeagueId, Season};
use scoreline_soccer::predict::{
    Config, HistoryCache, PredictError, PredictionRequest, Predictor,
};
use scoreline_soccer::print;
use scoreline_soccer::provider::{FixtureQuery, MemoryProvider, Window};

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// file to source the match records from
    #[clap(short = 'f', long)]
    file: PathBuf,

    /// fixture to predict
    #[clap(short = 'x', long)]
    fixture: Option<u64>,

    /// list the fixtures scheduled on a date (YYYY-MM-DD)
    #[clap(short = 'd', long)]
    date: Option<NaiveDate>,

    /// league of the listed fixtures
    #[clap(short = 'l', long)]
    league: Option<u32>,

    /// season of the listed fixtures
    #[clap(short = 's', long)]
    season: Option<u16>,

    /// number of recent matches to rate each team on
    #[clap(short = 'w', long, default_value_t = 10)]
    window: u8,

    /// rate the home team on home matches and the away team on away matches
    #[clap(long)]
    split: bool,

    /// goals per side at which the scoregrid is truncated
    #[clap(short = 'g', long = "max-goals", default_value_t = 6)]
    max_goals: u8,

    /// print the full scoregrid
    #[clap(long)]
    scoregrid: bool,

    /// write the prediction as JSON to a file
    #[clap(short = 'o', long)]
    out: Option<PathBuf>,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if self.fixture.is_none() && self.date.is_none()
            || self.fixture.is_some() && self.date.is_some()
        {
            bail!("either the -x or the -d flag must be specified");
        }
        if self.date.is_some() && (self.league.is_none() || self.season.is_none()) {
            bail!("listing fixtures by date requires both -l and -s");
        }
        Window::try_from(self.window)?;
        Ok(())
    }

    fn config(&self) -> Config {
        Config {
            max_goals: self.max_goals,
            ..Config::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let provider = MemoryProvider::read_json_file(&args.file)?;
    info!("sourced {} match records from {}", provider.records().len(), args.file.display());

    let config = args.config();
    let cache = Arc::new(HistoryCache::new(config.cache_ttl));
    let predictor = Predictor::new(provider, config)?.with_cache(cache);

    match (args.fixture, args.date) {
        (Some(fixture), _) => predict_fixture(&args, &predictor, FixtureId(fixture)).await,
        (_, Some(date)) => list_fixtures(&args, &predictor, date).await,
        (None, None) => Ok(()),
    }
}

async fn predict_fixture(
    args: &Args,
    predictor: &Predictor<MemoryProvider>,
    fixture: FixtureId,
) -> Result<(), Box<dyn Error>> {
    let request = PredictionRequest {
        fixture,
        window: Window::try_from(args.window)?,
        split: args.split,
    };
    let timed = Timed::future(predictor.predict(&request)).await;
    let prediction = match timed.value {
        Ok(prediction) => prediction,
        Err(PredictError::Insufficient { side, source }) => {
            warn!("{side:?} side: {source}");
            return Err(anyhow!(
                "not enough historical data to predict fixture {fixture}; try a wider window or drop --split"
            )
            .into());
        }
        Err(err) => return Err(err.into()),
    };
    info!("predicted fixture {fixture} in {:?}", timed.elapsed);

    info!(
        "Rates ({} vs {}):\n{}",
        prediction.home,
        prediction.away,
        Console::default().render(&print::tabulate_rates(
            (format!("Home ({})", prediction.home_filter).as_str(), &prediction.home_rate),
            (format!("Away ({})", prediction.away_filter).as_str(), &prediction.away_rate),
        ))
    );
    info!(
        "Outcomes:\n{}",
        Console::default().render(&print::tabulate_outcomes(&prediction.distribution))
    );
    if args.scoregrid {
        if let Some(scoregrid) = &prediction.distribution.scoregrid {
            info!(
                "Scoregrid:\n{}",
                Console::default().render(&print::tabulate_scoregrid(scoregrid))
            );
        }
    }

    if let Some(out) = &args.out {
        prediction.write_json_file(out)?;
        info!("wrote prediction to {}", out.display());
    }
    Ok(())
}

async fn list_fixtures(
    args: &Args,
    predictor: &Predictor<MemoryProvider>,
    date: NaiveDate,
) -> Result<(), Box<dyn Error>> {
    let (Some(league), Some(season)) = (args.league, args.season) else {
        return Err(anyhow!("listing fixtures by date requires both -l and -s").into());
    };
    let fixtures = predictor
        .fixtures_on(&FixtureQuery {
            date,
            league: LeagueId(league),
            season: Season(season),
        })
        .await?;
    info!(
        "{} fixtures on {date}:\n{}",
        fixtures.len(),
        Console::default().render(&print::tabulate_fixtures(&fixtures))
    );
    Ok(())
}
