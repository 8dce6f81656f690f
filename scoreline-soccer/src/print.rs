use stanza::style::HAlign::Left;
use stanza::style::{HAlign, Header, MinWidth, Styles};
use stanza::table::{Cell, Col, Row, Table};

use scoreline::linear::matrix::Matrix;

use crate::domain::{MatchRecord, Outcome};
use crate::rate::RateEstimate;
use crate::scoregrid::Distribution;

fn fair_price(probability: f64) -> f64 {
    1.0 / probability
}

pub fn tabulate_outcomes(distribution: &Distribution) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(12)).with(Left)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["Outcome".into(), "Prob".into(), "Price".into()],
        ));
    let probs = &distribution.probs;
    let mut rows = vec![
        ("Home win".to_string(), probs.home_win),
        ("Draw".to_string(), probs.draw),
        ("Away win".to_string(), probs.away_win),
        ("Over 1.5".to_string(), probs.over_1_5),
        ("Over 2.5".to_string(), probs.over_2_5),
    ];
    if let Some(scoregrid) = &distribution.scoregrid {
        rows.push(("Under 2.5".to_string(), Outcome::Under(3).gather(scoregrid)));
        rows.push(("Both score".to_string(), Outcome::BothScore.gather(scoregrid)));
    }
    rows.push((
        format!("Score {}", distribution.most_likely.score),
        distribution.most_likely.probability,
    ));
    for (outcome, probability) in rows {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                outcome.into(),
                format!("{probability:.4}").into(),
                format!("{:.2}", fair_price(probability)).into(),
            ],
        ));
    }
    table
}

pub fn tabulate_scoregrid(scoregrid: &Matrix<f64>) -> Table {
    let mut cols = vec![Col::new(Styles::default().with(MinWidth(6)).with(Left))];
    cols.extend((0..scoregrid.cols()).map(|_| {
        Col::new(Styles::default().with(MinWidth(7)).with(HAlign::Right))
    }));

    let mut header: Vec<Cell> = vec!["H \\ A".into()];
    header.extend((0..scoregrid.cols()).map(|away_goals| away_goals.to_string().into()));
    let mut table = Table::default()
        .with_cols(cols)
        .with_row(Row::new(Styles::default().with(Header(true)), header));

    for home_goals in 0..scoregrid.rows() {
        let mut cells: Vec<Cell> = vec![home_goals.to_string().into()];
        cells.extend(
            scoregrid
                .row_slice(home_goals)
                .iter()
                .map(|prob| format!("{prob:.4}").into()),
        );
        table.push_row(Row::new(Styles::default(), cells));
    }
    table
}

pub fn tabulate_rates(home: (&str, &RateEstimate), away: (&str, &RateEstimate)) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(10)).with(Left)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Side".into(),
                "Matches".into(),
                "Finished".into(),
                "Goals".into(),
                "λ".into(),
            ],
        ));
    for (side, estimate) in [home, away] {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                side.into(),
                estimate.considered.to_string().into(),
                estimate.finished.to_string().into(),
                estimate.goals.to_string().into(),
                format!("{:.3}", estimate.lambda).into(),
            ],
        ));
    }
    table
}

pub fn tabulate_fixtures(fixtures: &[MatchRecord]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(16)).with(Left)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(6)).with(Left)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Fixture".into(),
                "Kick-off".into(),
                "Home".into(),
                "Away".into(),
                "Status".into(),
            ],
        ));
    for fixture in fixtures {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                fixture.id.to_string().into(),
                fixture.date.format("%Y-%m-%d %H:%M").to_string().into(),
                fixture.home.to_string().into(),
                fixture.away.to_string().into(),
                fixture
                    .status
                    .map(|status| format!("{status:?}"))
                    .unwrap_or_default()
                    .into(),
            ],
        ));
    }
    table
}

#[cfg(test)]
mod tests {
    use stanza::renderer::console::Console;
    use stanza::renderer::Renderer;

    use crate::scoregrid::{compute, Detail};

    use super::*;

    #[test]
    fn outcomes_table() {
        let distribution = compute(1.5, 1.5, 6, Detail::Summary);
        let rendered = Console::default()
            .render(&tabulate_outcomes(&distribution))
            .to_string();
        println!("{rendered}");
        assert!(rendered.contains("Score 1-1"), "{rendered}");
        assert!(rendered.contains("0.2430"), "{rendered}");
        assert!(!rendered.contains("Both score"), "{rendered}");
    }

    #[test]
    fn outcomes_table_with_scoregrid() {
        let distribution = compute(1.5, 1.5, 6, Detail::Full);
        let rendered = Console::default()
            .render(&tabulate_outcomes(&distribution))
            .to_string();
        println!("{rendered}");
        assert!(rendered.contains("Under 2.5"), "{rendered}");
        assert!(rendered.contains("Both score"), "{rendered}");
    }

    #[test]
    fn scoregrid_table() {
        let distribution = compute(1.2, 0.8, 3, Detail::Full);
        let scoregrid = distribution.scoregrid.as_ref().unwrap();
        let rendered = Console::default()
            .render(&tabulate_scoregrid(scoregrid))
            .to_string();
        println!("{rendered}");
        assert!(rendered.contains(&format!("{:.4}", scoregrid[(0, 0)])), "{rendered}");
        assert!(rendered.contains(&format!("{:.4}", scoregrid[(3, 3)])), "{rendered}");
    }

    #[test]
    fn rates_table() {
        let estimate = RateEstimate {
            lambda: 1.75,
            considered: 5,
            finished: 4,
            goals: 7,
        };
        let rendered = Console::default()
            .render(&tabulate_rates(("Home", &estimate), ("Away", &estimate)))
            .to_string();
        assert!(rendered.contains("1.750"), "{rendered}");
    }
}
