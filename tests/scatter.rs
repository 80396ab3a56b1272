use scout_terminal::dataset::{PlayerRow, PlayerTable, StatColumn, StatsError};
use scout_terminal::scatter::{
    Highlight, Overlay, ScatterConfig, ZoneKind, build_scatter, fit_trend, mean, median,
};

fn row(player: &str, team: &str, nineties: f64, values: &[f64]) -> PlayerRow {
    PlayerRow {
        player: player.to_string(),
        team: team.to_string(),
        nineties,
        values: values.to_vec(),
    }
}

fn rate_table() -> PlayerTable {
    PlayerTable::new(
        vec![StatColumn::rate("x"), StatColumn::rate("y")],
        vec![
            row("A", "Alpha FC", 10.0, &[1.0, 3.0]),
            row("B", "Alpha FC", 12.0, &[2.0, 5.0]),
            row("C", "Beta FC", 14.0, &[3.0, 7.0]),
            row("D", "Beta FC", 2.0, &[9.0, 9.0]),
        ],
    )
}

fn config(overlay: Overlay) -> ScatterConfig {
    ScatterConfig {
        x_stat: "x".to_string(),
        y_stat: "y".to_string(),
        nineties_lo: 5.0,
        nineties_hi: 40.0,
        overlay,
        zone_kind: ZoneKind::Median,
        highlight_teams: Vec::new(),
        highlight_players: Vec::new(),
    }
}

#[test]
fn nineties_range_filters_the_plotted_population() {
    let plot = build_scatter(&rate_table(), &config(Overlay::Zones)).unwrap();
    assert_eq!(plot.points.len(), 3);
    assert!(plot.points.iter().all(|p| p.player != "D"));
}

#[test]
fn counting_axes_are_normalized_per_90() {
    let table = PlayerTable::new(
        vec![StatColumn::counting("x"), StatColumn::counting("y")],
        vec![row("A", "Alpha FC", 10.0, &[30.0, 20.0])],
    );
    let plot = build_scatter(&table, &config(Overlay::Zones)).unwrap();
    assert_eq!(plot.points[0].x, 3.0);
    assert_eq!(plot.points[0].y, 2.0);
}

#[test]
fn zero_nineties_in_range_is_an_invalid_divisor() {
    let table = PlayerTable::new(
        vec![StatColumn::counting("x"), StatColumn::counting("y")],
        vec![row("A", "Alpha FC", 0.0, &[3.0, 1.0])],
    );
    let mut cfg = config(Overlay::Zones);
    cfg.nineties_lo = 0.0;
    let err = build_scatter(&table, &cfg).unwrap_err();
    assert!(matches!(err, StatsError::InvalidDivisor { .. }));
}

#[test]
fn trend_overlay_fits_y_on_x_with_intercept() {
    // The filtered points sit exactly on y = 2x + 1.
    let plot = build_scatter(&rate_table(), &config(Overlay::TrendLine)).unwrap();
    let trend = plot.trend.expect("trend should fit");

    assert!((trend.slope - 2.0).abs() < 1e-9);
    assert!((trend.intercept - 1.0).abs() < 1e-9);
    assert!((trend.r_squared - 1.0).abs() < 1e-6);
    assert!((trend.predict(10.0) - 21.0).abs() < 1e-9);
    assert!(plot.zones.is_none());
}

#[test]
fn degenerate_trends_are_skipped() {
    assert!(fit_trend(&[1.0], &[2.0]).is_none());
    assert!(fit_trend(&[3.0, 3.0, 3.0], &[1.0, 2.0, 3.0]).is_none());
}

#[test]
fn median_zone_lines() {
    let mut cfg = config(Overlay::Zones);
    cfg.zone_kind = ZoneKind::Median;
    let plot = build_scatter(&rate_table(), &cfg).unwrap();
    let zones = plot.zones.expect("zones requested");

    // Filtered xs are [1, 2, 3], ys are [3, 5, 7].
    assert_eq!(zones.v, 2.0);
    assert_eq!(zones.h, 5.0);
    assert!(plot.trend.is_none());
}

#[test]
fn average_zone_lines() {
    let mut cfg = config(Overlay::Zones);
    cfg.zone_kind = ZoneKind::Average;
    let plot = build_scatter(&rate_table(), &cfg).unwrap();
    let zones = plot.zones.expect("zones requested");

    assert_eq!(zones.v, 2.0);
    assert_eq!(zones.h, 5.0);
}

#[test]
fn player_highlight_wins_over_team_highlight() {
    let mut cfg = config(Overlay::Zones);
    cfg.highlight_teams = vec!["Alpha FC".to_string()];
    cfg.highlight_players = vec!["A".to_string()];
    let plot = build_scatter(&rate_table(), &cfg).unwrap();

    let a = plot.points.iter().find(|p| p.player == "A").unwrap();
    let b = plot.points.iter().find(|p| p.player == "B").unwrap();
    let c = plot.points.iter().find(|p| p.player == "C").unwrap();
    assert_eq!(a.highlight, Highlight::Player);
    assert_eq!(b.highlight, Highlight::Team);
    assert_eq!(c.highlight, Highlight::None);
}

#[test]
fn bounds_pad_by_five_percent_of_the_span() {
    let plot = build_scatter(&rate_table(), &config(Overlay::Zones)).unwrap();
    let (x_bounds, y_bounds) = plot.bounds().unwrap();

    // xs span [1, 3] => margin 0.1; ys span [3, 7] => margin 0.2.
    assert!((x_bounds[0] - 0.9).abs() < 1e-9);
    assert!((x_bounds[1] - 3.1).abs() < 1e-9);
    assert!((y_bounds[0] - 2.8).abs() < 1e-9);
    assert!((y_bounds[1] - 7.2).abs() < 1e-9);
}

#[test]
fn empty_population_yields_no_bounds_or_overlays() {
    let mut cfg = config(Overlay::Zones);
    cfg.nineties_lo = 100.0;
    cfg.nineties_hi = 200.0;
    let plot = build_scatter(&rate_table(), &cfg).unwrap();

    assert!(plot.points.is_empty());
    assert!(plot.bounds().is_none());
    assert!(plot.zones.is_none());
}

#[test]
fn unknown_axis_is_a_schema_mismatch() {
    let mut cfg = config(Overlay::Zones);
    cfg.x_stat = "missing".to_string();
    let err = build_scatter(&rate_table(), &cfg).unwrap_err();
    assert!(matches!(err, StatsError::SchemaMismatch { .. }));
}

#[test]
fn filtered_out_player_is_a_lookup_miss() {
    let plot = build_scatter(&rate_table(), &config(Overlay::Zones)).unwrap();
    assert!(plot.point_for("A").is_ok());
    // D fell to the 90s filter.
    let err = plot.point_for("D").unwrap_err();
    assert!(matches!(err, StatsError::LookupMiss { .. }));
}

#[test]
fn median_and_mean_helpers() {
    assert_eq!(median(&[4.0, 1.0, 3.0]), 3.0);
    assert_eq!(median(&[1.0, 2.0, 3.0, 10.0]), 2.5);
    assert_eq!(mean(&[1.0, 2.0, 3.0, 10.0]), 4.0);
}
