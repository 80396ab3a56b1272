use scout_terminal::dataset::{PlayerRow, PlayerTable, StatColumn, StatsError};
use scout_terminal::rankings::{RankConfig, RankOutcome, percentile_ranks, rank_statistics};

fn row(player: &str, team: &str, nineties: f64, values: &[f64]) -> PlayerRow {
    PlayerRow {
        player: player.to_string(),
        team: team.to_string(),
        nineties,
        values: values.to_vec(),
    }
}

fn goals_table() -> PlayerTable {
    PlayerTable::new(
        vec![StatColumn::counting("goals")],
        vec![
            row("A", "Alpha FC", 10.0, &[5.0]),
            row("B", "Alpha FC", 20.0, &[0.0]),
            row("C", "Beta FC", 2.0, &[3.0]),
        ],
    )
}

fn stats(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn lone_eligible_player_ranks_100() {
    let table = goals_table();
    let ranked =
        rank_statistics(&table, &stats(&["goals"]), "A", &RankConfig::default()).unwrap();

    // B is out on a zero raw value, C is out on minutes; A is a pool of one.
    assert_eq!(ranked.target, vec![RankOutcome::Ranked(100.0)]);
}

#[test]
fn filtered_target_is_ineligible_not_zeroth_percentile() {
    let table = goals_table();
    let ranked =
        rank_statistics(&table, &stats(&["goals"]), "B", &RankConfig::default()).unwrap();

    assert_eq!(ranked.target, vec![RankOutcome::Ineligible]);
    assert!(!ranked.target[0].is_eligible());
    // Legacy display policy collapses the marker to exactly 0.0.
    assert_eq!(ranked.target[0].value_or_zero(), 0.0);
}

#[test]
fn unknown_player_is_ineligible() {
    let table = goals_table();
    let ranked =
        rank_statistics(&table, &stats(&["goals"]), "Nobody", &RankConfig::default()).unwrap();
    assert_eq!(ranked.target, vec![RankOutcome::Ineligible]);
}

#[test]
fn audit_table_keeps_every_player_with_empty_cells_for_the_filtered() {
    let table = goals_table();
    let ranked =
        rank_statistics(&table, &stats(&["goals"]), "A", &RankConfig::default()).unwrap();

    assert_eq!(ranked.table.rows.len(), 3);
    assert_eq!(ranked.table.rank_for("A", "goals"), Some(100.0));
    assert_eq!(ranked.table.rank_for("B", "goals"), None);
    assert_eq!(ranked.table.rank_for("C", "goals"), None);
}

#[test]
fn minutes_threshold_is_configurable() {
    let table = goals_table();
    let config = RankConfig {
        min_nineties: 1.0,
        ..RankConfig::default()
    };
    let ranked = rank_statistics(&table, &stats(&["goals"]), "C", &config).unwrap();

    // C (3 goals in 2 nineties = 1.5 per 90) now beats A (0.5 per 90).
    assert_eq!(ranked.target, vec![RankOutcome::Ranked(100.0)]);
    assert_eq!(ranked.table.rank_for("A", "goals"), Some(50.0));
}

#[test]
fn ranks_stay_in_bounds_and_best_player_gets_100() {
    let table = PlayerTable::new(
        vec![StatColumn::counting("shots")],
        vec![
            row("A", "Alpha FC", 10.0, &[10.0]),
            row("B", "Alpha FC", 10.0, &[20.0]),
            row("C", "Beta FC", 10.0, &[30.0]),
            row("D", "Beta FC", 10.0, &[40.0]),
        ],
    );
    let ranked =
        rank_statistics(&table, &stats(&["shots"]), "D", &RankConfig::default()).unwrap();

    assert_eq!(ranked.target, vec![RankOutcome::Ranked(100.0)]);
    for r in &ranked.table.rows {
        let rank = r.ranks[0].unwrap();
        assert!((0.0..=100.0).contains(&rank));
    }
    assert_eq!(ranked.table.rank_for("A", "shots"), Some(25.0));
}

#[test]
fn tied_values_share_a_percentile() {
    let table = PlayerTable::new(
        vec![StatColumn::counting("goals")],
        vec![
            // 0.5 per 90 for both A and D, 0.6 for E.
            row("A", "Alpha FC", 10.0, &[5.0]),
            row("D", "Beta FC", 20.0, &[10.0]),
            row("E", "Beta FC", 5.0, &[3.0]),
        ],
    );
    let ranked =
        rank_statistics(&table, &stats(&["goals"]), "E", &RankConfig::default()).unwrap();

    assert_eq!(ranked.target, vec![RankOutcome::Ranked(100.0)]);
    assert_eq!(ranked.table.rank_for("A", "goals"), Some(50.0));
    assert_eq!(ranked.table.rank_for("D", "goals"), Some(50.0));
}

#[test]
fn rate_columns_rank_on_raw_values() {
    // Per-90 division would flip this ordering (80/10 < 60/5); a rate column
    // must keep it.
    let table = PlayerTable::new(
        vec![StatColumn::rate("TotCmp%")],
        vec![
            row("A", "Alpha FC", 10.0, &[80.0]),
            row("B", "Beta FC", 5.0, &[60.0]),
        ],
    );
    let ranked =
        rank_statistics(&table, &stats(&["TotCmp%"]), "A", &RankConfig::default()).unwrap();

    assert_eq!(ranked.target, vec![RankOutcome::Ranked(100.0)]);
    assert_eq!(ranked.table.rank_for("B", "TotCmp%"), Some(50.0));
}

#[test]
fn target_order_follows_input_order() {
    let table = PlayerTable::new(
        vec![
            StatColumn::counting("goals"),
            StatColumn::counting("shots"),
        ],
        vec![
            row("A", "Alpha FC", 10.0, &[2.0, 30.0]),
            row("B", "Beta FC", 10.0, &[4.0, 10.0]),
        ],
    );
    let ranked =
        rank_statistics(&table, &stats(&["shots", "goals"]), "A", &RankConfig::default()).unwrap();

    assert_eq!(ranked.stats, stats(&["shots", "goals"]));
    assert_eq!(
        ranked.target,
        vec![RankOutcome::Ranked(100.0), RankOutcome::Ranked(50.0)]
    );
}

#[test]
fn duplicate_stat_in_one_call_is_rejected() {
    let table = goals_table();
    let err = rank_statistics(
        &table,
        &stats(&["goals", "goals"]),
        "A",
        &RankConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, StatsError::DuplicateStat { .. }));
}

#[test]
fn unknown_stat_is_a_schema_mismatch() {
    let table = goals_table();
    let err = rank_statistics(
        &table,
        &stats(&["assists"]),
        "A",
        &RankConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, StatsError::SchemaMismatch { .. }));
}

#[test]
fn merged_audit_tables_union_columns_without_duplicating_rows() {
    let table = PlayerTable::new(
        vec![
            StatColumn::counting("goals"),
            StatColumn::counting("clearances"),
        ],
        vec![
            row("A", "Alpha FC", 10.0, &[5.0, 0.0]),
            row("B", "Beta FC", 20.0, &[8.0, 40.0]),
        ],
    );
    let config = RankConfig::default();

    let mut first = rank_statistics(&table, &stats(&["goals"]), "A", &config)
        .unwrap()
        .table;
    let second = rank_statistics(&table, &stats(&["clearances"]), "A", &config)
        .unwrap()
        .table;
    first.merge(&second);

    assert_eq!(first.stats, stats(&["goals", "clearances"]));
    assert_eq!(first.rows.len(), 2);
    // A sat out the clearances pool (zero raw value): empty cell, not zero.
    assert_eq!(first.rank_for("A", "goals"), Some(100.0));
    assert_eq!(first.rank_for("A", "clearances"), None);
    assert_eq!(first.rank_for("B", "clearances"), Some(100.0));
}

#[test]
fn percentile_ranks_average_tie_breaking() {
    assert!(percentile_ranks(&[]).is_empty());
    assert_eq!(percentile_ranks(&[7.0]), vec![100.0]);
    assert_eq!(
        percentile_ranks(&[1.0, 2.0, 2.0, 4.0]),
        vec![25.0, 62.5, 62.5, 100.0]
    );
}

#[test]
fn percentile_ranks_round_to_two_decimals() {
    // Three distinct values: 1/3 => 33.33, 2/3 => 66.67 after rounding.
    let ranks = percentile_ranks(&[1.0, 2.0, 3.0]);
    assert_eq!(ranks, vec![33.33, 66.67, 100.0]);
}
