use scout_terminal::dataset::{PlayerRow, PlayerTable, StatColumn};
use scout_terminal::rankings::RankConfig;
use scout_terminal::state::{AppState, Screen};

fn row(player: &str, team: &str, nineties: f64, values: &[f64]) -> PlayerRow {
    PlayerRow {
        player: player.to_string(),
        team: team.to_string(),
        nineties,
        values: values.to_vec(),
    }
}

fn small_table() -> PlayerTable {
    PlayerTable::new(
        vec![
            StatColumn::counting("goals"),
            StatColumn::counting("shots"),
        ],
        vec![
            row("A", "Alpha FC", 12.0, &[4.0, 20.0]),
            row("B", "Alpha FC", 8.0, &[1.0, 9.0]),
            row("C", "Beta FC", 20.0, &[7.0, 31.0]),
        ],
    )
}

fn state() -> AppState {
    AppState::new(small_table(), RankConfig::default())
}

#[test]
fn starts_on_the_pizza_page_with_a_valid_selection() {
    let state = state();
    assert_eq!(state.screen, Screen::Pizza);
    assert_eq!(state.selected_team().as_deref(), Some("Alpha FC"));
    assert_eq!(state.selected_player().as_deref(), Some("A"));
    // None of the default picks exist in this table.
    for category in scout_terminal::pizza::StatCategory::ORDER {
        assert!(state.selection.stats_for(category).is_empty());
    }
}

#[test]
fn team_cycle_wraps_and_resets_the_player_cursor() {
    let mut state = state();
    state.cycle_player(1);
    assert_eq!(state.selected_player().as_deref(), Some("B"));

    state.cycle_team(1);
    assert_eq!(state.selected_team().as_deref(), Some("Beta FC"));
    assert_eq!(state.selected_player().as_deref(), Some("C"));

    state.cycle_team(1);
    assert_eq!(state.selected_team().as_deref(), Some("Alpha FC"));

    state.cycle_team(-1);
    assert_eq!(state.selected_team().as_deref(), Some("Beta FC"));
}

#[test]
fn stat_toggle_targets_the_current_category_tab() {
    let mut state = state();
    state.toggle_stat_under_cursor();
    assert!(state.stat_is_selected("goals"));

    state.stat_cursor_next();
    state.toggle_stat_under_cursor();
    assert!(state.stat_is_selected("shots"));

    state.toggle_stat_under_cursor();
    assert!(!state.stat_is_selected("shots"));
}

#[test]
fn unknown_preset_leaves_axes_alone_and_warns() {
    let mut state = state();
    let (x, y) = (state.x_index, state.y_index);
    state.apply_preset(0);
    assert_eq!((state.x_index, state.y_index), (x, y));
    assert!(state.logs.back().unwrap().starts_with("[WARN]"));
}

#[test]
fn nineties_bounds_never_cross() {
    let mut state = state();
    // Steps are [8, 12, 20]; defaults open at [12, 20].
    assert_eq!(state.nineties_lo(), 12.0);
    assert_eq!(state.nineties_hi(), 20.0);

    state.adjust_nineties_lo(5);
    assert!(state.nineties_lo() <= state.nineties_hi());

    state.adjust_nineties_hi(-5);
    assert!(state.nineties_lo() <= state.nineties_hi());

    state.adjust_nineties_lo(-10);
    assert_eq!(state.nineties_lo(), 8.0);
}

#[test]
fn player_highlight_seeds_and_clears_its_tag() {
    let mut state = state();
    state.toggle_highlight_player();
    assert_eq!(state.highlight_players, vec!["A".to_string()]);
    assert_eq!(state.annotations.get("A").map(String::as_str), Some("A"));

    state.toggle_highlight_player();
    assert!(state.highlight_players.is_empty());
    assert!(state.annotations.is_empty());
}

#[test]
fn annotation_editing_requires_a_highlight_first() {
    let mut state = state();
    state.start_annotation_edit();
    assert!(state.annotation_edit.is_none());

    state.toggle_highlight_player();
    state.start_annotation_edit();
    assert_eq!(state.annotation_edit.as_deref(), Some("A"));

    state.annotation_input.clear();
    for ch in "star".chars() {
        state.annotation_push(ch);
    }
    state.annotation_backspace();
    state.annotation_commit();
    assert_eq!(state.annotations.get("A").map(String::as_str), Some("sta"));
    assert!(state.annotation_edit.is_none());
}

#[test]
fn scatter_config_reflects_the_page_state() {
    let mut state = state();
    state.cycle_x_stat(1);
    state.toggle_highlight_team();
    let config = state.scatter_config();

    assert_eq!(config.x_stat, "shots");
    assert_eq!(config.y_stat, "shots");
    assert_eq!(config.highlight_teams, vec!["Alpha FC".to_string()]);
    assert_eq!(config.nineties_lo, 12.0);
}

#[test]
fn log_ring_is_capped() {
    let mut state = state();
    for i in 0..500 {
        state.push_log(format!("line {i}"));
    }
    assert_eq!(state.logs.len(), 200);
    assert_eq!(state.logs.back().map(String::as_str), Some("line 499"));
}
