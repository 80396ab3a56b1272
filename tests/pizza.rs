use scout_terminal::dataset::{PlayerRow, PlayerTable, StatColumn};
use scout_terminal::pizza::{PizzaSelection, StatCategory, build_pizza, display_label};
use scout_terminal::rankings::RankConfig;

fn row(player: &str, team: &str, nineties: f64, values: &[f64]) -> PlayerRow {
    PlayerRow {
        player: player.to_string(),
        team: team.to_string(),
        nineties,
        values: values.to_vec(),
    }
}

fn table() -> PlayerTable {
    PlayerTable::new(
        vec![
            StatColumn::counting("Clr"),
            StatColumn::counting("Switches"),
            StatColumn::counting("KeyPasses"),
            StatColumn::counting("Shots"),
        ],
        vec![
            row("A", "Alpha FC", 10.0, &[20.0, 10.0, 12.0, 30.0]),
            row("B", "Beta FC", 10.0, &[40.0, 5.0, 6.0, 15.0]),
        ],
    )
}

fn selection() -> PizzaSelection {
    PizzaSelection {
        defense: vec!["Clr".to_string()],
        possession: vec!["Switches".to_string()],
        playmaking: vec!["KeyPasses".to_string()],
        attack: vec!["Shots".to_string()],
    }
}

#[test]
fn slices_concatenate_in_fixed_category_order() {
    let chart = build_pizza(&table(), &selection(), "A", "Alpha FC", &RankConfig::default())
        .unwrap();

    let categories: Vec<StatCategory> = chart.slices.iter().map(|s| s.category).collect();
    assert_eq!(
        categories,
        vec![
            StatCategory::Defense,
            StatCategory::Possession,
            StatCategory::Playmaking,
            StatCategory::Attack,
        ]
    );
    let stats: Vec<&str> = chart.slices.iter().map(|s| s.stat.as_str()).collect();
    assert_eq!(stats, vec!["Clr", "Switches", "KeyPasses", "Shots"]);
}

#[test]
fn colour_list_is_sized_to_the_slices() {
    let table = table();
    let mut selection = selection();
    selection.defense.push("Switches".to_string());
    let chart =
        build_pizza(&table, &selection, "A", "Alpha FC", &RankConfig::default()).unwrap();

    let colours = chart.slice_colours();
    assert_eq!(colours.len(), chart.slices.len());
    for (slice, colour) in chart.slices.iter().zip(&colours) {
        assert_eq!(*colour, slice.category.colour());
    }
    // Two defense slices now lead the chart, both in the defense colour.
    assert_eq!(colours[0], StatCategory::Defense.colour());
    assert_eq!(colours[1], StatCategory::Defense.colour());
}

#[test]
fn audit_table_unions_all_categories() {
    let chart = build_pizza(&table(), &selection(), "A", "Alpha FC", &RankConfig::default())
        .unwrap();

    assert_eq!(
        chart.table.stats,
        vec!["Clr", "Switches", "KeyPasses", "Shots"]
    );
    assert_eq!(chart.table.rows.len(), 2);
    assert_eq!(chart.table.rank_for("A", "Switches"), Some(100.0));
    assert_eq!(chart.table.rank_for("B", "Clr"), Some(100.0));
}

#[test]
fn empty_categories_are_allowed() {
    let selection = PizzaSelection {
        defense: Vec::new(),
        possession: Vec::new(),
        playmaking: Vec::new(),
        attack: vec!["Shots".to_string()],
    };
    let chart = build_pizza(&table(), &selection, "A", "Alpha FC", &RankConfig::default())
        .unwrap();
    assert_eq!(chart.slices.len(), 1);
    assert_eq!(chart.slices[0].category, StatCategory::Attack);
}

#[test]
fn display_labels_prefer_the_static_map_then_column_label() {
    let mut table = table();
    assert_eq!(display_label(&table, "Clr"), "Clearances");
    assert_eq!(display_label(&table, "Switches"), "Switches");

    table.columns[1] = StatColumn::counting("Switches").with_label("Long Switches");
    assert_eq!(display_label(&table, "Switches"), "Long Switches");
}

#[test]
fn toggle_adds_then_removes_a_stat() {
    let mut selection = selection();
    selection.toggle(StatCategory::Defense, "Shots");
    assert!(selection.defense.iter().any(|s| s == "Shots"));
    selection.toggle(StatCategory::Defense, "Shots");
    assert!(!selection.defense.iter().any(|s| s == "Shots"));
}

#[test]
fn retain_known_drops_stale_picks() {
    let mut selection = selection();
    selection.attack.push("NotAColumn".to_string());
    selection.retain_known(&table());
    assert_eq!(selection.attack, vec!["Shots".to_string()]);
}

#[test]
fn category_cycle_wraps_both_ways() {
    assert_eq!(StatCategory::Attack.next(), StatCategory::Defense);
    assert_eq!(StatCategory::Defense.prev(), StatCategory::Attack);
    let mut category = StatCategory::Defense;
    for _ in 0..4 {
        category = category.next();
    }
    assert_eq!(category, StatCategory::Defense);
}
