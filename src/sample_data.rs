//! Built-in demo league used when no dataset snapshot is available.

use std::time::SystemTime;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::dataset::{PlayerRow, PlayerTable, StatColumn};

const DEMO_SEED: u64 = 2223;
const PLAYERS_PER_TEAM: usize = 16;

const TEAMS: [&str; 20] = [
    "Arsenal",
    "Aston Villa",
    "Bournemouth",
    "Brentford",
    "Brighton",
    "Chelsea",
    "Crystal Palace",
    "Everton",
    "Fulham",
    "Leeds United",
    "Leicester City",
    "Liverpool",
    "Manchester City",
    "Manchester Utd",
    "Newcastle Utd",
    "Nott'ham Forest",
    "Southampton",
    "Tottenham",
    "West Ham",
    "Wolves",
];

const SURNAMES: [&str; 40] = [
    "Stone", "Vega", "Holt", "Nox", "Vale", "Rook", "Park", "Moss", "Noor", "Hale", "Ash", "Pike",
    "Gray", "Reed", "Quinn", "Marsh", "Cole", "Frost", "Lane", "Dunn", "Blake", "Ward", "Knox",
    "Hart", "Shaw", "Cross", "Wells", "Bryce", "Flint", "Sharp", "Nash", "Bird", "Lund", "Kerr",
    "Boyd", "Rhodes", "Tate", "Finch", "Slade", "Mercer",
];

pub fn demo_columns() -> Vec<StatColumn> {
    vec![
        StatColumn::counting("Tkl+Int"),
        StatColumn::counting("TklWinPoss"),
        StatColumn::rate("DrbTkl%"),
        StatColumn::rate("AerialWin%"),
        StatColumn::counting("Clr"),
        StatColumn::counting("PassesAttempted"),
        StatColumn::rate("TotCmp%"),
        StatColumn::counting("LiveTouch"),
        StatColumn::counting("ProgCarries"),
        StatColumn::counting("Switches"),
        StatColumn::counting("CarriesToFinalThird"),
        StatColumn::counting("ProgPasses"),
        StatColumn::counting("SuccDrb"),
        StatColumn::counting("KeyPasses"),
        StatColumn::rate("SCA90"),
        StatColumn::counting("SCAPassLive"),
        StatColumn::counting("xAG"),
        StatColumn::counting("npxG"),
        StatColumn::counting("Shots"),
        StatColumn::rate("SoT%"),
        StatColumn::counting("npG-xG"),
        StatColumn::counting("ProgPassesRec"),
    ]
}

/// A plausible league: uneven minutes, integer-ish counting stats (so some
/// players genuinely sit on zero), percentage stats independent of minutes.
pub fn demo_table() -> PlayerTable {
    let mut rng = StdRng::seed_from_u64(DEMO_SEED);
    let columns = demo_columns();
    let mut rows = Vec::with_capacity(TEAMS.len() * PLAYERS_PER_TEAM);

    for team in TEAMS {
        for slot in 0..PLAYERS_PER_TEAM {
            let player = if team == "Manchester City" && slot == 0 {
                "Rodri".to_string()
            } else {
                player_name(&mut rng)
            };
            let nineties = (rng.gen_range(0.5_f64..38.0) * 10.0).round() / 10.0;
            let values = columns
                .iter()
                .map(|column| stat_value(&mut rng, &column.name, nineties))
                .collect();
            rows.push(PlayerRow {
                player,
                team: team.to_string(),
                nineties,
                values,
            });
        }
    }

    let mut table = PlayerTable::new(columns, rows);
    table.as_of = Some(SystemTime::now());
    table
}

fn player_name(rng: &mut StdRng) -> String {
    let initial = (b'A' + rng.gen_range(0..26)) as char;
    let surname = SURNAMES[rng.gen_range(0..SURNAMES.len())];
    format!("{initial}. {surname}")
}

fn stat_value(rng: &mut StdRng, stat: &str, nineties: f64) -> f64 {
    let jitter = rng.gen_range(0.3_f64..1.7);
    match stat {
        // Percentages and per-90 rates: independent of minutes played.
        "DrbTkl%" => round1(rng.gen_range(25.0..75.0)),
        "AerialWin%" => round1(rng.gen_range(20.0..80.0)),
        "TotCmp%" => round1(rng.gen_range(58.0..94.0)),
        "SoT%" => round1(rng.gen_range(15.0..60.0)),
        "SCA90" => round2(rng.gen_range(0.4..6.0)),
        // Expected-goal style floats.
        "npxG" => round2(0.25 * jitter * nineties),
        "xAG" => round2(0.18 * jitter * nineties),
        "npG-xG" => round2(rng.gen_range(-0.12_f64..0.12) * nineties),
        // Counting stats: per-90 base rate scaled by minutes, rounded to
        // whole events.
        _ => {
            let base = match stat {
                "Tkl+Int" => 3.0,
                "TklWinPoss" => 1.2,
                "Clr" => 2.5,
                "PassesAttempted" => 55.0,
                "LiveTouch" => 62.0,
                "ProgCarries" => 3.0,
                "Switches" => 1.0,
                "CarriesToFinalThird" => 2.0,
                "ProgPasses" => 4.5,
                "SuccDrb" => 1.2,
                "KeyPasses" => 1.3,
                "Shots" => 1.8,
                "SCAPassLive" => 2.0,
                "ProgPassesRec" => 4.0,
                _ => 1.0,
            };
            (base * jitter * nineties).round()
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
