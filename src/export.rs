use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::pizza::PizzaChart;
use crate::rankings::RankConfig;
use crate::scatter::ScatterPlot;

pub struct ExportReport {
    pub path: PathBuf,
    pub rows: usize,
}

pub fn default_export_path(prefix: &str) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from(format!("scout_{prefix}_{stamp}.xlsx"))
}

/// Write the pizza page's audit table: one sheet of per-player percentile
/// ranks, plus a sheet with the selected player's wedge values.
pub fn export_ranks(path: &Path, chart: &PizzaChart, config: &RankConfig) -> Result<ExportReport> {
    let mut header = vec![
        "Player".to_string(),
        "Team".to_string(),
        "90s".to_string(),
    ];
    header.extend(chart.table.stats.iter().cloned());

    let mut rank_rows = vec![header];
    for row in &chart.table.rows {
        let mut cells = vec![
            row.player.clone(),
            row.team.clone(),
            format!("{:.1}", row.nineties),
        ];
        for rank in &row.ranks {
            cells.push(match rank {
                Some(value) => format!("{value:.2}"),
                None => String::new(),
            });
        }
        rank_rows.push(cells);
    }

    let mut slice_rows = vec![vec![
        "Category".to_string(),
        "Stat".to_string(),
        "Label".to_string(),
        "Rank".to_string(),
    ]];
    for slice in &chart.slices {
        let rank = match slice.outcome.is_eligible() || config.legacy_zero_ranks {
            true => format!("{:.2}", slice.outcome.value_or_zero()),
            false => "n/a".to_string(),
        };
        slice_rows.push(vec![
            slice.category.label().to_string(),
            slice.stat.clone(),
            slice.label.clone(),
            rank,
        ]);
    }

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Ranks")?;
        write_rows(sheet, &rank_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Wedges")?;
        write_rows(sheet, &slice_rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        path: path.to_path_buf(),
        rows: rank_rows.len().saturating_sub(1),
    })
}

/// Write the scatter page's current points, one row per plotted player.
pub fn export_scatter(path: &Path, plot: &ScatterPlot) -> Result<ExportReport> {
    let mut rows = vec![vec![
        "Player".to_string(),
        "Team".to_string(),
        plot.x_stat.clone(),
        plot.y_stat.clone(),
    ]];
    for point in &plot.points {
        rows.push(vec![
            point.player.clone(),
            point.team.clone(),
            format!("{:.4}", point.x),
            format!("{:.4}", point.y),
        ]);
    }

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Scatter")?;
        write_rows(sheet, &rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        path: path.to_path_buf(),
        rows: rows.len().saturating_sub(1),
    })
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
