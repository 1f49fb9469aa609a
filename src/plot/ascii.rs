//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements, one panel per sector:
//! - nominal wages: `n`
//! - real wages: `r`
//! - base-year reference: a `|` column

use crate::domain::{DisplayMode, TableFile, TableSector};

/// Render one panel per sector of `table`.
///
/// Sectors with no plottable values under `mode` get a placeholder line
/// instead of an empty grid.
pub fn render_ascii_panels(
    table: &TableFile,
    mode: DisplayMode,
    width: usize,
    height: usize,
) -> String {
    let mut out = String::new();
    for sector in &table.sectors {
        out.push_str(&render_sector_panel(table, sector, mode, width, height));
        out.push('\n');
    }
    out
}

fn render_sector_panel(
    table: &TableFile,
    sector: &TableSector,
    mode: DisplayMode,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let nominal = if mode.shows_nominal() {
        series_points(&table.years, &sector.nominal)
    } else {
        Vec::new()
    };
    let real = if mode.shows_real() {
        series_points(&table.years, &sector.real)
    } else {
        Vec::new()
    };

    let mut out = String::new();
    out.push_str(&format!("=== {} ===\n", sector.name));

    if nominal.is_empty() && real.is_empty() {
        out.push_str("(no data)\n");
        return out;
    }

    let (x_min, x_max) = x_range(&table.years);
    let (y_min, y_max) = y_range(&nominal, &real).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    out.push_str(&format!(
        "Plot: years=[{x_min:.0}, {x_max:.0}] | wages=[{y_min:.0}, {y_max:.0}] | base={}\n",
        table.base_year
    ));

    let mut grid = vec![vec![' '; width]; height];

    // Base-year column first, so data points can overlay it.
    let base = f64::from(table.base_year);
    if base >= x_min && base <= x_max {
        let col = map_x(base, x_min, x_max, width);
        for row in grid.iter_mut() {
            row[col] = '|';
        }
    }

    for &(x, y) in &nominal {
        grid[map_y(y, y_min, y_max, height)][map_x(x, x_min, x_max, width)] = 'n';
    }
    for &(x, y) in &real {
        let row = map_y(y, y_min, y_max, height);
        let col = map_x(x, x_min, x_max, width);
        grid[row][col] = if grid[row][col] == 'n' { '*' } else { 'r' };
    }

    for row in &grid {
        let line: String = row.iter().collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out.push_str("legend: n nominal  r real  * both  | base year\n");

    out
}

fn series_points(years: &[i32], values: &[Option<f64>]) -> Vec<(f64, f64)> {
    years
        .iter()
        .zip(values.iter())
        .filter_map(|(&year, &value)| value.map(|v| (f64::from(year), v)))
        .collect()
}

fn x_range(years: &[i32]) -> (f64, f64) {
    let min = years.first().copied().unwrap_or(0);
    let max = years.last().copied().unwrap_or(1);
    if min == max {
        // A single joined year still needs a non-degenerate axis.
        (f64::from(min) - 0.5, f64::from(max) + 0.5)
    } else {
        (f64::from(min), f64::from(max))
    }
}

fn y_range(nominal: &[(f64, f64)], real: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &(_, y) in nominal.iter().chain(real) {
        min = min.min(y);
        max = max.max(y);
    }
    if !min.is_finite() || !max.is_finite() {
        return None;
    }
    Some((min, max))
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let pad = ((max - min).abs() * frac).max(1e-9);
    (min - pad, max + pad)
}

fn map_x(v: f64, min: f64, max: f64, width: usize) -> usize {
    let u = ((v - min) / (max - min)).clamp(0.0, 1.0);
    ((width - 1) as f64 * u).round() as usize
}

fn map_y(v: f64, min: f64, max: f64, height: usize) -> usize {
    let u = ((v - min) / (max - min)).clamp(0.0, 1.0);
    // Row 0 is the top of the grid.
    (height - 1) - ((height - 1) as f64 * u).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TableSector;

    fn table() -> TableFile {
        TableFile {
            tool: "rw".to_string(),
            base_year: 2016,
            min_year: 2000,
            years: vec![2015, 2016, 2017],
            sectors: vec![TableSector {
                name: "Education".to_string(),
                nominal: vec![Some(26928.0), Some(28094.0), Some(30258.0)],
                real: vec![Some(30421.0), Some(28094.0), Some(29520.0)],
            }],
        }
    }

    #[test]
    fn render_is_deterministic() {
        let a = render_ascii_panels(&table(), DisplayMode::Both, 40, 10);
        let b = render_ascii_panels(&table(), DisplayMode::Both, 40, 10);
        assert_eq!(a, b);
        assert!(a.contains("=== Education ==="));
        assert!(a.contains('n'));
        assert!(a.contains('r'));
        assert!(a.contains('|'));
    }

    #[test]
    fn nominal_only_mode_hides_real_points() {
        let out = render_ascii_panels(&table(), DisplayMode::Nominal, 40, 10);
        // Inspect only the grid rows; the header and legend contain prose.
        let grid: Vec<&str> = out
            .lines()
            .filter(|l| !l.starts_with("===") && !l.starts_with("Plot:") && !l.starts_with("legend:"))
            .collect();
        let grid = grid.join("\n");
        assert!(grid.contains('n'));
        assert!(!grid.contains('r'));
        assert!(!grid.contains('*'));
    }

    #[test]
    fn sector_without_values_renders_placeholder() {
        let mut t = table();
        t.sectors[0].nominal = vec![None, None, None];
        t.sectors[0].real = vec![None, None, None];
        let out = render_ascii_panels(&t, DisplayMode::Both, 40, 10);
        assert!(out.contains("(no data)"));
    }
}
