//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Each country is drawn with its own letter (`A`, `B`, ...) and listed in a
//! legend below the grid. Lines drawn earlier win on overlapping cells.

use crate::domain::Lang;
use crate::i18n::country_label;

const MARKERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Render per-country `(year, value)` series as an ASCII chart.
pub fn render_ascii_chart(
    series: &[(String, Vec<(i32, f64)>)],
    width: usize,
    height: usize,
    lang: Lang,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let Some((x_min, x_max)) = year_range(series) else {
        return "Plot: no data\n".to_string();
    };
    let (y_min, y_max) = y_range(series).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];
    for (idx, (_, points)) in series.iter().enumerate() {
        let marker = char::from(MARKERS[idx % MARKERS.len()]);
        draw_series(&mut grid, points, marker, (x_min, x_max), (y_min, y_max));
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: years=[{x_min}, {x_max}] | y=[{y_min:.2}, {y_max:.2}]\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    let legend: Vec<String> = series
        .iter()
        .enumerate()
        .map(|(idx, (country, _))| {
            format!(
                "{}={}",
                char::from(MARKERS[idx % MARKERS.len()]),
                country_label(country, lang)
            )
        })
        .collect();
    out.push_str(&format!("Legend: {}\n", legend.join("  ")));

    out
}

fn year_range(series: &[(String, Vec<(i32, f64)>)]) -> Option<(i32, i32)> {
    let years = series.iter().flat_map(|(_, pts)| pts.iter().map(|&(y, _)| y));
    let (min, max) = years.fold((i32::MAX, i32::MIN), |(lo, hi), y| (lo.min(y), hi.max(y)));
    (min <= max).then_some((min, max))
}

fn y_range(series: &[(String, Vec<(i32, f64)>)]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for (_, pts) in series {
        for &(_, v) in pts {
            min_y = min_y.min(v);
            max_y = max_y.max(v);
        }
    }

    if !(min_y.is_finite() && max_y.is_finite()) {
        return None;
    }
    if max_y > min_y {
        Some((min_y, max_y))
    } else {
        // Flat data: open a unit-sized window around the value.
        Some((min_y - 0.5, max_y + 0.5))
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(year: i32, x_min: i32, x_max: i32, width: usize) -> usize {
    let width = width.max(2);
    if x_max <= x_min {
        return 0;
    }
    let u = (f64::from(year - x_min) / f64::from(x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_series(
    grid: &mut [Vec<char>],
    points: &[(i32, f64)],
    ch: char,
    (x_min, x_max): (i32, i32),
    (y_min, y_max): (f64, f64),
) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(year, v) in points {
        let x = map_x(year, x_min, x_max, width);
        let y = map_y(v, y_min, y_max, height);
        match prev {
            Some((x0, y0)) => draw_line(grid, x0, y0, x, y, ch),
            None => draw_line(grid, x, y, x, y, ch),
        }
        prev = Some((x, y));
    }
}

/// Integer line drawing (Bresenham-ish). Only blank cells are written.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_golden_snapshot_small() {
        let series = vec![
            ("Argentina".to_string(), vec![(2000, 10.0), (2010, 10.0)]),
            ("Brasil".to_string(), vec![(2000, 20.0), (2010, 20.0)]),
        ];

        let txt = render_ascii_chart(&series, 10, 5, Lang::En);
        let expected = concat!(
            "Plot: years=[2000, 2010] | y=[9.50, 20.50]\n",
            "BBBBBBBBBB\n",
            "          \n",
            "          \n",
            "          \n",
            "AAAAAAAAAA\n",
            "Legend: A=Argentina  B=Brazil\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn empty_series_has_no_plot() {
        assert_eq!(render_ascii_chart(&[], 20, 5, Lang::Es), "Plot: no data\n");
    }

    #[test]
    fn single_flat_series_is_drawn_mid_height() {
        let series = vec![("Chile".to_string(), vec![(1990, 7.0), (1991, 7.0)])];
        let txt = render_ascii_chart(&series, 10, 5, Lang::Es);
        assert_eq!(txt.lines().nth(3), Some("AAAAAAAAAA"));
    }
}
