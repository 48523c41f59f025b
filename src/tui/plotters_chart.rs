//! Plotters-powered trend chart widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - nicer axis + mesh rendering
//! - less manual work for ticks/labels
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Line colors, assigned to countries in selection order.
pub const PALETTE: [(u8, u8, u8); 8] = [
    (0, 255, 255),
    (255, 200, 0),
    (0, 255, 0),
    (255, 80, 80),
    (200, 120, 255),
    (255, 255, 255),
    (80, 160, 255),
    (255, 140, 200),
];

/// Ratatui color for the `idx`-th series (matches the Plotters line color).
pub fn series_color(idx: usize) -> Color {
    let (r, g, b) = PALETTE[idx % PALETTE.len()];
    Color::Rgb(r, g, b)
}

/// A render-only chart description; all series and bounds are computed
/// outside the render call.
pub struct TrendChart<'a> {
    /// One `(year, value)` polyline per country.
    pub series: &'a [Vec<(f64, f64)>],
    /// Years after this one are projections; drawn as a vertical marker.
    pub anchor_year: Option<f64>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub fmt_y: fn(f64) -> String,
}

impl<'a> Widget for TrendChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 8)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(6)
                .y_labels(5)
                .x_label_formatter(&|v| format!("{v:.0}"))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            if let Some(anchor) = self.anchor_year.filter(|a| *a > x0 && *a < x1) {
                let grey = RGBColor(110, 110, 110);
                chart.draw_series(LineSeries::new([(anchor, y0), (anchor, y1)], &grey))?;
            }

            for (idx, points) in self.series.iter().enumerate() {
                let (r, g, b) = PALETTE[idx % PALETTE.len()];
                chart.draw_series(LineSeries::new(points.iter().copied(), &RGBColor(r, g, b)))?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}
