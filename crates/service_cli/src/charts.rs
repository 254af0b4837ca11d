//! PNG charts of a comparison run.
//!
//! - Actual vs Black-Scholes predicted price, with the `y = x` diagonal
//! - Prediction error against strike, with the zero line
//!
//! Calls are drawn in blue and puts in green.

use std::ops::Range;
use std::path::Path;

use adapter_loader::ComparisonRow;
use anyhow::Result;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use pricer_core::types::OptionType;

/// Output file of the price scatter.
pub const PRICE_CHART_FILE: &str = "actual_vs_predicted.png";

/// Output file of the error scatter.
pub const ERROR_CHART_FILE: &str = "error_vs_strike.png";

const CALL_COLOUR: RGBColor = BLUE;
const PUT_COLOUR: RGBColor = GREEN;
const POINT_ALPHA: f64 = 0.6;
const DASHES: usize = 40;

/// Points of one chart split by option side.
#[derive(Debug, Default, PartialEq)]
pub struct SideSeries {
    /// Call points
    pub calls: Vec<(f64, f64)>,
    /// Put points
    pub puts: Vec<(f64, f64)>,
}

impl SideSeries {
    /// Projects each row to a point and splits by side.
    pub fn from_rows<F>(rows: &[ComparisonRow], project: F) -> Self
    where
        F: Fn(&ComparisonRow) -> (f64, f64),
    {
        let mut series = Self::default();
        for row in rows {
            let point = project(row);
            match row.option_type {
                OptionType::Call => series.calls.push(point),
                OptionType::Put => series.puts.push(point),
            }
        }
        series
    }

    fn all(&self) -> impl Iterator<Item = &(f64, f64)> {
        self.calls.iter().chain(self.puts.iter())
    }
}

/// Upper end of the diagonal: the larger of the max market and max model price.
pub fn diagonal_extent(rows: &[ComparisonRow]) -> f64 {
    rows.iter()
        .flat_map(|r| [r.last_price, r.bs_price])
        .fold(0.0, f64::max)
}

/// Range covering `values` with 5% padding on each side.
pub fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return 0.0..1.0;
    }
    let pad = if hi > lo { 0.05 * (hi - lo) } else { 1.0 };
    (lo - pad)..(hi + pad)
}

/// Splits the segment `from -> to` into alternating dash pieces.
///
/// The first dash starts at `from` and the last one ends at `to`.
fn dashed(from: (f64, f64), to: (f64, f64)) -> Vec<Vec<(f64, f64)>> {
    let step = |i: usize| {
        let t = i as f64 / (2 * DASHES - 1) as f64;
        (from.0 + t * (to.0 - from.0), from.1 + t * (to.1 - from.1))
    };
    (0..DASHES)
        .map(|k| vec![step(2 * k), step(2 * k + 1)])
        .collect()
}

type PlaneCoord = Cartesian2d<RangedCoordf64, RangedCoordf64>;

fn draw_sides<DB: DrawingBackend>(
    chart: &mut ChartContext<'_, DB, PlaneCoord>,
    series: &SideSeries,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    for (label, colour, points) in [
        ("Calls", CALL_COLOUR, &series.calls),
        ("Puts", PUT_COLOUR, &series.puts),
    ] {
        let style = colour.mix(POINT_ALPHA).filled();
        chart
            .draw_series(points.iter().map(|&(x, y)| Circle::new((x, y), 3, style)))?
            .label(label)
            .legend(move |(x, y)| Circle::new((x + 10, y), 3, style));
    }
    Ok(())
}

/// Draws market price (x) against Black-Scholes price (y).
pub fn price_scatter(rows: &[ComparisonRow], out_path: &Path) -> Result<()> {
    let series = SideSeries::from_rows(rows, |r| (r.last_price, r.bs_price));
    let max_val = diagonal_extent(rows).max(1.0);
    let range = 0.0..(max_val * 1.05);

    let root = BitMapBackend::new(out_path, (1000, 750)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Actual vs Black–Scholes Predicted Prices", ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(range.clone(), range)?;

    chart
        .configure_mesh()
        .x_desc("Market Price (₹)")
        .y_desc("Black–Scholes Price (₹)")
        .draw()?;

    draw_sides(&mut chart, &series)?;

    let red = RED.stroke_width(2);
    chart
        .draw_series(
            dashed((0.0, 0.0), (max_val, max_val))
                .into_iter()
                .map(|dash| PathElement::new(dash, red)),
        )?
        .label("Perfect Prediction")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], red));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Draws strike (x) against prediction error `bs_price - last_price` (y).
pub fn error_by_strike(rows: &[ComparisonRow], out_path: &Path) -> Result<()> {
    let series = SideSeries::from_rows(rows, |r| (r.strike, r.bs_price - r.last_price));
    let x_range = padded_range(series.all().map(|p| p.0));
    let y_range = padded_range(series.all().map(|p| p.1).chain(std::iter::once(0.0)));

    let root = BitMapBackend::new(out_path, (1250, 750)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Black–Scholes Prediction Error vs Strike Price",
            ("sans-serif", 22),
        )
        .margin(10)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range.clone(), y_range)?;

    chart
        .configure_mesh()
        .x_desc("Strike Price (₹)")
        .y_desc("Prediction Error (₹)")
        .draw()?;

    let red = RED.stroke_width(2);
    chart.draw_series(
        dashed((x_range.start, 0.0), (x_range.end, 0.0))
            .into_iter()
            .map(|dash| PathElement::new(dash, red)),
    )?;

    draw_sides(&mut chart, &series)?;

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
