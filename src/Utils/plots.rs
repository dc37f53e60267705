use crate::numerical::Riemann_sums::{RiemannRule, RiemannSum, SubintervalShape};
use crate::numerical::integration_errors::IntegrationError;
use crate::numerical::integration_task::IntegrationTask;
use crate::numerical::polynomial::CURVE_POINTS;
use crate::numerical::refinement::{RefinementSequence, round_to};
use itertools::{Itertools, MinMaxResult};
use log::info;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use std::error::Error;
use strum::IntoEnumIterator;

/// whole animation lasts about 5 seconds
const ANIMATION_LENGTH_MS: f64 = 5000.0;

type Ranges = ((f64, f64), (f64, f64));

/// tab:blue, tab:orange, tab:green, tab:red
pub fn rule_color(rule: RiemannRule) -> RGBColor {
    match rule {
        RiemannRule::Left => RGBColor(31, 119, 180),
        RiemannRule::Right => RGBColor(255, 127, 14),
        RiemannRule::Mid => RGBColor(44, 160, 44),
        RiemannRule::Trap => RGBColor(214, 39, 40),
    }
}

/// delay between gif frames so that all frames fit into the animation length
pub fn frame_delay_ms(frames: usize) -> u32 {
    if frames == 0 {
        return ANIMATION_LENGTH_MS as u32;
    }
    ((ANIMATION_LENGTH_MS / frames as f64).round() as u32).max(1)
}

fn padded<I: Iterator<Item = f64>>(values: I) -> (f64, f64) {
    let (lo, hi) = match values.minmax_by(|a, b| a.total_cmp(b)) {
        MinMaxResult::NoElements => (0.0, 1.0),
        MinMaxResult::OneElement(v) => (v, v),
        MinMaxResult::MinMax(lo, hi) => (lo, hi),
    };
    let pad = if hi > lo { 0.05 * (hi - lo) } else { 1.0 };
    (lo - pad, hi + pad)
}

/// Axis ranges covering the curve, every shape and the x axis
pub fn plot_ranges<'s, I>(curve: &[(f64, f64)], shapes: I) -> Ranges
where
    I: IntoIterator<Item = &'s SubintervalShape> + Clone,
{
    let corners = |s: &'s SubintervalShape| s.corners.into_iter();
    let xs = curve
        .iter()
        .map(|p| p.0)
        .chain(shapes.clone().into_iter().flat_map(corners).map(|c| c.0));
    let ys = curve
        .iter()
        .map(|p| p.1)
        .chain(shapes.into_iter().flat_map(corners).map(|c| c.1))
        .chain(std::iter::once(0.0));
    (padded(xs), padded(ys))
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    caption: &str,
    ranges: Ranges,
    curve: &[(f64, f64)],
    shapes: &[SubintervalShape],
    curve_color: RGBColor,
    shape_color: RGBColor,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let ((x_min, x_max), (y_min, y_max)) = ranges;
    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart.configure_mesh().x_desc("x").y_desc("f(x)").draw()?;

    chart.draw_series(LineSeries::new(curve.iter().copied(), &curve_color))?;
    chart.draw_series(
        shapes
            .iter()
            .map(|s| PathElement::new(s.closed_path(), shape_color.stroke_width(1))),
    )?;
    Ok(())
}

/// text with a half transparent background box, pixel coordinates
fn draw_label<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    (x, y): (i32, i32),
    text: &str,
    color: RGBColor,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let box_width = 9 * text.chars().count() as i32 + 10;
    area.draw(&Rectangle::new(
        [(x - 5, y - 4), (x + box_width, y + 22)],
        color.mix(0.5).filled(),
    ))?;
    area.draw(&Text::new(
        text.to_string(),
        (x, y),
        ("sans-serif", 18).into_font(),
    ))?;
    Ok(())
}

/// 2x2 comparison of the left, right, midpoint and trapezoidal sums with width `interval_len`
pub fn plot_riemann_sums(task: &IntegrationTask, filename: &str) -> Result<(), Box<dyn Error>> {
    let poly = task.polynomial();
    let estimator = RiemannSum::new(&poly, task.lower_lim, task.upper_lim)?;
    let curve = poly.linspace(task.lower_lim, task.upper_lim, CURVE_POINTS);

    let root = BitMapBackend::new(filename, (1200, 900)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((2, 2));
    for (panel, rule) in panels.iter().zip(RiemannRule::iter()) {
        let area = estimator.estimate(rule, task.interval_len)?;
        let shapes = estimator.sample_geometry(rule, task.interval_len)?;
        let ranges = plot_ranges(&curve, shapes.iter());
        let caption = format!("{}: {}", rule.label(), area);
        let color = rule_color(rule);
        draw_panel(panel, &caption, ranges, &curve, &shapes, color, color)?;
    }
    root.present()?;
    info!("comparison plot saved to {}", filename);
    Ok(())
}

/// Animated gif of the refinement sequence of `task.rule`, one frame per width
pub fn animate_refinement(task: &IntegrationTask, filename: &str) -> Result<(), Box<dyn Error>> {
    let poly = task.polynomial();
    let estimator = RiemannSum::new(&poly, task.lower_lim, task.upper_lim)?;
    let sequence = RefinementSequence::new(estimator, task.rule, task.start_il, task.end_il)?;
    let curve = poly.linspace(task.lower_lim, task.upper_lim, CURVE_POINTS);

    let frames = sequence
        .clone()
        .map(|frame| Ok((frame, sequence.frame_geometry(frame.step)?)))
        .collect::<Result<Vec<_>, IntegrationError>>()?;
    // same axes for every frame
    let ranges = plot_ranges(&curve, frames.iter().flat_map(|(_, shapes)| shapes.iter()));

    let title = format!(
        "{} Riemann Sum From Interval Width of {} to {}",
        task.rule.capitalized(),
        task.start_il,
        task.end_il
    );
    let color = rule_color(task.rule);
    let delay = frame_delay_ms(frames.len());
    let root = BitMapBackend::gif(filename, (900, 675), delay)?.into_drawing_area();
    for (frame, shapes) in &frames {
        root.fill(&WHITE)?;
        draw_panel(&root, &title, ranges, &curve, shapes, BLACK, color)?;
        draw_label(&root, (70, 50), &format!("Approx. Area: {}", frame.area), color)?;
        draw_label(
            &root,
            (70, 80),
            &format!("Subinterval Length: {}", round_to(frame.width, 5)),
            RGBColor(128, 128, 128),
        )?;
        root.present()?;
    }
    info!(
        "animation with {} frames ({} ms each) saved to {}",
        frames.len(),
        delay,
        filename
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::polynomial::Polynomial;

    #[test]
    fn test_frame_delay() {
        assert_eq!(frame_delay_ms(100), 50);
        assert_eq!(frame_delay_ms(10), 500);
        assert_eq!(frame_delay_ms(1_000_000), 1);
        assert_eq!(frame_delay_ms(0), 5000);
    }

    #[test]
    fn test_plot_ranges_include_axis_and_shapes() {
        let f = Polynomial::new(vec![1.0, 0.0]);
        let est = RiemannSum::new(&f, 1.0, 2.0).unwrap();
        let curve = f.linspace(1.0, 2.0, CURVE_POINTS);
        // right rule with a too-wide width reaches past the curve
        let shapes = est.sample_geometry(RiemannRule::Right, 3.0).unwrap();
        let ((x_min, x_max), (y_min, y_max)) = plot_ranges(&curve, shapes.iter());
        assert!(x_min < 1.0 && x_max > 4.0);
        assert!(y_min < 0.0 && y_max > 4.0);
    }

    #[test]
    fn test_rule_colors_distinct() {
        let colors: Vec<(u8, u8, u8)> = RiemannRule::iter()
            .map(|rule| {
                let RGBColor(r, g, b) = rule_color(rule);
                (r, g, b)
            })
            .collect();
        for (i, a) in colors.iter().enumerate() {
            for b in colors.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
