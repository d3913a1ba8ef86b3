//! SVG plots drawn with `plotters`

use super::layout::Point;
use super::RenderError;
use crate::graph::CooccurrenceGraph;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

const FONT: &str = "sans-serif";

fn draw_err(e: impl std::fmt::Display) -> RenderError {
    RenderError::Draw(e.to_string())
}

/// Diverging blue → white → red scale, `t` in `[0, 1]`
pub fn diverging(t: f64) -> RGBColor {
    const BLUE: (f64, f64, f64) = (33.0, 102.0, 172.0);
    const MID: (f64, f64, f64) = (247.0, 247.0, 247.0);
    const RED: (f64, f64, f64) = (178.0, 24.0, 43.0);

    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let (from, to, local) = if t < 0.5 {
        (BLUE, MID, t * 2.0)
    } else {
        (MID, RED, (t - 0.5) * 2.0)
    };
    let mix = |a: f64, b: f64| (a + (b - a) * local).round() as u8;
    RGBColor(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

/// Position `i` of `n` on the diverging scale
fn scale_position(i: usize, n: usize) -> f64 {
    if n <= 1 {
        1.0
    } else {
        i as f64 / (n - 1) as f64
    }
}

/// Maps layout coordinates in `[-1, 1]²` onto the drawing area
struct Canvas {
    center: (f64, f64),
    radius: f64,
}

impl Canvas {
    fn new(size: (u32, u32), fill: f64) -> Self {
        let (w, h) = (size.0 as f64, size.1 as f64);
        Self {
            center: (w / 2.0, h / 2.0),
            radius: w.min(h) / 2.0 * fill,
        }
    }

    fn px(&self, p: Point) -> (i32, i32) {
        (
            (self.center.0 + p.0 * self.radius).round() as i32,
            (self.center.1 - p.1 * self.radius).round() as i32,
        )
    }
}

fn edge_segments<'a>(
    graph: &'a CooccurrenceGraph,
    at: &'a HashMap<&'a str, (i32, i32)>,
) -> impl Iterator<Item = ((i32, i32), (i32, i32), u32)> + 'a {
    graph.edges().filter_map(move |(pair, count)| {
        Some((*at.get(pair.first())?, *at.get(pair.second())?, count))
    })
}

/// Circular plot: nodes grouped and coloured by frequency, edge width by count
pub fn draw_circos(
    graph: &CooccurrenceGraph,
    layout: &[(String, Point)],
    attribute: &str,
    path: &Path,
    size: (u32, u32),
) -> Result<(), RenderError> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let canvas = Canvas::new(size, 0.75);
    let at: HashMap<&str, (i32, i32)> = layout
        .iter()
        .map(|(name, p)| (name.as_str(), canvas.px(*p)))
        .collect();

    let groups: Vec<u32> = graph
        .nodes()
        .map(|n| n.frequency.unwrap_or(0))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let group_color = |freq: u32| {
        let idx = groups.iter().position(|g| *g == freq).unwrap_or(0);
        diverging(scale_position(idx, groups.len()))
    };

    let max_count = graph.max_weight().max(1) as f64;
    for (a, b, count) in edge_segments(graph, &at) {
        let width = (1.0 + 7.0 * count as f64 / max_count).round() as u32;
        root.draw(&PathElement::new(vec![a, b], BLACK.mix(0.25).stroke_width(width)))
            .map_err(draw_err)?;
    }

    let node_radius = (size.0.min(size.1) / 200).max(3) as i32;
    let font_size = (size.0.min(size.1) / 100).clamp(10, 22) as i32;
    for (name, p) in layout {
        let freq = graph.node(name).and_then(|n| n.frequency).unwrap_or(0);
        let xy = at[name.as_str()];
        root.draw(&Circle::new(xy, node_radius, group_color(freq).filled()))
            .map_err(draw_err)?;

        let label_at = canvas.px((p.0 * 1.04, p.1 * 1.04));
        let h = if p.0 < -1e-9 { HPos::Right } else { HPos::Left };
        let style = TextStyle::from((FONT, font_size).into_font()).pos(Pos::new(h, VPos::Center));
        root.draw(&Text::new(name.clone(), label_at, style))
            .map_err(draw_err)?;
    }

    draw_legend(&root, attribute, &groups, &group_color, font_size)?;
    root.present().map_err(draw_err)?;
    Ok(())
}

fn draw_legend(
    root: &DrawingArea<SVGBackend, Shift>,
    attribute: &str,
    groups: &[u32],
    color: &dyn Fn(u32) -> RGBColor,
    font_size: i32,
) -> Result<(), RenderError> {
    let line = font_size + 6;
    root.draw(&Text::new(attribute.to_string(), (20, 20), (FONT, font_size).into_font()))
        .map_err(draw_err)?;
    for (i, group) in groups.iter().rev().enumerate() {
        let y = 20 + line * (i as i32 + 1);
        root.draw(&Rectangle::new(
            [(20, y), (20 + font_size, y + font_size)],
            color(*group).filled(),
        ))
        .map_err(draw_err)?;
        root.draw(&Text::new(
            group.to_string(),
            (28 + font_size, y),
            (FONT, font_size).into_font(),
        ))
        .map_err(draw_err)?;
    }
    Ok(())
}

/// Force-directed network plot
pub fn draw_network(
    graph: &CooccurrenceGraph,
    layout: &[(String, Point)],
    path: &Path,
    size: (u32, u32),
) -> Result<(), RenderError> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let canvas = Canvas::new(size, 0.9);
    let at: HashMap<&str, (i32, i32)> = layout
        .iter()
        .map(|(name, p)| (name.as_str(), canvas.px(*p)))
        .collect();

    for (a, b, _) in edge_segments(graph, &at) {
        root.draw(&PathElement::new(vec![a, b], RGBColor(128, 128, 128).stroke_width(1)))
            .map_err(draw_err)?;
    }

    let font_size = (size.0.min(size.1) / 140).clamp(9, 18) as i32;
    for (name, _) in layout {
        let xy = at[name.as_str()];
        root.draw(&Circle::new(xy, 4, BLUE.filled())).map_err(draw_err)?;
        root.draw(&Text::new(
            name.clone(),
            (xy.0 + 6, xy.1),
            TextStyle::from((FONT, font_size).into_font()).pos(Pos::new(HPos::Left, VPos::Center)),
        ))
        .map_err(draw_err)?;
    }

    root.present().map_err(draw_err)?;
    Ok(())
}

/// Horizontal bar chart, first bar at the top
pub fn draw_bars(
    title: &str,
    x_desc: &str,
    bars: &[(String, f64)],
    path: &Path,
    size: (u32, u32),
) -> Result<(), RenderError> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let n = bars.len();
    if n == 0 {
        root.draw(&Text::new(
            format!("{} (no data)", title),
            (20, 30),
            (FONT, 20).into_font(),
        ))
        .map_err(draw_err)?;
        root.present().map_err(draw_err)?;
        return Ok(());
    }

    let max = bars.iter().map(|(_, v)| *v).fold(0.0f64, f64::max);
    let x_max = if max > 0.0 { max * 1.05 } else { 1.0 };
    let longest = bars.iter().map(|(name, _)| name.chars().count()).max().unwrap_or(1) as u32;
    let label_area = (longest * 7 + 16).min(size.0 / 2);

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(label_area)
        .build_cartesian_2d(0f64..x_max, (0usize..n).into_segmented())
        .map_err(draw_err)?;

    // segment i holds bar n-1-i so the first bar is drawn on top
    let label = |v: &SegmentValue<usize>| match v {
        SegmentValue::CenterOf(i) if *i < n => bars[n - 1 - *i].0.clone(),
        _ => String::new(),
    };
    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(n)
        .y_label_formatter(&label)
        .x_desc(x_desc)
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(bars.iter().enumerate().map(|(i, (_, value))| {
            let slot = n - 1 - i;
            let color = diverging(scale_position(n - 1 - i, n));
            Rectangle::new(
                [(0.0, SegmentValue::Exact(slot)), (*value, SegmentValue::Exact(slot + 1))],
                color.filled(),
            )
        }))
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diverging_endpoints() {
        assert_eq!(diverging(0.0), RGBColor(33, 102, 172));
        assert_eq!(diverging(0.5), RGBColor(247, 247, 247));
        assert_eq!(diverging(1.0), RGBColor(178, 24, 43));
        assert_eq!(diverging(f64::NAN), diverging(0.0));
    }

    #[test]
    fn canvas_maps_unit_square() {
        let canvas = Canvas::new((200, 100), 1.0);
        assert_eq!(canvas.px((0.0, 0.0)), (100, 50));
        assert_eq!(canvas.px((1.0, 1.0)), (150, 0));
        assert_eq!(canvas.px((-1.0, -1.0)), (50, 100));
    }
}
