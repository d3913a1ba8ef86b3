//! Node placement for network plots
//!
//! Positions are in the unit square `[-1, 1]²`; the plotting code maps
//! them onto pixels.

use crate::graph::CooccurrenceGraph;
use std::collections::HashMap;
use std::f64::consts::TAU;

/// A 2-D position
pub type Point = (f64, f64);

/// Evenly spaced points on the unit circle, first at the top, clockwise
pub fn circle_points(n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let angle = TAU * i as f64 / n.max(1) as f64;
            (angle.sin(), angle.cos())
        })
        .collect()
}

/// Circular layout ordered by frequency (highest first, ties by name)
///
/// Nodes sharing a frequency land next to each other, which is what the
/// per-group colouring relies on.
pub fn circular_layout(graph: &CooccurrenceGraph) -> Vec<(String, Point)> {
    let mut nodes: Vec<(&str, u32)> = graph
        .nodes()
        .map(|n| (n.name.as_str(), n.frequency.unwrap_or(0)))
        .collect();
    nodes.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    nodes
        .into_iter()
        .zip(circle_points(graph.node_count()))
        .map(|((name, _), p)| (name.to_string(), p))
        .collect()
}

/// Tuning of the force-directed simulation
#[derive(Debug, Clone, Copy)]
pub struct ForceParams {
    pub iterations: usize,
    /// Repulsion between every node pair
    pub repulsion: f64,
    /// Spring pull along edges
    pub spring: f64,
    /// Pull towards the origin, keeps components from drifting apart
    pub gravity: f64,
}

impl Default for ForceParams {
    fn default() -> Self {
        Self {
            iterations: 300,
            repulsion: 0.02,
            spring: 0.05,
            gravity: 0.01,
        }
    }
}

/// Spring/repulsion layout
///
/// Deterministic: starts from the circle in name order and cools the
/// step size linearly, so the same graph always gets the same picture.
/// Heavier edges pull harder (`log2(1 + count)`).
pub fn force_layout(graph: &CooccurrenceGraph, params: ForceParams) -> Vec<(String, Point)> {
    let mut names: Vec<&str> = graph.nodes().map(|n| n.name.as_str()).collect();
    names.sort_unstable();
    let n = names.len();
    if n == 0 {
        return Vec::new();
    }

    let slot: HashMap<&str, usize> = names.iter().enumerate().map(|(i, name)| (*name, i)).collect();
    let springs: Vec<(usize, usize, f64)> = graph
        .edges()
        .filter_map(|(pair, count)| {
            let a = *slot.get(pair.first())?;
            let b = *slot.get(pair.second())?;
            Some((a, b, (1.0 + count as f64).log2()))
        })
        .collect();

    let mut pos = circle_points(n);
    let ideal = (4.0 / n as f64).sqrt().min(1.0);

    for step in 0..params.iterations {
        let mut force = vec![(0.0f64, 0.0f64); n];

        for i in 0..n {
            for j in (i + 1)..n {
                let (dx, dy) = (pos[i].0 - pos[j].0, pos[i].1 - pos[j].1);
                let dist_sq = (dx * dx + dy * dy).max(1e-6);
                let push = params.repulsion * ideal * ideal / dist_sq;
                force[i].0 += dx * push;
                force[i].1 += dy * push;
                force[j].0 -= dx * push;
                force[j].1 -= dy * push;
            }
        }

        for &(a, b, weight) in &springs {
            let (dx, dy) = (pos[b].0 - pos[a].0, pos[b].1 - pos[a].1);
            let dist = (dx * dx + dy * dy).sqrt().max(1e-6);
            let pull = params.spring * weight * (dist - ideal) / dist;
            force[a].0 += dx * pull;
            force[a].1 += dy * pull;
            force[b].0 -= dx * pull;
            force[b].1 -= dy * pull;
        }

        let cooling = 1.0 - step as f64 / params.iterations as f64;
        let max_step = 0.1 * cooling;
        for (p, f) in pos.iter_mut().zip(&force) {
            let fx = f.0 - p.0 * params.gravity;
            let fy = f.1 - p.1 * params.gravity;
            let len = (fx * fx + fy * fy).sqrt();
            if len > 0.0 {
                let scale = len.min(max_step) / len;
                p.0 += fx * scale;
                p.1 += fy * scale;
            }
        }
    }

    normalize(&mut pos);
    names
        .into_iter()
        .map(str::to_string)
        .zip(pos)
        .collect()
}

/// Rescale so the layout spans `[-1, 1]` on its wider axis, centred
fn normalize(pos: &mut [Point]) {
    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in pos.iter() {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    let span = (max_x - min_x).max(max_y - min_y);
    let (cx, cy) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
    for p in pos.iter_mut() {
        if span > 1e-12 {
            *p = (2.0 * (p.0 - cx) / span, 2.0 * (p.1 - cy) / span);
        } else {
            *p = (0.0, 0.0);
        }
    }
}
