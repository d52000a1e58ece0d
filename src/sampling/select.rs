//! Weighted random point selection over geometry lists.
//!
//! Inverse-CDF sampling over a piecewise-uniform density: a prefix-sum
//! array over triangle areas (or edge lengths) picks which element a
//! sample lands on, then the element samples itself uniformly.

use glam::{Vec2, Vec3};

use crate::geometry::{Edge2d, Triangle};

/// Build the cumulative area array for a triangle list into a
/// caller-supplied buffer; returns the total area.
pub fn build_area_cdf(triangles: &[Triangle], cdf: &mut Vec<f32>) -> f32 {
    cdf.clear();
    let mut total = 0.0;
    for t in triangles {
        total += t.area();
        cdf.push(total);
    }
    total
}

/// Build the cumulative length array for an edge list; returns the total
/// length.
pub fn build_length_cdf(edges: &[Edge2d], cdf: &mut Vec<f32>) -> f32 {
    cdf.clear();
    let mut total = 0.0;
    for e in edges {
        total += e.length();
        cdf.push(total);
    }
    total
}

/// Area-weighted random point over a triangle list.
///
/// `u[0]` selects the triangle through the prefix sums (first entry at or
/// above `u[0] * total`, degenerating to the last element on rounding
/// overshoot); `u[1]`, `u[2]` pick the barycentric point. Returns `None`
/// for an empty list or zero total area.
pub fn point_in_triangles(triangles: &[Triangle], cdf: &[f32], u: [f32; 3]) -> Option<Vec3> {
    let total = *cdf.last()?;
    if total <= 0.0 {
        return None;
    }
    let pick = u[0] * total;
    let index = cdf
        .iter()
        .position(|&c| c >= pick)
        .unwrap_or(cdf.len() - 1);
    Some(triangles[index].random_point(u[1], u[2]))
}

/// Length-weighted random point over an edge list (2D analogue of
/// [`point_in_triangles`]).
pub fn point_on_edges(edges: &[Edge2d], cdf: &[f32], u: [f32; 2]) -> Option<Vec2> {
    let total = *cdf.last()?;
    if total <= 0.0 {
        return None;
    }
    let pick = u[0] * total;
    let index = cdf
        .iter()
        .position(|&c| c >= pick)
        .unwrap_or(cdf.len() - 1);
    Some(edges[index].random_point(u[1]))
}
