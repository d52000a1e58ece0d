//! Mapping bounding volumes to view-facing surface geometry, plus the
//! angular and ray/box utilities the visibility pipeline is built on.

use glam::{Vec2, Vec3};

use super::edge::Edge2d;
use super::triangle::Triangle;
use crate::types::{Aabb, Rect};

/// Append the triangles of every box face that faces the viewer.
///
/// Each of the up to 3 visible faces contributes 2 triangles, so the output
/// grows by 0 to 6 entries. Back-facing faces are culled by which side of
/// the face plane the viewer is on; a viewer inside the box sees no faces.
pub fn map_bounds_to_triangles(view_pos: Vec3, bounds: &Aabb, out: &mut Vec<Triangle>) {
    for axis in 0..3 {
        if view_pos[axis] > bounds.max[axis] {
            push_face(bounds, axis, bounds.max[axis], out);
        } else if view_pos[axis] < bounds.min[axis] {
            push_face(bounds, axis, bounds.min[axis], out);
        }
    }
}

fn push_face(bounds: &Aabb, axis: usize, plane: f32, out: &mut Vec<Triangle>) {
    let u = (axis + 1) % 3;
    let v = (axis + 2) % 3;

    let corner = |cu: f32, cv: f32| {
        let mut p = Vec3::ZERO;
        p[axis] = plane;
        p[u] = cu;
        p[v] = cv;
        p
    };

    let c00 = corner(bounds.min[u], bounds.min[v]);
    let c10 = corner(bounds.max[u], bounds.min[v]);
    let c11 = corner(bounds.max[u], bounds.max[v]);
    let c01 = corner(bounds.min[u], bounds.max[v]);

    out.push(Triangle::new(c00, c10, c11));
    out.push(Triangle::new(c00, c11, c01));
}

/// Append every rectangle edge that faces the viewer (2D analogue of
/// [`map_bounds_to_triangles`], over edges rather than faces).
///
/// Produces 0 to 2 edges.
pub fn map_bounds_to_edges(view_pos: Vec2, rect: &Rect, out: &mut Vec<Edge2d>) {
    let [c00, c10, c01, c11] = rect.corners();
    if view_pos.x > rect.max.x {
        out.push(Edge2d::new(c10, c11));
    } else if view_pos.x < rect.min.x {
        out.push(Edge2d::new(c00, c01));
    }
    if view_pos.y > rect.max.y {
        out.push(Edge2d::new(c01, c11));
    } else if view_pos.y < rect.min.y {
        out.push(Edge2d::new(c00, c10));
    }
}

/// Smallest angle (degrees) between the view direction and any part of the
/// box, measured in the plane spanned by `view_dir` and `view_axis`.
///
/// Projects all 8 corners into tangent space (`dot(axis) / dot(dir)`).
/// Returns 0 when the box straddles the view direction, otherwise the
/// angle subtended by the nearer edge of the box.
pub fn min_angle_to_bounds(view_pos: Vec3, view_dir: Vec3, view_axis: Vec3, bounds: &Aabb) -> f32 {
    min_angle_over(
        bounds
            .corners()
            .iter()
            .map(|&c| tangent_ratio((c - view_pos).dot(view_axis), (c - view_pos).dot(view_dir))),
    )
}

/// 2D variant of [`min_angle_to_bounds`] over the rectangle's 4 corners.
pub fn min_angle_to_rect(view_pos: Vec2, view_dir: Vec2, view_axis: Vec2, rect: &Rect) -> f32 {
    min_angle_over(
        rect.corners()
            .iter()
            .map(|&c| tangent_ratio((c - view_pos).dot(view_axis), (c - view_pos).dot(view_dir))),
    )
}

fn tangent_ratio(proj: f32, dist: f32) -> f32 {
    if dist == 0.0 {
        // Corner in the viewer's plane: infinitely off-axis on proj's side
        if proj >= 0.0 {
            f32::INFINITY
        } else {
            f32::NEG_INFINITY
        }
    } else {
        proj / dist
    }
}

fn min_angle_over(ratios: impl Iterator<Item = f32>) -> f32 {
    let mut lo = f32::INFINITY;
    let mut hi = f32::NEG_INFINITY;
    for r in ratios {
        lo = lo.min(r);
        hi = hi.max(r);
    }
    if lo < 0.0 && hi > 0.0 {
        0.0
    } else {
        lo.abs().min(hi.abs()).atan().to_degrees()
    }
}

/// Angle (degrees) between the view direction and a single point, measured
/// in the plane spanned by `view_dir` and `view_axis`.
///
/// Points behind the viewer report angles past 90 degrees.
pub fn angle_to_point(view_pos: Vec3, view_dir: Vec3, view_axis: Vec3, point: Vec3) -> f32 {
    let rel = point - view_pos;
    rel.dot(view_axis).abs().atan2(rel.dot(view_dir)).to_degrees()
}

/// 2D variant of [`angle_to_point`].
pub fn angle_to_point_2d(view_pos: Vec2, view_dir: Vec2, view_axis: Vec2, point: Vec2) -> f32 {
    let rel = point - view_pos;
    rel.dot(view_axis).abs().atan2(rel.dot(view_dir)).to_degrees()
}

/// Distance along a ray to where it enters an AABB (slab test).
///
/// Returns `None` when the ray misses the box entirely; a ray starting
/// inside enters at distance 0.
pub fn ray_box_entry(origin: Vec3, dir: Vec3, bounds: &Aabb) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        if dir[axis] == 0.0 {
            if origin[axis] < bounds.min[axis] || origin[axis] > bounds.max[axis] {
                return None;
            }
        } else {
            let inv = 1.0 / dir[axis];
            let t0 = (bounds.min[axis] - origin[axis]) * inv;
            let t1 = (bounds.max[axis] - origin[axis]) * inv;
            let (near, far) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
            t_min = t_min.max(near);
            t_max = t_max.min(far);
        }
    }

    if t_min > t_max || t_max < 0.0 {
        None
    } else {
        Some(t_min.max(0.0))
    }
}

/// Distance along a ray already inside an AABB to where it exits.
///
/// Tests only the candidate exit planes (the faces the direction points
/// toward) and takes the minimum non-negative crossing. Returns 0 for a
/// zero direction.
pub fn ray_box_exit(point: Vec3, dir: Vec3, bounds: &Aabb) -> f32 {
    let mut exit = f32::INFINITY;
    for axis in 0..3 {
        if dir[axis] == 0.0 {
            continue;
        }
        let plane = if dir[axis] > 0.0 {
            bounds.max[axis]
        } else {
            bounds.min[axis]
        };
        let t = (plane - point[axis]) / dir[axis];
        if t >= 0.0 {
            exit = exit.min(t);
        }
    }
    if exit.is_finite() {
        exit
    } else {
        0.0
    }
}

/// 2D variant of [`ray_box_entry`].
pub fn ray_rect_entry(origin: Vec2, dir: Vec2, rect: &Rect) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;

    for axis in 0..2 {
        if dir[axis] == 0.0 {
            if origin[axis] < rect.min[axis] || origin[axis] > rect.max[axis] {
                return None;
            }
        } else {
            let inv = 1.0 / dir[axis];
            let t0 = (rect.min[axis] - origin[axis]) * inv;
            let t1 = (rect.max[axis] - origin[axis]) * inv;
            let (near, far) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
            t_min = t_min.max(near);
            t_max = t_max.min(far);
        }
    }

    if t_min > t_max || t_max < 0.0 {
        None
    } else {
        Some(t_min.max(0.0))
    }
}

/// 2D variant of [`ray_box_exit`].
pub fn ray_rect_exit(point: Vec2, dir: Vec2, rect: &Rect) -> f32 {
    let mut exit = f32::INFINITY;
    for axis in 0..2 {
        if dir[axis] == 0.0 {
            continue;
        }
        let plane = if dir[axis] > 0.0 {
            rect.max[axis]
        } else {
            rect.min[axis]
        };
        let t = (plane - point[axis]) / dir[axis];
        if t >= 0.0 {
            exit = exit.min(t);
        }
    }
    if exit.is_finite() {
        exit
    } else {
        0.0
    }
}
