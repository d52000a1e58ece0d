//! Computational geometry for line-of-sight testing.
//!
//! Leaf-first: triangles and edges know how to clip themselves against a
//! half-space; cutting planes apply one clip across a whole geometry list;
//! field-of-view clippers compose cutting planes from view angles; the
//! bounds utilities turn an AABB into the surface geometry a viewer can
//! actually see.

mod bounds;
mod edge;
mod fov;
mod plane;
mod triangle;

pub use bounds::{
    angle_to_point, angle_to_point_2d, map_bounds_to_edges, map_bounds_to_triangles,
    min_angle_to_bounds, min_angle_to_rect, ray_box_entry, ray_box_exit, ray_rect_entry,
    ray_rect_exit,
};
pub use edge::Edge2d;
pub use fov::{FieldOfView, FieldOfView2d};
pub use plane::{CuttingPlane, CuttingPlane2};
pub use triangle::{Triangle, TriangleSlice};
