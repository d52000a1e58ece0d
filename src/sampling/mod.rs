//! Sample point generation: low-discrepancy sequences and weighted
//! selection over clipped geometry.

mod select;
mod sobol;

pub use select::{build_area_cdf, build_length_cdf, point_in_triangles, point_on_edges};
pub use sobol::{Rng64, SobolSequence};
