//! CPU-side mesh generation

mod sphere;

pub use sphere::SphereGeometry;
