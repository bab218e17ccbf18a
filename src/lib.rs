//! Signed distance field generation for thresholded bitmaps.
//!
//! Pixels are classified as ink or background, two grids of nearest-seed offsets
//! are relaxed with the "8-points" two-sweep propagation, and the difference of
//! the two distances is encoded as an 8-bit gray level:
//!
//! `clamp((distance_to_ink - distance_to_background) * scale + bias, 0, 255)`
//!
//! With the default [`Options`] the boundary sits at 128 and each gray level is a
//! third of a pixel.

// crate-specific exceptions:
#![forbid(unsafe_code)]

mod bitmap;
pub use bitmap::*;

mod generator;
pub use generator::*;

mod grid2;
pub use grid2::*;

mod offset;
pub use offset::*;

mod propagate;
