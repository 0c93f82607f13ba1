//! Box blur for single-channel raster images backed by a summed-area table.
//!
//! - Build an [`IntegralTable`] once per source image
//! - Query any rectangle's sum in constant time with [`region_sum`]
//! - Run the clamp-at-edges box blur with [`blur_with_table`] or [`box_blur`]
#![forbid(unsafe_code)]

mod foundation;

pub mod blur;
pub mod grid;
pub mod integral;
pub mod load;
pub mod region;
pub mod settings;
pub mod source;
pub mod synthetic;

pub use crate::foundation::core::{Dimensions, MAX_PIXELS, MAX_TABLE_SUM};
pub use crate::foundation::error::{BlurError, BlurResult};
pub use crate::foundation::rng::Rng64;

pub use blur::{blur_with_table, box_blur, box_blur_gray8};
pub use grid::{BlurredBuffer, Grid, PixelBuffer};
pub use integral::IntegralTable;
pub use load::{DecodedImage, decode_image, load_image, load_raw_rgb, save_gray};
pub use region::{Window, region_sum};
pub use settings::{BlurSettings, RawSize};
pub use source::{Channel, gray_from_dynamic, gray_from_interleaved};
pub use synthetic::seeded_gray;
