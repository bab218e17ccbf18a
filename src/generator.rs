use crate::Bitmap;
use crate::Grid2;
use crate::Offset;
use std::time::Instant;

#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: usize, height: usize },
}

/// How pixels are classified and how distances are encoded into gray levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "with_serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Options {
    /// Pixels whose red channel (on a 16-bit scale) is below this are ink.
    ///
    /// The default of 128 only treats fully black 8-bit pixels as ink.
    pub threshold: u16,

    /// Gray levels per pixel of distance.
    pub scale: i32,

    /// Gray level of the boundary between ink and background.
    pub bias: i32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            threshold: 128,
            scale: 3,
            bias: 128,
        }
    }
}

/// Turns a thresholded bitmap into an 8-bit distance field.
///
/// Background pixels encode above `bias`, ink pixels at or below it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DistanceFieldGenerator {
    options: Options,
}

impl DistanceFieldGenerator {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn is_ink(&self, red16: u16) -> bool {
        red16 < self.options.threshold
    }

    pub fn generate(&self, image: &impl Bitmap) -> Result<Grid2<u8>, Error> {
        let [width, height] = image.size();
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage { width, height });
        }

        let start = Instant::now();

        let (mut to_ink, mut to_background) = self.seed(image);
        to_ink.propagate();
        to_background.propagate();
        let field = self.combine(&to_ink, &to_background);

        log::debug!(
            "Generated {}x{} distance field in {:.1?}",
            width,
            height,
            start.elapsed()
        );

        Ok(field)
    }

    /// Classifies every pixel once and seeds both propagation grids from it.
    ///
    /// The first grid measures the distance to the nearest ink pixel, the second
    /// the distance to the nearest background pixel.
    pub fn seed(&self, image: &impl Bitmap) -> (Grid2<Offset>, Grid2<Offset>) {
        let size = image.size();
        let mut to_ink = Grid2::<Offset>::new(size);
        let mut to_background = Grid2::<Offset>::new(size);
        for y in 0..size[1] {
            for x in 0..size[0] {
                let (ink, background) = if self.is_ink(image.red16(x, y)) {
                    (Offset::ZERO, Offset::SENTINEL)
                } else {
                    (Offset::SENTINEL, Offset::ZERO)
                };
                to_ink[[x, y]] = ink;
                to_background[[x, y]] = background;
            }
        }
        (to_ink, to_background)
    }

    /// Encodes two propagated grids of the same size into gray levels.
    pub(crate) fn combine(
        &self,
        to_ink: &Grid2<Offset>,
        to_background: &Grid2<Offset>,
    ) -> Grid2<u8> {
        debug_assert_eq!(to_ink.size(), to_background.size(), "grid size mismatch");
        Grid2::from_fn(to_ink.size(), |p| {
            self.encode(to_ink[p].length_squared(), to_background[p].length_squared())
        })
    }

    /// Gray level for the given squared distances to ink and to background.
    ///
    /// Distances are truncated to whole pixels before they are subtracted.
    pub fn encode(&self, to_ink_squared: i32, to_background_squared: i32) -> u8 {
        let to_ink = f64::from(to_ink_squared).sqrt() as i32;
        let to_background = f64::from(to_background_squared).sqrt() as i32;
        let value = (to_ink - to_background)
            .saturating_mul(self.options.scale)
            .saturating_add(self.options.bias);
        value.clamp(0, 255) as u8
    }

    /// Generates a field per image. Images share nothing, so with `with_rayon` they run in parallel.
    pub fn generate_batch<B: Bitmap + Sync>(&self, images: &[B]) -> Vec<Result<Grid2<u8>, Error>> {
        #[cfg(feature = "with_rayon")]
        {
            use rayon::prelude::*;

            images.par_iter().map(|image| self.generate(image)).collect()
        }

        #[cfg(not(feature = "with_rayon"))]
        {
            images.iter().map(|image| self.generate(image)).collect()
        }
    }

    #[cfg(feature = "with_image")]
    pub fn generate_image(
        &self,
        image: &image::DynamicImage,
    ) -> Result<image::GrayImage, Error> {
        Ok(self.generate(image)?.to_gray_image())
    }
}

/// [`DistanceFieldGenerator::generate`] with the default [`Options`].
pub fn generate(image: &impl Bitmap) -> Result<Grid2<u8>, Error> {
    DistanceFieldGenerator::default().generate(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: u8 = 0;
    const PAPER: u8 = 255;

    fn bitmap(size: [usize; 2], is_ink: impl Fn(usize, usize) -> bool) -> Grid2<u8> {
        Grid2::from_fn(size, |[x, y]| if is_ink(x, y) { INK } else { PAPER })
    }

    #[test]
    fn encode_vectors() {
        let generator = DistanceFieldGenerator::default();
        for (to_ink, to_background, expected) in [
            (0, 0, 128),
            (25, 0, 143),
            (0, 100, 98),
            (10000, 0, 255),
            (0, 10000, 0),
            (2, 0, 131),
            (3, 1, 128),
            (24, 0, 140),
        ] {
            assert_eq!(
                generator.encode(to_ink, to_background),
                expected,
                "({to_ink}, {to_background})"
            );
        }
    }

    #[test]
    fn encode_with_custom_scale_and_bias() {
        let generator = DistanceFieldGenerator::new(Options {
            scale: 1,
            bias: 0,
            ..Default::default()
        });
        assert_eq!(generator.encode(25, 0), 5);
        assert_eq!(generator.encode(0, 25), 0);

        let huge = DistanceFieldGenerator::new(Options {
            scale: i32::MAX,
            ..Default::default()
        });
        assert_eq!(huge.encode(10000, 0), 255);
        assert_eq!(huge.encode(0, 10000), 0);
    }

    #[test]
    fn combine_reads_both_grids() {
        let generator = DistanceFieldGenerator::default();
        let to_ink = Grid2::from_vec([2, 1], vec![Offset::new(3, 4), Offset::ZERO]).unwrap();
        let to_background =
            Grid2::from_vec([2, 1], vec![Offset::ZERO, Offset::new(0, -10)]).unwrap();
        assert_eq!(generator.combine(&to_ink, &to_background).data(), &[143, 98]);
    }

    #[test]
    fn seeds_are_complementary() {
        let image = bitmap([3, 2], |x, y| x == y);
        let (to_ink, to_background) = DistanceFieldGenerator::default().seed(&image);
        for y in 0..2 {
            for x in 0..3 {
                let (ink, background) = (to_ink[[x, y]], to_background[[x, y]]);
                if x == y {
                    assert_eq!((ink, background), (Offset::ZERO, Offset::SENTINEL));
                } else {
                    assert_eq!((ink, background), (Offset::SENTINEL, Offset::ZERO));
                }
            }
        }
    }

    #[test]
    fn threshold_is_on_a_16_bit_scale() {
        let generator = DistanceFieldGenerator::default();
        assert!(generator.is_ink(127));
        assert!(!generator.is_ink(128));

        // only pure black counts as ink in 8-bit sources
        let image = Grid2::<u8>::from_vec([3, 1], vec![0, 1, 127]).unwrap();
        let (to_ink, _) = generator.seed(&image);
        assert_eq!(
            to_ink.data(),
            &[Offset::ZERO, Offset::SENTINEL, Offset::SENTINEL]
        );

        let mid_gray = DistanceFieldGenerator::new(Options {
            threshold: 0x8000,
            ..Default::default()
        });
        let (to_ink, _) = mid_gray.seed(&image);
        assert!(to_ink.data().iter().all(|&o| o == Offset::ZERO));
    }

    #[test]
    fn all_background_is_saturated() {
        let field = generate(&bitmap([16, 12], |_, _| false)).unwrap();
        assert!(field.data().iter().all(|&v| v == 255));
    }

    #[test]
    fn all_ink_is_saturated() {
        let field = generate(&bitmap([16, 12], |_, _| true)).unwrap();
        assert!(field.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn single_pixel_images() {
        // every neighbour lookup falls outside the image
        // An out-of-bounds neighbour never replaces a cell, so a lone ink pixel has no
        // background to measure and saturates to 0 rather than sitting at 128.
        let ink = generate(&bitmap([1, 1], |_, _| true)).unwrap();
        assert_eq!(ink.size(), [1, 1]);
        assert_eq!(ink.data(), &[0]);

        let paper = generate(&bitmap([1, 1], |_, _| false)).unwrap();
        assert_eq!(paper.data(), &[255]);
    }

    #[test]
    fn empty_images_are_rejected() {
        assert_eq!(
            generate(&Grid2::<u8>::new([0, 5])),
            Err(Error::EmptyImage {
                width: 0,
                height: 5
            })
        );
    }

    #[test]
    fn wide_images_are_accepted() {
        let strip = generate(&bitmap([7071, 3], |x, _| x == 3500)).unwrap();
        assert_eq!(strip.size(), [7071, 3]);
        assert_eq!(strip[[3500, 1]], 125);
        assert_eq!(strip[[3501, 1]], 131);
        assert_eq!(strip[[0, 1]], 255);
        assert_eq!(strip[[7070, 1]], 255);

        // farther from the ink than the sentinel reaches
        let long = generate(&bitmap([20_000, 1], |x, _| x == 0)).unwrap();
        assert_eq!(long[[0, 0]], 125);
        assert_eq!(long[[1, 0]], 131);
        assert!(long.data()[43..].iter().all(|&v| v == 255));
    }

    #[test]
    fn deterministic() {
        let image = bitmap([37, 23], |x, y| (x * 7 + y * 13) % 5 == 0 || (x / 6 + y / 4) % 3 == 0);
        let a = generate(&image).unwrap();
        let b = generate(&image).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn single_ink_pixel_is_symmetric() {
        let n = 7;
        let c = n / 2;
        let field = generate(&bitmap([n, n], |x, y| x == c && y == c)).unwrap();

        assert_eq!(field[[c, c]], 125);
        for [x, y] in [[c - 1, c], [c + 1, c], [c, c - 1], [c, c + 1]] {
            assert_eq!(field[[x, y]], 131, "at ({x}, {y})");
        }
        assert_eq!(field[[0, 0]], 140);

        for y in 0..n {
            for x in 0..n {
                let v = field[[x, y]];
                assert_eq!(v, field[[n - 1 - x, y]]);
                assert_eq!(v, field[[x, n - 1 - y]]);
                assert_eq!(v, field[[y, x]]);
            }
        }
    }

    #[test]
    fn solid_rectangle_profile_is_monotonic() {
        let field = generate(&bitmap([40, 40], |x, y| {
            (10..30).contains(&x) && (10..30).contains(&y)
        }))
        .unwrap();

        // boundary straddles the bias
        assert_eq!(field[[10, 20]], 125);
        assert_eq!(field[[9, 20]], 131);

        // from the middle of the rectangle outwards
        for x in 1..=20 {
            assert!(field[[x - 1, 20]] >= field[[x, 20]], "left, x = {x}");
        }
        for x in 20..39 {
            assert!(field[[x + 1, 20]] >= field[[x, 20]], "right, x = {x}");
        }
        // diagonally away from a corner
        for k in 1..=10 {
            assert!(field[[10 - k, 10 - k]] > field[[11 - k, 11 - k]], "k = {k}");
        }
    }

    #[test]
    fn batch_matches_single() {
        let images = vec![
            bitmap([5, 5], |x, y| x == y),
            bitmap([3, 4], |x, _| x == 0),
            Grid2::<u8>::new([0, 0]),
        ];
        let generator = DistanceFieldGenerator::default();
        let fields = generator.generate_batch(&images);
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0], generator.generate(&images[0]));
        assert_eq!(fields[1], generator.generate(&images[1]));
        assert!(matches!(fields[2], Err(Error::EmptyImage { .. })));
    }

    #[cfg(feature = "with_image")]
    #[test]
    fn generates_from_dynamic_images() {
        let gray = image::GrayImage::from_fn(5, 5, |x, y| {
            image::Luma([if x == 2 && y == 2 { INK } else { PAPER }])
        });
        let field = DistanceFieldGenerator::default()
            .generate_image(&image::DynamicImage::ImageLuma8(gray))
            .unwrap();
        assert_eq!(field.dimensions(), (5, 5));
        assert_eq!(field.get_pixel(2, 2).0, [125]);
        assert_eq!(field.get_pixel(2, 1).0, [131]);
    }
}
