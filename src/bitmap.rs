use crate::Grid2;
use crate::Index2;

/// Read access to the intensity of a source image.
///
/// Intensities are on a 16-bit scale; 8-bit sources are widened so that
/// `0xff` maps to `0xffff`.
pub trait Bitmap {
    /// `[width, height]` in pixels.
    fn size(&self) -> Index2;

    /// Red (or gray) channel at the given pixel, premultiplied by alpha if the source has one.
    fn red16(&self, x: usize, y: usize) -> u16;
}

#[inline]
pub(crate) fn widen(v: u8) -> u16 {
    u16::from(v) * 0x101
}

#[inline]
pub(crate) fn premultiply(value: u16, alpha: u16) -> u16 {
    // Can't exceed 0xffff since alpha <= 0xffff.
    (u32::from(value) * u32::from(alpha) / 0xffff) as u16
}

impl Bitmap for Grid2<u8> {
    fn size(&self) -> Index2 {
        Self::size(self)
    }

    fn red16(&self, x: usize, y: usize) -> u16 {
        widen(self[[x, y]])
    }
}

impl Bitmap for Grid2<u16> {
    fn size(&self) -> Index2 {
        Self::size(self)
    }

    fn red16(&self, x: usize, y: usize) -> u16 {
        self[[x, y]]
    }
}

#[cfg(feature = "with_image")]
mod image_impls {
    use super::premultiply;
    use super::widen;
    use super::Bitmap;
    use crate::Index2;
    use image::DynamicImage;
    use image::GenericImageView;
    use image::ImageBuffer;
    use image::Luma;
    use image::LumaA;
    use image::Pixel;
    use image::Rgb;
    use image::Rgba;
    use std::ops::Deref;

    /// Pixel formats whose red channel can be read on a 16-bit scale.
    pub trait RedChannel: Pixel {
        fn red16(&self) -> u16;
    }

    impl RedChannel for Luma<u8> {
        fn red16(&self) -> u16 {
            widen(self.0[0])
        }
    }

    impl RedChannel for Luma<u16> {
        fn red16(&self) -> u16 {
            self.0[0]
        }
    }

    impl RedChannel for LumaA<u8> {
        fn red16(&self) -> u16 {
            premultiply(widen(self.0[0]), widen(self.0[1]))
        }
    }

    impl RedChannel for LumaA<u16> {
        fn red16(&self) -> u16 {
            premultiply(self.0[0], self.0[1])
        }
    }

    impl RedChannel for Rgb<u8> {
        fn red16(&self) -> u16 {
            widen(self.0[0])
        }
    }

    impl RedChannel for Rgb<u16> {
        fn red16(&self) -> u16 {
            self.0[0]
        }
    }

    impl RedChannel for Rgba<u8> {
        fn red16(&self) -> u16 {
            premultiply(widen(self.0[0]), widen(self.0[3]))
        }
    }

    impl RedChannel for Rgba<u16> {
        fn red16(&self) -> u16 {
            premultiply(self.0[0], self.0[3])
        }
    }

    impl<P, C> Bitmap for ImageBuffer<P, C>
    where
        P: RedChannel,
        C: Deref<Target = [P::Subpixel]>,
    {
        fn size(&self) -> Index2 {
            [self.width() as usize, self.height() as usize]
        }

        fn red16(&self, x: usize, y: usize) -> u16 {
            self.get_pixel(x as u32, y as u32).red16()
        }
    }

    impl Bitmap for DynamicImage {
        fn size(&self) -> Index2 {
            [self.width() as usize, self.height() as usize]
        }

        #[allow(clippy::wildcard_enum_match_arm)] // `DynamicImage` is non-exhaustive
        fn red16(&self, x: usize, y: usize) -> u16 {
            match self {
                Self::ImageLuma8(b) => b.red16(x, y),
                Self::ImageLumaA8(b) => b.red16(x, y),
                Self::ImageRgb8(b) => b.red16(x, y),
                Self::ImageRgba8(b) => b.red16(x, y),
                Self::ImageLuma16(b) => b.red16(x, y),
                Self::ImageLumaA16(b) => b.red16(x, y),
                Self::ImageRgb16(b) => b.red16(x, y),
                Self::ImageRgba16(b) => b.red16(x, y),
                // float formats
                _ => self.get_pixel(x as u32, y as u32).red16(),
            }
        }
    }

}

#[cfg(feature = "with_image")]
pub use image_impls::RedChannel;
