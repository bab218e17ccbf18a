pub type Index2 = [usize; 2];

/// Stores values on a 2D lattice on the coordinates \[0,0\] - \[w-1, h-1\], row by row.
pub struct Grid2<T = u8> {
    size: Index2,
    data: Vec<T>,
}

impl<T> Grid2<T> {
    /// Wraps row-major `data`. Returns `None` if the length doesn't match `size`.
    pub fn from_vec(size: Index2, data: Vec<T>) -> Option<Self> {
        (data.len() == size[0] * size[1]).then_some(Self { size, data })
    }

    /// flat data
    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn size(&self) -> Index2 {
        self.size
    }

    pub fn width(&self) -> usize {
        self.size[0]
    }

    pub fn height(&self) -> usize {
        self.size[1]
    }

    /// Bounds-checked lookup with signed coordinates.
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> Option<&T> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.size[0])?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.size[1])?;
        self.data.get(y * self.size[0] + x)
    }
}

impl<T> std::ops::Index<Index2> for Grid2<T> {
    type Output = T;

    #[inline]
    fn index(&self, p: Index2) -> &Self::Output {
        debug_assert!(p[0] < self.size[0]);
        debug_assert!(p[1] < self.size[1]);
        &self.data[p[0] + self.size[0] * p[1]]
    }
}

impl<T> std::ops::IndexMut<Index2> for Grid2<T> {
    #[inline]
    fn index_mut(&mut self, p: Index2) -> &mut Self::Output {
        debug_assert!(p[0] < self.size[0]);
        debug_assert!(p[1] < self.size[1]);
        &mut self.data[p[0] + self.size[0] * p[1]]
    }
}

impl<T: std::cmp::PartialEq> std::cmp::PartialEq for Grid2<T> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.data == other.data
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Grid2<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid2")
            .field("size", &self.size)
            .field("data", &self.data)
            .finish()
    }
}

impl<T: Clone> Clone for Grid2<T> {
    fn clone(&self) -> Self {
        Self {
            size: self.size,
            data: self.data.clone(),
        }
    }
}

impl<T: Copy + Default> Grid2<T> {
    pub fn new(size: Index2) -> Self {
        Self {
            size,
            data: vec![T::default(); size[0] * size[1]],
        }
    }

    /// Set the grid values using the given function.
    pub fn set(&mut self, mut f: impl FnMut(Index2) -> T) {
        let mut index = 0;
        for y in 0..self.size[1] {
            for x in 0..self.size[0] {
                self.data[index] = f([x, y]);
                index += 1;
            }
        }
    }

    /// Creates a grid and fills it using the given function.
    pub fn from_fn(size: Index2, f: impl FnMut(Index2) -> T) -> Self {
        let mut grid = Self::new(size);
        grid.set(f);
        grid
    }
}

#[cfg(feature = "with_image")]
impl Grid2<u8> {
    /// Copies the grid into an 8-bit grayscale image of the same size.
    pub fn to_gray_image(&self) -> image::GrayImage {
        image::GrayImage::from_fn(self.size[0] as u32, self.size[1] as u32, |x, y| {
            image::Luma([self[[x as usize, y as usize]]])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_major_layout() {
        let grid = Grid2::<usize>::from_fn([3, 2], |[x, y]| 10 * y + x);
        assert_eq!(grid.data(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(grid[[2, 1]], 12);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
    }

    #[test]
    fn signed_lookup_is_bounds_checked() {
        let grid = Grid2::<u8>::from_fn([2, 2], |[x, y]| (x + 2 * y) as u8);
        assert_eq!(grid.get(1, 1), Some(&3));
        assert_eq!(grid.get(-1, 0), None);
        assert_eq!(grid.get(0, -1), None);
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.get(0, 2), None);
    }

    #[test]
    fn from_vec_checks_length() {
        assert!(Grid2::from_vec([2, 2], vec![0_u8; 4]).is_some());
        assert!(Grid2::from_vec([2, 2], vec![0_u8; 3]).is_none());
    }

    #[cfg(feature = "with_image")]
    #[test]
    fn gray_image_conversion() {
        let grid = Grid2::<u8>::from_fn([3, 2], |[x, y]| (x + 3 * y) as u8);
        let image = grid.to_gray_image();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.as_raw(), grid.data());
    }
}
