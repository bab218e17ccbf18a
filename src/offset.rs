use glam::IVec2;

/// Displacement from a grid cell to the nearest seed pixel found so far.
///
/// Distances are compared by squared length so propagation never takes a
/// square root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "with_serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offset(pub IVec2);

impl Offset {
    /// A cell that is its own seed.
    pub const ZERO: Self = Self(IVec2::ZERO);

    /// No seed reached yet. Stands in for an infinite distance.
    pub const SENTINEL: Self = Self(IVec2::splat(9999));

    #[inline]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self(IVec2::new(dx, dy))
    }

    #[inline]
    pub fn dx(self) -> i32 {
        self.0.x
    }

    #[inline]
    pub fn dy(self) -> i32 {
        self.0.y
    }

    /// `dx² + dy²`
    ///
    /// Stored offsets only ever shrink from [`Self::SENTINEL`], so this can't overflow
    /// whatever the image size.
    #[inline]
    pub fn length_squared(self) -> i32 {
        self.0.length_squared()
    }

    /// The offset seen from a cell displaced by `step` from the cell owning `self`.
    #[inline]
    #[must_use]
    pub fn stepped(self, step: IVec2) -> Self {
        Self(self.0 + step)
    }
}

impl Default for Offset {
    fn default() -> Self {
        Self::SENTINEL
    }
}
