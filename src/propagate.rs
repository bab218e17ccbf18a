//! The "8-points" two-sweep propagation of nearest-seed offsets.

use crate::Grid2;
use crate::Offset;
use glam::IVec2;

/// Neighbours already visited when scanning down and to the right.
const FORWARD: [IVec2; 4] = [
    IVec2::new(-1, 0),
    IVec2::new(0, -1),
    IVec2::new(-1, -1),
    IVec2::new(1, -1),
];

/// Neighbours already visited when scanning up and to the left.
const BACKWARD: [IVec2; 4] = [
    IVec2::new(1, 0),
    IVec2::new(0, 1),
    IVec2::new(1, 1),
    IVec2::new(-1, 1),
];

const LEFT: [IVec2; 1] = [IVec2::new(-1, 0)];
const RIGHT: [IVec2; 1] = [IVec2::new(1, 0)];

impl Grid2<Offset> {
    /// Relaxes every cell towards its nearest seed (a cell holding [`Offset::ZERO`]).
    ///
    /// Cells that no seed can reach keep an offset within one grid size of [`Offset::SENTINEL`].
    /// The result approximates the Euclidean distance transform; it is exact for a single seed.
    pub fn propagate(&mut self) {
        self.forward_sweep();
        self.backward_sweep();
    }

    fn forward_sweep(&mut self) {
        let [w, h] = self.size();
        for y in 0..h {
            for x in 0..w {
                self.relax(x, y, &FORWARD);
            }
            for x in (0..w).rev() {
                self.relax(x, y, &RIGHT);
            }
        }
        log::trace!("forward sweep done ({}x{})", w, h);
    }

    fn backward_sweep(&mut self) {
        let [w, h] = self.size();
        for y in (0..h).rev() {
            for x in (0..w).rev() {
                self.relax(x, y, &BACKWARD);
            }
            for x in 0..w {
                self.relax(x, y, &LEFT);
            }
        }
        log::trace!("backward sweep done ({}x{})", w, h);
    }

    /// Keeps the shortest of the cell's offset and the candidates through `steps`, in order.
    /// Ties keep the earlier value.
    #[inline]
    fn relax(&mut self, x: usize, y: usize, steps: &[IVec2]) {
        let best = steps.iter().fold(self[[x, y]], |best, &step| {
            let candidate = self.candidate(x, y, step);
            if candidate.length_squared() < best.length_squared() {
                candidate
            } else {
                best
            }
        });
        self[[x, y]] = best;
    }

    /// The neighbour's binding as seen from `(x, y)`.
    ///
    /// Outside the grid this is the sentinel, which never beats a cell's own offset.
    #[inline]
    fn candidate(&self, x: usize, y: usize, step: IVec2) -> Offset {
        let nx = x as i64 + i64::from(step.x);
        let ny = y as i64 + i64::from(step.y);
        match self.get(nx, ny) {
            Some(neighbour) => neighbour.stepped(step),
            None => Offset::SENTINEL,
        }
    }
}
