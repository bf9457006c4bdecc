//! Block decomposition of the global interior.

use crate::error::GridError;

/// The block of global interior cells owned by one process.
///
/// Inactive axes always have `begin = 0` and `count = 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Partition {
    /// First owned global interior index per axis.
    pub begin: [usize; 3],
    /// Number of owned cells per axis.
    pub count: [usize; 3],
}

impl Partition {
    /// Own the whole domain.
    pub fn whole(resolution: [usize; 3]) -> Self {
        Self {
            begin: [0; 3],
            count: resolution.map(|n| n.max(1)),
        }
    }

    /// Block decomposition over a `ranks[0] × ranks[1] × ranks[2]` process
    /// grid; returns the block of process coordinate `rank`.
    ///
    /// Remainder cells go to the lowest ranks, so blocks differ by at most
    /// one cell per axis.
    pub fn block(
        resolution: [usize; 3],
        ranks: [usize; 3],
        rank: [usize; 3],
    ) -> Result<Self, GridError> {
        let mut begin = [0; 3];
        let mut count = [1; 3];
        for axis in 0..3 {
            let n = resolution[axis].max(1);
            let p = ranks[axis].max(1);
            let r = rank[axis];
            if p > n || r >= p {
                return Err(GridError::PartitionOutOfRange {
                    axis,
                    begin: r,
                    end: r + 1,
                    resolution: p.min(n),
                });
            }
            let base = n / p;
            let extra = n % p;
            begin[axis] = r * base + r.min(extra);
            count[axis] = base + usize::from(r < extra);
        }
        Ok(Self { begin, count })
    }

    /// One past the last owned index along `axis`.
    pub fn end(&self, axis: usize) -> usize {
        self.begin[axis] + self.count[axis]
    }
}
