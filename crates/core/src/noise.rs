//! Seeded 2D simplex gradient noise.
//!
//! The permutation table is shuffled with values drawn from the owning
//! [`SeededRng`](crate::prng::SeededRng) stream, so the noise field is itself
//! a deterministic function of the seed. Building a table consumes exactly
//! [`PERMUTATION_DRAWS`] values from the stream.
//!
//! Kept in-crate rather than on the `noise` crate, whose generators only take
//! a `u32` seed and cannot be fed from the stream.

/// Stream values consumed by one permutation-table build.
pub const PERMUTATION_DRAWS: usize = 255;

/// Skew factor for 2D simplex: (sqrt(3) - 1) / 2.
const F2: f64 = 0.366_025_403_784_438_6;
/// Unskew factor for 2D simplex: (3 - sqrt(3)) / 6.
const G2: f64 = 0.211_324_865_405_187_1;

/// Gradient directions indexed by `perm % 12`.
const GRAD2: [[f64; 2]; 12] = [
    [1.0, 1.0],
    [-1.0, 1.0],
    [1.0, -1.0],
    [-1.0, -1.0],
    [1.0, 0.0],
    [-1.0, 0.0],
    [1.0, 0.0],
    [-1.0, 0.0],
    [0.0, 1.0],
    [0.0, -1.0],
    [0.0, 1.0],
    [0.0, -1.0],
];

/// Simplex noise over a 256-entry permutation table (doubled to 512 to skip
/// wrap-around masking on the second lookup).
#[derive(Debug, Clone)]
pub struct SimplexNoise {
    perm: [u8; 512],
}

impl SimplexNoise {
    /// Builds the permutation table with a partial Fisher–Yates pass.
    ///
    /// For `i` in `0..255`, swaps slot `i` with slot
    /// `i + floor(next() * (256 - i))`.
    pub fn new(mut next: impl FnMut() -> f64) -> Self {
        let mut table = [0u8; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = i as u8;
        }
        for i in 0..PERMUTATION_DRAWS {
            let r = i + (next() * (256 - i) as f64).floor() as usize;
            table.swap(i, r.min(255));
        }
        let mut perm = [0u8; 512];
        perm[..256].copy_from_slice(&table);
        perm[256..].copy_from_slice(&table);
        Self { perm }
    }

    fn corner(&self, gi: usize, x: f64, y: f64) -> f64 {
        let t = 0.5 - x * x - y * y;
        if t < 0.0 {
            return 0.0;
        }
        let g = GRAD2[usize::from(self.perm[gi]) % 12];
        let t2 = t * t;
        t2 * t2 * (g[0] * x + g[1] * y)
    }

    /// 2D simplex noise in roughly [-1, 1].
    pub fn noise2d(&self, x: f64, y: f64) -> f64 {
        let s = (x + y) * F2;
        let i = (x + s).floor();
        let j = (y + s).floor();
        let t = (i + j) * G2;
        let x0 = x - (i - t);
        let y0 = y - (j - t);

        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let ii = (i as i64 & 255) as usize;
        let jj = (j as i64 & 255) as usize;

        let p = |k: usize| usize::from(self.perm[k]);
        let n0 = self.corner(ii + p(jj), x0, y0);
        let n1 = self.corner(ii + i1 + p(jj + j1), x1, y1);
        let n2 = self.corner(ii + 1 + p(jj + 1), x2, y2);

        70.0 * (n0 + n1 + n2)
    }

    /// 3D noise, sampled as a drifting 2D slice.
    pub fn noise3d(&self, x: f64, y: f64, z: f64) -> f64 {
        self.noise2d(x + z * 0.1, y + z * 0.1)
    }

    /// 4D noise, sampled as a drifting 2D slice.
    pub fn noise4d(&self, x: f64, y: f64, z: f64, w: f64) -> f64 {
        let drift = z * 0.1 + w * 0.01;
        self.noise2d(x + drift, y + drift)
    }

    /// The first 256 permutation entries.
    pub fn permutation(&self) -> &[u8] {
        &self.perm[..256]
    }
}
