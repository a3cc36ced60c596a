use rand::Rng;
use rand_xoshiro::Xoshiro256StarStar;

/// Square L×L spin lattice with periodic boundary conditions.
///
/// Spins are stored flat in row-major order (`i * length + j`) and hold
/// exactly +1 or −1. Indices wrap modulo `length` in both dimensions, so
/// every site has four well-defined neighbors on the torus.
pub struct Lattice {
    length: usize,
    spins: Vec<i8>,
}

impl Lattice {
    /// Initialize an L×L lattice with each cell sampled independently:
    /// +1 if a uniform draw is ≤ `up_probability`, −1 otherwise.
    ///
    /// Cells are drawn in row-major order, one draw per cell, so a given
    /// seed always produces the same configuration.
    pub fn random(length: usize, up_probability: f64, rng: &mut Xoshiro256StarStar) -> Self {
        let spins = (0..length * length)
            .map(|_| {
                if rng.gen::<f64>() <= up_probability {
                    1
                } else {
                    -1
                }
            })
            .collect();
        Self { length, spins }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Total number of sites (L²).
    pub fn n_sites(&self) -> usize {
        self.spins.len()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> i8 {
        self.spins[row * self.length + col]
    }

    /// Flip the spin at (row, col) in place.
    #[inline]
    pub fn flip(&mut self, row: usize, col: usize) {
        self.spins[row * self.length + col] *= -1;
    }

    /// Sum of the four periodic neighbors of (row, col), in the order
    /// up, right, down, left. This ordering fixes the local field used in
    /// the energy-change arithmetic.
    #[inline]
    pub fn neighbor_sum(&self, row: usize, col: usize) -> i8 {
        let l = self.length;
        let up = (row + l - 1) % l;
        let right = (col + 1) % l;
        let down = (row + 1) % l;
        let left = (col + l - 1) % l;
        self.get(up, col) + self.get(row, right) + self.get(down, col) + self.get(row, left)
    }

    /// Mean spin over the lattice, in [−1, 1].
    pub fn magnetization(&self) -> f64 {
        let sum: i64 = self.spins.iter().map(|&s| s as i64).sum();
        sum as f64 / self.n_sites() as f64
    }

    /// Iterate over the lattice rows as spin slices.
    pub fn rows(&self) -> impl Iterator<Item = &[i8]> {
        self.spins.chunks(self.length)
    }
}
