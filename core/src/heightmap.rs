use crate::NoiseGenerator;
use crate::terrain::TerrainParams;

// Octaves summed for every terrain height sample
pub const TERRAIN_OCTAVES: u32 = 8;

// Default multiplier from a [0, 1] noise value to voxel layers
pub const DEFAULT_HEIGHT_FACTOR: f64 = 10.0;

// Integer column heights, row-major: access as `grid[z][x]`
// with both indices offset from the start of the sampling region.
pub type HeightGrid = Vec<Vec<i32>>;

// Scale-and-truncate policy from noise to height.
// height = trunc(clamp(n, 0, 1) * factor), capped at floor(factor) layers.
// Terrain samples average 8 octaves and stay close to 0.5, so generated
// columns sit mid-range: factor 10 tops out around 6 with no flat columns,
// while a factor below 2 gives a mix of heights 0 and 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightScale {
    factor: f64,
}

impl HeightScale {
    // Negative or NaN factors flatten the terrain to ground level
    pub fn new(factor: f64) -> Self {
        let factor = if factor.is_finite() && factor > 0.0 {
            factor
        } else {
            0.0
        };
        Self { factor }
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    // Never decreases as `noise` grows
    #[inline]
    pub fn apply(&self, noise: f64) -> i32 {
        let n = if noise.is_nan() {
            0.0
        } else {
            noise.clamp(0.0, 1.0)
        };
        (n * self.factor) as i32
    }

    pub fn max_height(&self) -> i32 {
        self.apply(1.0)
    }
}

impl Default for HeightScale {
    fn default() -> Self {
        Self::new(DEFAULT_HEIGHT_FACTOR)
    }
}

// Maps grid cells to column heights using a borrowed noise sampler
pub struct HeightMapGenerator<'a, N: NoiseGenerator> {
    noise: &'a N,
    scale: HeightScale,
}

impl<'a, N: NoiseGenerator> HeightMapGenerator<'a, N> {
    pub fn new(noise: &'a N, scale: HeightScale) -> Self {
        Self { noise, scale }
    }

    pub fn scale(&self) -> HeightScale {
        self.scale
    }

    // Sample divisor for both axes. Larger regions read coarser noise so
    // features keep roughly the same size relative to the world.
    #[inline]
    pub fn frequency(width: i32) -> f64 {
        if width > 0 { width as f64 / 4.0 } else { 1.0 }
    }

    // Raw [0, 1] noise behind the height of cell (x, z)
    pub fn noise_at(&self, x: i32, z: i32, params: &TerrainParams) -> f64 {
        let f = Self::frequency(params.width);
        self.noise.sample(x as f64 / f, z as f64 / f, TERRAIN_OCTAVES)
    }

    pub fn height_at(&self, x: i32, z: i32, params: &TerrainParams) -> i32 {
        self.scale.apply(self.noise_at(x, z, params))
    }

    // Heights for the whole region in generation order (rows of z, columns of x)
    pub fn grid(&self, params: &TerrainParams) -> HeightGrid {
        params
            .cells()
            .map(|z| {
                params
                    .cells()
                    .map(|x| self.height_at(x, z, params))
                    .collect()
            })
            .collect()
    }
}
