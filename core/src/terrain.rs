use std::ops::Range;

use rayon::prelude::*;

use crate::NoiseGenerator;
use crate::column::{Voxel, push_column};
use crate::heightmap::{HeightGrid, HeightMapGenerator, HeightScale};
use crate::perlin2::Perlin2D;

// Width and seed of one terrain generation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TerrainParams {
    pub width: i32,
    // 0 keeps the unseeded noise state
    pub seed: i64,
}

impl TerrainParams {
    pub fn new(width: i32, seed: i64) -> Self {
        Self { width, seed }
    }

    // Integer cells c with -width/2 <= c < width/2, the same range on both
    // axes. Odd widths still give `width` cells; width <= 0 gives none.
    pub fn cells(&self) -> Range<i32> {
        -(self.width / 2)..(self.width / 2 + self.width % 2)
    }

    // Cells along one side of the region
    pub fn side(&self) -> usize {
        self.width.max(0) as usize
    }

    pub fn column_count(&self) -> usize {
        self.side() * self.side()
    }

    // Seed bits handed to the noise sampler
    pub fn noise_seed(&self) -> u64 {
        self.seed as u64
    }
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            width: 100,
            seed: 0,
        }
    }
}

// Walks the sampling region and expands every column into voxels
#[derive(Clone, Copy, Debug, Default)]
pub struct TerrainGenerator {
    scale: HeightScale,
}

impl TerrainGenerator {
    pub fn new(scale: HeightScale) -> Self {
        Self { scale }
    }

    pub fn scale(&self) -> HeightScale {
        self.scale
    }

    // Fresh sampler for one generation, reseeded up front when seed != 0
    pub fn sampler(params: &TerrainParams) -> Perlin2D {
        Perlin2D::seeded(params.noise_seed())
    }

    // Voxels for the region: rows of z outer, x inner, each column ascending
    // in y. Identical inputs give identical output.
    pub fn generate(&self, width: i32, seed: i64) -> Vec<Voxel> {
        let params = TerrainParams::new(width, seed);
        let noise = Self::sampler(&params);
        self.generate_with(&noise, &params)
    }

    pub fn generate_with<N: NoiseGenerator>(
        &self,
        noise: &N,
        params: &TerrainParams,
    ) -> Vec<Voxel> {
        let heights = HeightMapGenerator::new(noise, self.scale);
        let mut out = Vec::with_capacity(params.column_count());
        for z in params.cells() {
            for x in params.cells() {
                let height = heights.height_at(x, z, params);
                push_column(&mut out, x, z, height);
            }
        }
        tracing::debug!(
            width = params.width,
            seed = params.seed,
            voxels = out.len(),
            "generated terrain"
        );
        out
    }

    // Same output as `generate`, with rows of z spread over the rayon pool
    pub fn generate_parallel(&self, width: i32, seed: i64) -> Vec<Voxel> {
        let params = TerrainParams::new(width, seed);
        let noise = Self::sampler(&params);
        self.generate_parallel_with(&noise, &params)
    }

    // The sampler is only read from here on
    pub fn generate_parallel_with<N: NoiseGenerator + Sync>(
        &self,
        noise: &N,
        params: &TerrainParams,
    ) -> Vec<Voxel> {
        let heights = HeightMapGenerator::new(noise, self.scale);
        let rows: Vec<Vec<Voxel>> = params
            .cells()
            .into_par_iter()
            .map(|z| {
                let mut row = Vec::with_capacity(params.side());
                for x in params.cells() {
                    push_column(&mut row, x, z, heights.height_at(x, z, params));
                }
                row
            })
            .collect();
        let out = rows.concat();
        tracing::debug!(
            width = params.width,
            seed = params.seed,
            voxels = out.len(),
            rows = rows.len(),
            "generated terrain in parallel"
        );
        out
    }

    // Column heights only, in generation order
    pub fn heights(&self, width: i32, seed: i64) -> HeightGrid {
        let params = TerrainParams::new(width, seed);
        let noise = Self::sampler(&params);
        HeightMapGenerator::new(&noise, self.scale).grid(&params)
    }
}
