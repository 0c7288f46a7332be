// core holds the noise sampler, height map and voxel column builders
pub mod batch;
pub mod column;
pub mod heightmap;
pub mod perlin2;
pub mod terrain;
pub mod utils;

pub use batch::{DrawPass, FaceSet, Material, RenderBatches, TerrainStats};
pub use column::{Voxel, VoxelKind, build_column, push_column};
pub use heightmap::{
    DEFAULT_HEIGHT_FACTOR, HeightGrid, HeightMapGenerator, HeightScale, TERRAIN_OCTAVES,
};
pub use perlin2::Perlin2D;
pub use terrain::{TerrainGenerator, TerrainParams};
pub use utils::flatten2;

// Coherent 2D noise that can drive a height map.
// Implementations must return values in [0, 1] for any finite input and
// must not mutate shared state while sampling.
pub trait NoiseGenerator {
    // Sum `octaves` layers of noise at (x, z)
    fn sample(&self, x: f64, z: f64, octaves: u32) -> f64;
}
