use criterion::{Criterion, criterion_group, criterion_main};
use voxel_core::{
    HeightMapGenerator, HeightScale, Perlin2D, RenderBatches, TERRAIN_OCTAVES, TerrainGenerator,
    TerrainParams,
};

const WIDTH: i32 = 256;
const SEED: i64 = 2025;

fn bench_noise_sample(c: &mut Criterion) {
    let noise = Perlin2D::seeded(SEED as u64);
    c.bench_function("Perlin2D sample (8 octaves) x 4096", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for i in 0..4096 {
                let t = i as f64 * 0.013;
                acc += noise.sample(t, -t * 0.7, TERRAIN_OCTAVES);
            }
            acc
        })
    });
}

fn bench_height_grid(c: &mut Criterion) {
    let params = TerrainParams::new(WIDTH, SEED);
    let noise = TerrainGenerator::sampler(&params);
    c.bench_function("height grid 256x256", |b| {
        b.iter(|| HeightMapGenerator::new(&noise, HeightScale::default()).grid(&params))
    });
}

fn bench_generate(c: &mut Criterion) {
    let terrain = TerrainGenerator::default();
    c.bench_function("generate 256x256", |b| {
        b.iter(|| terrain.generate(WIDTH, SEED))
    });
}

fn bench_generate_parallel(c: &mut Criterion) {
    let terrain = TerrainGenerator::default();
    c.bench_function("generate_parallel 256x256", |b| {
        b.iter(|| terrain.generate_parallel(WIDTH, SEED))
    });
}

fn bench_generate_and_batch(c: &mut Criterion) {
    let terrain = TerrainGenerator::new(HeightScale::new(32.0));
    c.bench_function("generate + render batches 256x256 (scale 32)", |b| {
        b.iter(|| {
            let voxels = terrain.generate(WIDTH, SEED);
            RenderBatches::from_voxels(&voxels)
        })
    });
}

criterion_group!(
    terrain_benchmarks,
    bench_noise_sample,
    bench_height_grid,
    bench_generate,
    bench_generate_parallel,
    bench_generate_and_batch
);
criterion_main!(terrain_benchmarks);
