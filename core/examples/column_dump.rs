use voxel_core::{RenderBatches, TerrainGenerator, TerrainStats, VoxelKind};

fn main() {
    // Small seeded terrain, printed as a height table
    let terrain = TerrainGenerator::default();
    let (width, seed) = (16, 2025);
    let heights = terrain.heights(width, seed);
    for row in &heights {
        for h in row {
            print!("{:>3}", h);
        }
        println!();
    }

    let voxels = terrain.generate(width, seed);
    let stats = TerrainStats::from_voxels(&voxels);
    let batches = RenderBatches::from_voxels(&voxels);
    println!(
        "{} columns, {} voxels, {} capped, max height {}, {} draw calls",
        stats.columns,
        stats.voxels,
        stats.capped,
        stats.max_height,
        batches.draw_calls()
    );

    // The first column in generation order
    for v in voxels.iter().take_while(|v| (v.x, v.z) == (voxels[0].x, voxels[0].z)) {
        let tag = match v.kind {
            VoxelKind::Base => "base",
            VoxelKind::Capped => "capped",
        };
        println!("({:>3}, {:>2}, {:>3}) {}", v.x, v.y, v.z, tag);
    }
}
