use palette::{Gradient, LinSrgb};

use crate::column::Voxel;
use crate::heightmap::HeightGrid;
use crate::terrain::TerrainParams;

// flatten a 2D grid (row‐major) into a single Vec
// For converting to an image buffer in the viewer
pub fn flatten2<T: Copy>(map: &[Vec<T>]) -> Vec<T> {
    map.iter().flat_map(|row| row.iter().copied()).collect()
}

// Rebuild the column heights from a generated voxel list.
// Only the renderer-facing output is needed: the tallest y seen in each cell.
pub fn surface_grid(voxels: &[Voxel], params: &TerrainParams) -> HeightGrid {
    let side = params.side();
    let start = params.cells().start;
    let mut grid = vec![vec![0; side]; side];
    for v in voxels {
        let xi = (v.x - start) as usize;
        let zi = (v.z - start) as usize;
        if let Some(cell) = grid.get_mut(zi).and_then(|row| row.get_mut(xi)) {
            *cell = (*cell).max(v.y);
        }
    }
    grid
}

// Bare ground to grass to rock to snow
fn surface_gradient() -> Gradient<LinSrgb> {
    Gradient::with_domain(vec![
        (0.00, LinSrgb::new(0.35, 0.22, 0.12)), // dirt
        (0.25, LinSrgb::new(0.20, 0.45, 0.12)), // low grass
        (0.60, LinSrgb::new(0.10, 0.65, 0.20)), // grass
        (0.85, LinSrgb::new(0.50, 0.45, 0.40)), // rock
        (1.00, LinSrgb::new(1.00, 1.00, 1.00)), // snow
    ])
}

// Convert flat column heights into an RGB byte buffer.
// `max_height` is the height that maps to the top of the gradient.
pub fn to_terrain_image(flat: &[i32], max_height: i32) -> Vec<u8> {
    let gradient = surface_gradient();
    let top = max_height.max(1) as f32;
    let mut buf = Vec::with_capacity(flat.len() * 3);
    for &h in flat {
        let t = (h as f32 / top).clamp(0.0, 1.0);
        let rgb = gradient.get(t).into_format::<u8>();
        buf.extend_from_slice(&[rgb.red, rgb.green, rgb.blue]);
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::{flatten2, surface_grid, to_terrain_image};
    use crate::{TerrainGenerator, TerrainParams};

    #[test]
    fn flatten_is_row_major() {
        let grid = vec![vec![1, 2], vec![3, 4]];
        assert_eq!(flatten2(&grid), vec![1, 2, 3, 4]);
    }

    #[test]
    fn surface_matches_height_map() {
        let terrain = TerrainGenerator::default();
        let params = TerrainParams::new(12, 3);
        let voxels = terrain.generate(params.width, params.seed);
        assert_eq!(surface_grid(&voxels, &params), terrain.heights(12, 3));
    }

    #[test]
    fn surface_of_empty_terrain() {
        let grid = surface_grid(&[], &TerrainParams::new(0, 0));
        assert!(grid.is_empty());
    }

    #[test]
    fn image_has_three_bytes_per_column() {
        let img = to_terrain_image(&[0, 3, 10, 12], 10);
        assert_eq!(img.len(), 12);
        // above the top clamps to snow
        assert_eq!(img[6..9], img[9..12]);
    }
}
