use image::{Rgb, RgbImage};
use palette::{Gradient, LinSrgb};
use std::path::Path;
use voxel_core::{HeightGrid, HeightScale, TerrainGenerator};

// Simple hillshade over integer column heights
// `z_scale` adjusts vertical exaggeration
fn hillshade(map: &HeightGrid, z_scale: f32) -> Vec<Vec<f32>> {
    let h = map.len();
    let w = map.first().map_or(0, |row| row.len());
    let mut shade = vec![vec![1.0; w]; h];
    let azimuth = std::f32::consts::PI / 4.0; // 45°
    let altitude = std::f32::consts::PI / 4.0; // 45°
    let (sin_alt, cos_alt) = altitude.sin_cos();
    let (lx, ly, lz) = (azimuth.cos() * cos_alt, azimuth.sin() * cos_alt, sin_alt);

    for y in 1..h.saturating_sub(1) {
        for x in 1..w.saturating_sub(1) {
            let dzdx = (map[y][x + 1] - map[y][x - 1]) as f32 / 2.0 * z_scale;
            let dzdy = (map[y + 1][x] - map[y - 1][x]) as f32 / 2.0 * z_scale;
            let (nx, ny, nz) = (-dzdx, -dzdy, 1.0);
            let len = (nx * nx + ny * ny + nz * nz).sqrt();
            shade[y][x] = ((nx * lx + ny * ly + nz * lz) / len).max(0.0);
        }
    }
    shade
}

fn main() {
    let width = 257;
    let scale = HeightScale::new(24.0);
    let grid = TerrainGenerator::new(scale).heights(width, 2025);
    let shade = hillshade(&grid, 0.5);

    let gradient = Gradient::with_domain(vec![
        (0.00, LinSrgb::new(0.35, 0.22, 0.12)), // dirt
        (0.40, LinSrgb::new(0.10, 0.60, 0.20)), // grass
        (0.75, LinSrgb::new(0.50, 0.40, 0.30)), // rock
        (1.00, LinSrgb::new(1.0, 1.0, 1.0)),    // snow
    ]);

    let side = grid.len() as u32;
    let top = scale.max_height().max(1) as f32;
    let mut img = RgbImage::new(side, side);
    for (z, row) in grid.iter().enumerate() {
        for (x, &h) in row.iter().enumerate() {
            let col = gradient.get(h as f32 / top).into_format::<u8>();
            let light = (shade[z][x] * 0.5 + 0.5).clamp(0.0, 1.0);
            let pixel = Rgb([
                (col.red as f32 * light) as u8,
                (col.green as f32 * light) as u8,
                (col.blue as f32 * light) as u8,
            ]);
            img.put_pixel(x as u32, z as u32, pixel);
        }
    }

    let path = Path::new("heightmap.png");
    match img.save(path) {
        Ok(()) => println!("Saved terrain height map to {:?}", path),
        Err(e) => eprintln!("Could not save {:?}: {}", path, e),
    }
}
