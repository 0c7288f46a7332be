mod error;
mod preview;

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;
use eframe::{App, Frame, NativeOptions, egui, run_native};
use egui::{ColorImage, TextureHandle};
use tracing::{error, info, warn};
use voxel_core::{
    DEFAULT_HEIGHT_FACTOR, HeightScale, RenderBatches, TerrainGenerator, TerrainParams,
    TerrainStats, Voxel,
    utils::{flatten2, surface_grid, to_terrain_image},
};

use crate::error::AppError;
use crate::preview::{ViewContext, VoxelMesh};

/// Voxel terrain generator and viewer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Side length of the square region, centred on the origin
    #[arg(default_value_t = 100, allow_negative_numbers = true)]
    width: i32,

    /// Noise seed; 0 keeps the unseeded noise
    #[arg(default_value_t = 0, allow_negative_numbers = true)]
    seed: i64,

    /// Voxel layers for a noise value of 1.0
    #[arg(long, default_value_t = DEFAULT_HEIGHT_FACTOR)]
    height_scale: f64,

    /// Write the top-down preview to this PNG and exit without a window
    #[arg(long)]
    export: Option<PathBuf>,

    /// Spread generation over all cores
    #[arg(long, default_value_t = false)]
    parallel: bool,
}

// One generated terrain and what the viewer derives from it
struct Terrain {
    params: TerrainParams,
    voxels: Vec<Voxel>,
    stats: TerrainStats,
    millis: f32,
}

impl Terrain {
    fn generate(params: TerrainParams, scale: HeightScale, parallel: bool) -> Self {
        let start = Instant::now();
        let generator = TerrainGenerator::new(scale);
        let voxels = if parallel {
            generator.generate_parallel(params.width, params.seed)
        } else {
            generator.generate(params.width, params.seed)
        };
        let millis = start.elapsed().as_secs_f32() * 1000.0;
        let stats = TerrainStats::from_voxels(&voxels);
        info!(
            width = params.width,
            seed = params.seed,
            columns = stats.columns,
            voxels = stats.voxels,
            capped = stats.capped,
            max_height = stats.max_height,
            millis,
            "terrain ready"
        );
        Self {
            params,
            voxels,
            stats,
            millis,
        }
    }

    // Top-down RGB preview, one pixel per column
    fn preview_rgb(&self, scale: HeightScale) -> Vec<u8> {
        let grid = surface_grid(&self.voxels, &self.params);
        to_terrain_image(&flatten2(&grid), scale.max_height())
    }
}

fn save_png(path: &Path, rgb: &[u8], side: usize) -> Result<(), AppError> {
    image::save_buffer(
        path,
        rgb,
        side as u32,
        side as u32,
        image::ColorType::Rgb8,
    )
    .map_err(|source| AppError::SaveImage {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "saved preview");
    Ok(())
}

fn export(terrain: &Terrain, scale: HeightScale, path: &Path) -> Result<(), AppError> {
    if terrain.stats.columns == 0 {
        return Err(AppError::EmptyTerrain {
            width: terrain.params.width,
        });
    }
    save_png(path, &terrain.preview_rgb(scale), terrain.params.side())
}

// Largest region the viewer generates; the headless export is unbounded
const VIEWER_MAX_WIDTH: i32 = 512;
// Voxel preview is skipped above this many voxels
const MESH_VOXEL_LIMIT: usize = 400_000;

fn viewer_width(width: i32) -> i32 {
    width.clamp(-VIEWER_MAX_WIDTH, VIEWER_MAX_WIDTH)
}

fn texture_fits(side: usize, max_texture_side: usize) -> bool {
    side > 0 && side <= max_texture_side
}

fn mesh_allowed(voxels: usize) -> bool {
    voxels <= MESH_VOXEL_LIMIT
}

#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
enum ViewMode {
    #[default]
    HeightMap,
    Voxels,
}

struct TerrainApp {
    // parameters
    width: i32,
    seed: i64,
    height_scale: f64,
    parallel: bool,

    view_mode: ViewMode,
    view: ViewContext,

    // last generation
    terrain: Option<Terrain>,
    terrain_texture: Option<TextureHandle>,
    last_rgb: Option<Vec<u8>>,
    voxel_mesh: Option<VoxelMesh>,

    status_message: String,
}

impl TerrainApp {
    fn new(args: &Args) -> Self {
        let width = viewer_width(args.width);
        if width != args.width {
            warn!(requested = args.width, width, "width clamped for the viewer");
        }
        Self {
            width,
            seed: args.seed,
            height_scale: args.height_scale,
            parallel: args.parallel,
            view_mode: ViewMode::default(),
            view: ViewContext::default(),
            terrain: None,
            terrain_texture: None,
            last_rgb: None,
            voxel_mesh: None,
            status_message: String::new(),
        }
    }

    fn scale(&self) -> HeightScale {
        HeightScale::new(self.height_scale)
    }

    fn regenerate(&mut self, ctx: &egui::Context) {
        self.width = viewer_width(self.width);
        let params = TerrainParams::new(self.width, self.seed);
        let terrain = Terrain::generate(params, self.scale(), self.parallel);

        let side = params.side();
        let max_side = ctx.input(|i| i.max_texture_side);
        self.terrain_texture = None;
        self.last_rgb = None;
        if side > 0 {
            let rgb = terrain.preview_rgb(self.scale());
            if texture_fits(side, max_side) {
                let color_image = ColorImage::from_rgb([side, side], &rgb);
                self.terrain_texture =
                    Some(ctx.load_texture("terrain", color_image, egui::TextureOptions::NEAREST));
            } else {
                warn!(side, max_side, "height map larger than the GPU texture limit");
            }
            self.last_rgb = Some(rgb);
        }
        // built on demand when the voxel view is shown
        self.voxel_mesh = None;
        self.view.reset();
        self.status_message = format!(
            "Generated {} voxels in {:.2} ms (seed {})",
            terrain.stats.voxels, terrain.millis, self.seed
        );
        self.terrain = Some(terrain);
        ctx.request_repaint();
    }

    fn ensure_mesh(&mut self) {
        if self.voxel_mesh.is_some() {
            return;
        }
        if let Some(terrain) = &self.terrain {
            if mesh_allowed(terrain.voxels.len()) {
                self.voxel_mesh = Some(VoxelMesh::build(&RenderBatches::from_voxels(
                    &terrain.voxels,
                )));
            }
        }
    }

    fn save_dialog(&mut self) {
        let (Some(terrain), Some(rgb)) = (&self.terrain, &self.last_rgb) else {
            self.status_message = "Generate a terrain first".into();
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG image", &["png"])
            .set_file_name(format!(
                "terrain_{}_{}.png",
                terrain.params.width, terrain.params.seed
            ))
            .save_file()
        else {
            return;
        };
        self.status_message = match save_png(&path, rgb, terrain.params.side()) {
            Ok(()) => format!("Saved {}", path.display()),
            Err(e) => {
                error!("{e}");
                e.to_string()
            }
        };
    }
}

impl App for TerrainApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::SidePanel::left("controls").show(ctx, |ui| {
            ui.heading("Voxel Terrain");
            ui.separator();

            ui.label("Width");
            ui.add(
                egui::DragValue::new(&mut self.width)
                    .speed(1.0)
                    .range(-VIEWER_MAX_WIDTH..=VIEWER_MAX_WIDTH),
            );

            ui.label("Seed");
            ui.add(egui::DragValue::new(&mut self.seed).speed(1.0));

            ui.label("Height scale");
            ui.add(
                egui::Slider::new(&mut self.height_scale, 1.0..=64.0)
                    .clamping(egui::SliderClamping::Never),
            );

            ui.checkbox(&mut self.parallel, "Parallel generation");

            ui.separator();

            if ui.button("Generate Terrain").clicked() {
                self.regenerate(ctx);
            }

            if ui.button("Save PNG…").clicked() {
                self.save_dialog();
            }

            ui.separator();
            ui.label("View");
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.view_mode, ViewMode::HeightMap, "Height map");
                ui.selectable_value(&mut self.view_mode, ViewMode::Voxels, "Voxels");
            });

            if let Some(terrain) = &self.terrain {
                let s = &terrain.stats;
                ui.separator();
                ui.label(format!("Columns: {}", s.columns));
                ui.label(format!("Voxels: {}", s.voxels));
                ui.label(format!("Capped: {}", s.capped));
                ui.label(format!("Flat columns: {}", s.flat_columns()));
                ui.label(format!("Max height: {}", s.max_height));
            }

            ui.separator();
            ui.label(&self.status_message);
        });

        if self.view_mode == ViewMode::Voxels {
            self.ensure_mesh();
        }

        // central display
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.terrain.is_none() {
                ui.centered_and_justified(|ui| {
                    ui.label("Click “Generate Terrain” to start");
                });
                return;
            }
            match self.view_mode {
                ViewMode::HeightMap => match &self.terrain_texture {
                    Some(tex) => {
                        let available = ui.available_size();
                        let side = available.x.min(available.y);
                        ui.image((tex.id(), egui::vec2(side, side)));
                    }
                    None if self.last_rgb.is_some() => {
                        ui.label("Height map too large to display; use Save PNG…");
                    }
                    None => {
                        ui.label("Empty terrain");
                    }
                },
                ViewMode::Voxels => match &self.voxel_mesh {
                    Some(mesh) => mesh.show(ui, &mut self.view),
                    None => {
                        ui.label(format!(
                            "Too many voxels to preview (limit {})",
                            MESH_VOXEL_LIMIT
                        ));
                    }
                },
            }
        });
    }
}

fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if let Some(path) = &args.export {
        let scale = HeightScale::new(args.height_scale);
        let terrain = Terrain::generate(
            TerrainParams::new(args.width, args.seed),
            scale,
            args.parallel,
        );
        return export(&terrain, scale, path);
    }

    info!(width = args.width, seed = args.seed, "starting viewer");
    let mut app = TerrainApp::new(&args);
    let opts = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };
    run_native(
        "Voxel Terrain",
        opts,
        Box::new(move |cc| {
            app.regenerate(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        Args, MESH_VOXEL_LIMIT, Terrain, TerrainApp, VIEWER_MAX_WIDTH, export, mesh_allowed,
        texture_fits, viewer_width,
    };
    use crate::error::AppError;
    use clap::Parser;
    use voxel_core::{HeightScale, TerrainParams};

    #[test]
    fn args_default_to_width_100_seed_0() {
        let args = Args::parse_from(["app"]);
        assert_eq!(args.width, 100);
        assert_eq!(args.seed, 0);
        assert!(args.export.is_none());
    }

    #[test]
    fn args_accept_negative_numbers() {
        let args = Args::parse_from(["app", "-4", "-17"]);
        assert_eq!(args.width, -4);
        assert_eq!(args.seed, -17);
    }

    #[test]
    fn args_reject_non_integers() {
        assert!(Args::try_parse_from(["app", "wide"]).is_err());
    }

    #[test]
    fn preview_has_one_pixel_per_column() {
        let scale = HeightScale::default();
        let terrain = Terrain::generate(TerrainParams::new(7, 2), scale, false);
        assert_eq!(terrain.preview_rgb(scale).len(), 7 * 7 * 3);
    }

    #[test]
    fn exporting_empty_terrain_fails() {
        let scale = HeightScale::default();
        let terrain = Terrain::generate(TerrainParams::new(0, 1), scale, false);
        let err = export(&terrain, scale, std::path::Path::new("unused.png")).unwrap_err();
        assert!(matches!(err, AppError::EmptyTerrain { width: 0 }));
    }

    #[test]
    fn viewer_width_is_bounded() {
        assert_eq!(viewer_width(100), 100);
        assert_eq!(viewer_width(-7), -7);
        assert_eq!(viewer_width(20_000), VIEWER_MAX_WIDTH);
        assert_eq!(viewer_width(i32::MIN), -VIEWER_MAX_WIDTH);
    }

    #[test]
    fn cli_width_is_clamped_before_first_generation() {
        let app = TerrainApp::new(&Args::parse_from(["app", "20000"]));
        assert_eq!(app.width, VIEWER_MAX_WIDTH);
    }

    #[test]
    fn cli_height_scale_is_kept_outside_slider_range() {
        let app = TerrainApp::new(&Args::parse_from(["app", "--height-scale", "100"]));
        assert_eq!(app.height_scale, 100.0);
        let app = TerrainApp::new(&Args::parse_from(["app", "--height-scale", "0.5"]));
        assert_eq!(app.height_scale, 0.5);
    }

    #[test]
    fn oversized_textures_are_skipped() {
        assert!(texture_fits(512, 2048));
        assert!(!texture_fits(20_000, 16_384));
        assert!(!texture_fits(0, 2048));
    }

    #[test]
    fn large_terrains_skip_the_voxel_mesh() {
        assert!(mesh_allowed(MESH_VOXEL_LIMIT));
        assert!(!mesh_allowed(MESH_VOXEL_LIMIT + 1));
    }
}
