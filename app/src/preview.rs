use egui::epaint::{Mesh, Vertex, WHITE_UV};
use egui::{Color32, Pos2, Rect, Sense, Ui, Vec2, pos2};
use voxel_core::{FaceSet, Material, RenderBatches, VoxelKind};

// 30° isometric axes
const ISO_X: f32 = 0.866_025_4;
const ISO_Y: f32 = 0.5;

// Faces visible from the camera corner (+x, +y, +z)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Face {
    Top,
    East,
    South,
}

impl Face {
    fn shade(self) -> f32 {
        match self {
            Face::Top => 1.0,
            Face::East => 0.8,
            Face::South => 0.62,
        }
    }

    // Cube corners of this face, relative to the voxel origin
    fn corners(self) -> [[f32; 3]; 4] {
        match self {
            Face::Top => [[0., 1., 0.], [1., 1., 0.], [1., 1., 1.], [0., 1., 1.]],
            Face::East => [[1., 0., 0.], [1., 1., 0.], [1., 1., 1.], [1., 0., 1.]],
            Face::South => [[0., 0., 1.], [1., 0., 1.], [1., 1., 1.], [0., 1., 1.]],
        }
    }
}

fn faces(set: FaceSet) -> &'static [Face] {
    match set {
        FaceSet::All => &[Face::Top, Face::East, Face::South],
        FaceSet::Sides => &[Face::East, Face::South],
        FaceSet::Top => &[Face::Top],
    }
}

fn material_color(material: Material) -> [f32; 3] {
    match material {
        Material::Dirt => [134.0, 96.0, 67.0],
        Material::GrassSide => [112.0, 118.0, 58.0],
        Material::GrassTop => [95.0, 159.0, 53.0],
    }
}

fn project(p: [f32; 3]) -> Pos2 {
    pos2((p[0] - p[2]) * ISO_X, (p[0] + p[2]) * ISO_Y - p[1])
}

// Pan and zoom for the voxel preview, owned by the app and handed in each frame
#[derive(Clone, Copy, Debug)]
pub struct ViewContext {
    pub zoom: f32,
    pub pan: Vec2,
}

impl Default for ViewContext {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
        }
    }
}

impl ViewContext {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// Isometric mesh of the whole terrain in unit screen space, built once per generation
pub struct VoxelMesh {
    mesh: Mesh,
    bounds: Rect,
}

impl VoxelMesh {
    pub fn build(batches: &RenderBatches) -> Self {
        // back to front: far cells first, lower layers first
        let mut order: Vec<([i32; 3], VoxelKind)> = batches
            .base
            .iter()
            .map(|&t| (t, VoxelKind::Base))
            .chain(batches.capped.iter().map(|&t| (t, VoxelKind::Capped)))
            .collect();
        order.sort_by_key(|([x, y, z], _)| (x + z, *y, *x));

        let mut mesh = Mesh::default();
        for ([x, y, z], kind) in order {
            let origin = [x as f32, y as f32, z as f32];
            for pass in kind.passes() {
                let base = material_color(pass.material);
                for &face in faces(pass.faces) {
                    let s = face.shade();
                    let color = Color32::from_rgb(
                        (base[0] * s) as u8,
                        (base[1] * s) as u8,
                        (base[2] * s) as u8,
                    );
                    push_quad(&mut mesh, origin, face, color);
                }
            }
        }
        let bounds = mesh.calc_bounds();
        Self { mesh, bounds }
    }

    pub fn is_empty(&self) -> bool {
        self.mesh.indices.is_empty()
    }

    pub fn show(&self, ui: &mut Ui, view: &mut ViewContext) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::drag());
        view.pan += response.drag_delta();
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                view.zoom = (view.zoom * (1.0 + scroll * 0.002)).clamp(0.1, 20.0);
            }
        }
        if self.is_empty() {
            return;
        }

        let rect = response.rect;
        let fit = (rect.width() / self.bounds.width().max(1.0))
            .min(rect.height() / self.bounds.height().max(1.0))
            * 0.9;
        let scale = fit * view.zoom;
        let center = rect.center() + view.pan;
        let mut mesh = self.mesh.clone();
        for v in mesh.vertices.iter_mut() {
            v.pos = center + (v.pos - self.bounds.center()) * scale;
        }
        painter.add(egui::Shape::mesh(mesh));
    }
}

fn push_quad(mesh: &mut Mesh, origin: [f32; 3], face: Face, color: Color32) {
    let first = mesh.vertices.len() as u32;
    for c in face.corners() {
        let p = [origin[0] + c[0], origin[1] + c[1], origin[2] + c[2]];
        mesh.vertices.push(Vertex {
            pos: project(p),
            uv: WHITE_UV,
            color,
        });
    }
    mesh.indices
        .extend_from_slice(&[first, first + 1, first + 2, first, first + 2, first + 3]);
}

#[cfg(test)]
mod tests {
    use super::{Face, VoxelMesh, project};
    use voxel_core::{RenderBatches, build_column};

    #[test]
    fn higher_voxels_draw_higher_on_screen() {
        let low = project([0.0, 0.0, 0.0]);
        let high = project([0.0, 3.0, 0.0]);
        assert!(high.y < low.y);
    }

    #[test]
    fn mesh_quad_count_follows_passes() {
        // ground (3 dirt faces) + capped (2 side faces + 1 top face)
        let batches = RenderBatches::from_voxels(&build_column(0, 0, 1));
        let mesh = VoxelMesh::build(&batches);
        assert_eq!(mesh.mesh.indices.len(), 6 * 6);
        assert_eq!(mesh.mesh.vertices.len(), 6 * 4);
    }

    #[test]
    fn empty_terrain_builds_empty_mesh() {
        let mesh = VoxelMesh::build(&RenderBatches::default());
        assert!(mesh.is_empty());
    }

    #[test]
    fn top_face_is_brightest() {
        assert!(Face::Top.shade() > Face::East.shade());
        assert!(Face::East.shade() > Face::South.shade());
    }
}
