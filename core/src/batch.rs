use crate::column::{Voxel, VoxelKind};

// Textures the renderer binds for terrain voxels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Material {
    Dirt,
    GrassSide,
    GrassTop,
}

// Which cube faces a draw pass covers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaceSet {
    All,
    Sides,
    Top,
}

// One textured draw of a voxel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DrawPass {
    pub material: Material,
    pub faces: FaceSet,
}

const BASE_PASSES: [DrawPass; 1] = [DrawPass {
    material: Material::Dirt,
    faces: FaceSet::All,
}];

const CAPPED_PASSES: [DrawPass; 2] = [
    DrawPass {
        material: Material::GrassSide,
        faces: FaceSet::Sides,
    },
    DrawPass {
        material: Material::GrassTop,
        faces: FaceSet::Top,
    },
];

impl VoxelKind {
    // Base voxels are one dirt draw, capped voxels a side draw plus a top draw
    pub fn passes(self) -> &'static [DrawPass] {
        match self {
            VoxelKind::Base => &BASE_PASSES,
            VoxelKind::Capped => &CAPPED_PASSES,
        }
    }
}

// Voxel translations split by render class, each list in generation order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderBatches {
    pub base: Vec<[i32; 3]>,
    pub capped: Vec<[i32; 3]>,
}

impl RenderBatches {
    pub fn from_voxels(voxels: &[Voxel]) -> Self {
        let mut batches = Self::default();
        for v in voxels {
            match v.kind {
                VoxelKind::Base => batches.base.push(v.translation()),
                VoxelKind::Capped => batches.capped.push(v.translation()),
            }
        }
        batches
    }

    pub fn len(&self) -> usize {
        self.base.len() + self.capped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty() && self.capped.is_empty()
    }

    // One draw per pass per voxel
    pub fn draw_calls(&self) -> usize {
        self.base.len() * BASE_PASSES.len() + self.capped.len() * CAPPED_PASSES.len()
    }
}

// Summary of one generated terrain
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TerrainStats {
    pub columns: usize,
    pub voxels: usize,
    pub capped: usize,
    pub max_height: i32,
}

impl TerrainStats {
    pub fn from_voxels(voxels: &[Voxel]) -> Self {
        let mut stats = Self {
            voxels: voxels.len(),
            ..Self::default()
        };
        for v in voxels {
            if v.y == 0 {
                stats.columns += 1;
            }
            if v.is_capped() {
                stats.capped += 1;
            }
            stats.max_height = stats.max_height.max(v.y);
        }
        stats
    }

    // Columns that never rose above ground. Zero for slices holding caps
    // without their ground voxels.
    pub fn flat_columns(&self) -> usize {
        self.columns.saturating_sub(self.capped)
    }
}

#[cfg(test)]
mod tests {
    use super::{FaceSet, Material, RenderBatches, TerrainStats};
    use crate::{Voxel, VoxelKind, build_column};

    #[test]
    fn capped_draws_side_then_top() {
        let passes = VoxelKind::Capped.passes();
        assert_eq!(passes.len(), 2);
        assert_eq!(passes[0].material, Material::GrassSide);
        assert_eq!(passes[0].faces, FaceSet::Sides);
        assert_eq!(passes[1].material, Material::GrassTop);
        assert_eq!(passes[1].faces, FaceSet::Top);
    }

    #[test]
    fn base_is_single_dirt_pass() {
        let passes = VoxelKind::Base.passes();
        assert_eq!(passes.len(), 1);
        assert_eq!(passes[0].material, Material::Dirt);
        assert_eq!(passes[0].faces, FaceSet::All);
    }

    #[test]
    fn batches_split_by_kind() {
        let mut voxels = build_column(0, 0, 3);
        voxels.extend(build_column(1, 0, 0));
        let batches = RenderBatches::from_voxels(&voxels);
        assert_eq!(batches.base, vec![[0, 0, 0], [0, 1, 0], [0, 2, 0], [1, 0, 0]]);
        assert_eq!(batches.capped, vec![[0, 3, 0]]);
        assert_eq!(batches.len(), 5);
        assert_eq!(batches.draw_calls(), 4 + 2);
    }

    #[test]
    fn empty_batches() {
        let batches = RenderBatches::from_voxels(&[]);
        assert!(batches.is_empty());
        assert_eq!(batches.draw_calls(), 0);
    }

    #[test]
    fn stats_count_columns_and_caps() {
        let mut voxels = build_column(0, 0, 4);
        voxels.extend(build_column(1, 0, 0));
        voxels.extend(build_column(2, 0, 2));
        let stats = TerrainStats::from_voxels(&voxels);
        assert_eq!(stats.columns, 3);
        assert_eq!(stats.voxels, 5 + 1 + 3);
        assert_eq!(stats.capped, 2);
        assert_eq!(stats.max_height, 4);
        assert_eq!(stats.flat_columns(), 1);
    }

    #[test]
    fn stats_of_partial_slice_without_ground() {
        let stats = TerrainStats::from_voxels(&[Voxel::new(0, 3, 0, VoxelKind::Capped)]);
        assert_eq!(stats.columns, 0);
        assert_eq!(stats.capped, 1);
        assert_eq!(stats.flat_columns(), 0);
    }
}
