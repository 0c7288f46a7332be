// Render class of a voxel.
// `Capped` is the topmost voxel of a column and needs separate top and side
// materials; everything under it is `Base` with one material on all faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VoxelKind {
    Base,
    Capped,
}

// One unit voxel at integer world coordinates, y = 0 is ground level
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Voxel {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub kind: VoxelKind,
}

impl Voxel {
    pub fn new(x: i32, y: i32, z: i32, kind: VoxelKind) -> Self {
        Self { x, y, z, kind }
    }

    // World-space translation handed to the renderer
    pub fn translation(&self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }

    pub fn is_capped(&self) -> bool {
        self.kind == VoxelKind::Capped
    }
}

// Append the column at (x, z) to `out`: the ground voxel, then one voxel per
// layer 1..=height with only the last one capped. Negative heights are
// treated as 0.
pub fn push_column(out: &mut Vec<Voxel>, x: i32, z: i32, height: i32) {
    out.push(Voxel::new(x, 0, z, VoxelKind::Base));
    for h in 1..=height {
        let kind = if h == height {
            VoxelKind::Capped
        } else {
            VoxelKind::Base
        };
        out.push(Voxel::new(x, h, z, kind));
    }
}

// The column at (x, z) on its own, ascending by y
pub fn build_column(x: i32, z: i32, height: i32) -> Vec<Voxel> {
    let mut out = Vec::with_capacity(height.max(0) as usize + 1);
    push_column(&mut out, x, z, height);
    out
}

#[cfg(test)]
mod tests {
    use super::{Voxel, VoxelKind, build_column, push_column};

    #[test]
    fn flat_column_is_ground_only() {
        let col = build_column(3, -4, 0);
        assert_eq!(col, vec![Voxel::new(3, 0, -4, VoxelKind::Base)]);
    }

    #[test]
    fn negative_height_is_ground_only() {
        let col = build_column(0, 0, -7);
        assert_eq!(col.len(), 1);
        assert_eq!(col[0].kind, VoxelKind::Base);
    }

    #[test]
    fn one_voxel_per_layer() {
        let col = build_column(-2, 9, 5);
        assert_eq!(col.len(), 6);
        for (i, v) in col.iter().enumerate() {
            assert_eq!(v.y, i as i32);
            assert_eq!((v.x, v.z), (-2, 9));
        }
    }

    #[test]
    fn only_the_top_is_capped() {
        let col = build_column(1, 1, 4);
        let capped: Vec<_> = col.iter().filter(|v| v.is_capped()).collect();
        assert_eq!(capped.len(), 1);
        assert_eq!(capped[0].y, 4);
        assert_eq!(col[0].kind, VoxelKind::Base);
    }

    #[test]
    fn height_one_caps_first_layer() {
        let col = build_column(0, 0, 1);
        assert_eq!(
            col,
            vec![
                Voxel::new(0, 0, 0, VoxelKind::Base),
                Voxel::new(0, 1, 0, VoxelKind::Capped),
            ]
        );
    }

    #[test]
    fn push_appends_after_existing() {
        let mut out = build_column(0, 0, 2);
        push_column(&mut out, 1, 0, 1);
        assert_eq!(out.len(), 5);
        assert_eq!(out[3].translation(), [1, 0, 0]);
        assert!(out[4].is_capped());
    }
}
