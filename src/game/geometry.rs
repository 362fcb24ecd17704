//! Axis-aligned bounding-box intersection

/// Test whether two AABBs overlap. Boxes are given as top-left corner plus
/// width/height. Boxes that merely touch along an edge do not overlap.
pub fn aabb_overlap(ax: f32, ay: f32, aw: f32, ah: f32, bx: f32, by: f32, bw: f32, bh: f32) -> bool {
    ax < bx + bw && ax + aw > bx && ay < by + bh && ay + ah > by
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_boxes() {
        assert!(aabb_overlap(0.0, 0.0, 10.0, 10.0, 5.0, 5.0, 10.0, 10.0));
    }

    #[test]
    fn contained_box() {
        assert!(aabb_overlap(0.0, 0.0, 40.0, 40.0, 10.0, 10.0, 8.0, 8.0));
    }

    #[test]
    fn separated_boxes() {
        assert!(!aabb_overlap(0.0, 0.0, 10.0, 10.0, 20.0, 0.0, 10.0, 10.0));
        assert!(!aabb_overlap(0.0, 0.0, 10.0, 10.0, 0.0, 20.0, 10.0, 10.0));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        assert!(!aabb_overlap(0.0, 0.0, 10.0, 10.0, 10.0, 0.0, 10.0, 10.0));
    }
}
