/// Depth range used by the pixel-space projection.
const DEPTH_NEAR: f32 = -1.0;
const DEPTH_FAR: f32 = 1.0;

/// 4x4 transform matrix, mutable in place.
///
/// Elements are stored in column-vector order: consecutive groups of four
/// are the matrix columns, so the translation lives at elements 12 and 13.
/// The same byte order uploads directly into a WGSL `mat4x4<f32>` uniform.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub elements: [f32; 16],
}

impl Transform {
    pub const IDENTITY: Self = Self {
        elements: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0, //
        ],
    };

    pub fn new() -> Self {
        Self::IDENTITY
    }

    pub const fn from_elements(elements: [f32; 16]) -> Self {
        Self { elements }
    }

    /// Resets to the identity matrix.
    pub fn identity(&mut self) {
        *self = Self::IDENTITY;
    }

    /// Orthographic projection from pixel space to clip space for a surface
    /// of `width` x `height`: origin top-left, +Y down, depth mapped to a
    /// fixed narrow range.
    ///
    /// This is the matrix `draw` uses when the caller passes no transform.
    pub fn ortho_screen(width: f32, height: f32) -> Self {
        let sx = 2.0 / width;
        let sy = 2.0 / -height;
        let sz = -2.0 / (DEPTH_FAR - DEPTH_NEAR);
        Self {
            elements: [
                sx, 0.0, 0.0, 0.0, //
                0.0, sy, 0.0, 0.0, //
                0.0, 0.0, sz, 0.0, //
                -1.0, 1.0, 0.0, 1.0, //
            ],
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── identity ──────────────────────────────────────────────────────────

    #[test]
    fn new_is_identity() {
        assert_eq!(Transform::new(), Transform::IDENTITY);
    }

    #[test]
    fn identity_resets_in_place() {
        let mut t = Transform::ortho_screen(640.0, 480.0);
        t.identity();
        assert_eq!(t, Transform::IDENTITY);
    }

    // ── ortho_screen ──────────────────────────────────────────────────────

    #[test]
    fn ortho_scale_terms() {
        let t = Transform::ortho_screen(800.0, 600.0);
        assert_eq!(t.elements[0], 2.0 / 800.0);
        assert_eq!(t.elements[5], -2.0 / 600.0);
        assert_eq!(t.elements[10], -1.0);
    }

    #[test]
    fn ortho_translation_terms() {
        let t = Transform::ortho_screen(800.0, 600.0);
        assert_eq!(t.elements[12], -1.0);
        assert_eq!(t.elements[13], 1.0);
    }
}
