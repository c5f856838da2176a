//! CPU-side light parameter records. GPU packing lives in `cy_render`;
//! these types only describe the values pushed as uniforms each frame.

use glam::Vec3;

/// Point light with classic constant/linear/quadratic attenuation.
/// One instance lives in the application state; the debug overlay edits
/// the attenuation coefficients at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(4.0, 4.0, 0.0),
            ambient: Vec3::splat(0.2),
            diffuse: Vec3::splat(0.8),
            specular: Vec3::ONE,
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
        }
    }
}

/// Sun-like light. Emitted as a constant every frame, not editable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: Vec3::new(0.0, -1.0, 0.0),
            ambient: Vec3::splat(0.1),
            diffuse: Vec3::new(0.5, 0.3, 0.3),
            specular: Vec3::splat(0.2),
        }
    }
}

/// Cone light. Shares the point light's attenuation coefficients when
/// packed for the shader (the overlay drags tune both at once).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    pub position: Vec3,
    pub direction: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    /// Cosine of the inner cone angle.
    pub cutoff: f32,
    /// Cosine of the outer cone angle.
    pub outer_cutoff: f32,
}

impl Default for SpotLight {
    fn default() -> Self {
        Self {
            position: Vec3::splat(5.0),
            direction: Vec3::splat(-5.0),
            ambient: Vec3::splat(0.1),
            diffuse: Vec3::splat(0.3),
            specular: Vec3::splat(0.2),
            cutoff: 40.0_f32.to_radians().cos(),
            outer_cutoff: 45.0_f32.to_radians().cos(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_light_default_attenuation() {
        let light = PointLight::default();
        assert_eq!(light.constant, 1.0);
        assert_eq!(light.linear, 0.09);
        assert_eq!(light.quadratic, 0.032);
    }

    #[test]
    fn spot_cutoffs_are_cosines_inside_unit_range() {
        let spot = SpotLight::default();
        assert!(spot.cutoff > spot.outer_cutoff);
        assert!(spot.cutoff < 1.0 && spot.cutoff > 0.0);
        assert!(spot.outer_cutoff < 1.0 && spot.outer_cutoff > 0.0);
    }
}
