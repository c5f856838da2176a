//! GPU-side packing of the light set and per-frame render parameters.
//! Every field is a vec4 slot so the struct satisfies uniform-buffer
//! alignment without implicit padding.

use cy_core::lighting::{DirectionalLight, PointLight, SpotLight};
use glam::Vec3;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    pub dir_direction: [f32; 4],
    pub dir_ambient: [f32; 4],
    pub dir_diffuse: [f32; 4],
    pub dir_specular: [f32; 4],

    pub point_position: [f32; 4],
    pub point_ambient: [f32; 4],
    pub point_diffuse: [f32; 4],
    pub point_specular: [f32; 4],
    /// x = constant, y = linear, z = quadratic.
    pub point_attenuation: [f32; 4],

    pub spot_position: [f32; 4],
    pub spot_direction: [f32; 4],
    pub spot_ambient: [f32; 4],
    pub spot_diffuse: [f32; 4],
    pub spot_specular: [f32; 4],
    /// x = inner cutoff cosine, y = outer cutoff cosine.
    pub spot_cutoffs: [f32; 4],
}

impl LightsUniform {
    /// The spot light intentionally shares the point light's attenuation
    /// coefficients, so the overlay drags tune both cones at once.
    pub fn pack(dir: &DirectionalLight, point: &PointLight, spot: &SpotLight) -> Self {
        Self {
            dir_direction: vec4(dir.direction),
            dir_ambient: vec4(dir.ambient),
            dir_diffuse: vec4(dir.diffuse),
            dir_specular: vec4(dir.specular),
            point_position: vec4(point.position),
            point_ambient: vec4(point.ambient),
            point_diffuse: vec4(point.diffuse),
            point_specular: vec4(point.specular),
            point_attenuation: [point.constant, point.linear, point.quadratic, 0.0],
            spot_position: vec4(spot.position),
            spot_direction: vec4(spot.direction),
            spot_ambient: vec4(spot.ambient),
            spot_diffuse: vec4(spot.diffuse),
            spot_specular: vec4(spot.specular),
            spot_cutoffs: [spot.cutoff, spot.outer_cutoff, 0.0, 0.0],
        }
    }
}

/// Material-wide shading knobs pushed once per frame.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RenderParams {
    pub shininess: f32,
    /// Parallax depth scale; 0 disables the UV offset entirely.
    pub height_scale: f32,
    /// Nonzero selects the Blinn half-vector specular term.
    pub blinn: f32,
    pub _pad: f32,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            shininess: 32.0,
            height_scale: 0.1,
            blinn: 1.0,
            _pad: 0.0,
        }
    }
}

fn vec4(v: Vec3) -> [f32; 4] {
    [v.x, v.y, v.z, 0.0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_places_attenuation_in_xyz() {
        let point = PointLight {
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
            ..Default::default()
        };
        let packed = LightsUniform::pack(
            &DirectionalLight::default(),
            &point,
            &SpotLight::default(),
        );
        assert_eq!(packed.point_attenuation[0], 1.0);
        assert_eq!(packed.point_attenuation[1], 0.09);
        assert_eq!(packed.point_attenuation[2], 0.032);
    }

    #[test]
    fn uniform_size_is_vec4_aligned() {
        assert_eq!(std::mem::size_of::<LightsUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<RenderParams>(), 16);
    }

    #[test]
    fn spot_cutoffs_preserve_cone_ordering() {
        let packed = LightsUniform::pack(
            &DirectionalLight::default(),
            &PointLight::default(),
            &SpotLight::default(),
        );
        assert!(packed.spot_cutoffs[0] > packed.spot_cutoffs[1]);
    }
}
