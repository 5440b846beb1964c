//! Trail colors, lighting and material for the map layers

use serde::{Deserialize, Serialize};

/// 8-bit RGB
pub type Rgb = [u8; 3];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientLight {
    pub color: Rgb,
    pub intensity: f32,
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            color: [255, 255, 255],
            intensity: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointLight {
    pub color: Rgb,
    pub intensity: f32,
    /// `[longitude, latitude, altitude_m]`
    pub position: [f64; 3],
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            color: [255, 255, 255],
            intensity: 2.0,
            position: [126.9779692, 37.566535, 8000.0],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub ambient: f32,
    pub diffuse: f32,
    pub shininess: f32,
    pub specular_color: Rgb,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: 0.1,
            diffuse: 0.6,
            shininess: 32.0,
            specular_color: [60, 64, 70],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub building_color: Rgb,
    /// Trail color for vendor 0
    pub trail_color0: Rgb,
    /// Trail color for every other vendor
    pub trail_color1: Rgb,
    pub ambient_light: AmbientLight,
    pub point_light: PointLight,
    pub material: Material,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            building_color: [74, 80, 87],
            trail_color0: [253, 128, 93],
            trail_color1: [23, 184, 190],
            ambient_light: AmbientLight::default(),
            point_light: PointLight::default(),
            material: Material::default(),
        }
    }
}

impl Theme {
    pub fn trail_color(&self, vendor: u32) -> Rgb {
        if vendor == 0 {
            self.trail_color0
        } else {
            self.trail_color1
        }
    }
}
