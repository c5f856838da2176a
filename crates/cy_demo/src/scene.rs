//! Scene composition descriptor: which geometry sets exist, where, and which
//! passes run. The compiled-in default is the hand-authored courtyard layout;
//! a JSON file can override it for level-authoring experiments, with strict
//! validation so a bad file falls back to the default instead of rendering
//! garbage.

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Row of brick cubes along the x axis at ground level.
const BRICK_ROW: [[f32; 3]; 10] = [
    [-4.0, 0.0, -3.0],
    [-3.0, 0.0, -3.0],
    [-2.0, 0.0, -3.0],
    [-1.0, 0.0, -3.0],
    [0.0, 0.0, -3.0],
    [1.0, 0.0, -3.0],
    [2.0, 0.0, -3.0],
    [3.0, 0.0, -3.0],
    [4.0, 0.0, -3.0],
    [5.0, 0.0, -3.0],
];

/// Mystery blocks floating above the brick row.
const MYSTERY_BLOCKS: [[f32; 3]; 3] = [[-2.0, 2.0, -3.0], [0.5, 2.0, -3.0], [3.0, 2.0, -3.0]];

/// Coin pickups spaced three units apart along the x axis.
const COIN_ROW: [[f32; 3]; 10] = [
    [0.0, 0.0, 0.0],
    [3.0, 0.0, 0.0],
    [6.0, 0.0, 0.0],
    [9.0, 0.0, 0.0],
    [12.0, 0.0, 0.0],
    [15.0, 0.0, 0.0],
    [18.0, 0.0, 0.0],
    [21.0, 0.0, 0.0],
    [24.0, 0.0, 0.0],
    [27.0, 0.0, 0.0],
];

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct GroundSlab {
    pub position: [f32; 3],
    pub scale: f32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SceneDescriptor {
    #[serde(default = "default_cube_size")]
    pub cube_size: f32,
    #[serde(default = "default_height_scale")]
    pub parallax_height_scale: f32,
    #[serde(default = "default_true")]
    pub draw_skybox: bool,
    #[serde(default = "default_bricks")]
    pub brick_cubes: Vec<[f32; 3]>,
    #[serde(default = "default_mystery")]
    pub mystery_cubes: Vec<[f32; 3]>,
    #[serde(default = "default_coins")]
    pub coins: Vec<[f32; 3]>,
    #[serde(default = "default_ground")]
    pub ground: Option<GroundSlab>,
}

impl Default for SceneDescriptor {
    fn default() -> Self {
        Self {
            cube_size: default_cube_size(),
            parallax_height_scale: default_height_scale(),
            draw_skybox: true,
            brick_cubes: default_bricks(),
            mystery_cubes: default_mystery(),
            coins: default_coins(),
            ground: default_ground(),
        }
    }
}

pub fn load_scene_from_path(path: &Path) -> Result<SceneDescriptor, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read scene file {}: {e}", path.display()))?;
    let scene: SceneDescriptor = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse scene JSON {}: {e}", path.display()))?;
    validate_scene(&scene)?;
    Ok(scene)
}

/// Load a scene override if the file exists, otherwise the built-in layout.
/// A present-but-invalid file logs and falls back rather than aborting.
pub fn load_or_default(path: &Path) -> SceneDescriptor {
    if !path.exists() {
        log::info!(
            "No scene override at '{}', using built-in layout",
            path.display()
        );
        return SceneDescriptor::default();
    }
    match load_scene_from_path(path) {
        Ok(scene) => {
            log::info!("Loaded scene override '{}'", path.display());
            scene
        }
        Err(err) => {
            log::error!("{err}. Using built-in layout.");
            SceneDescriptor::default()
        }
    }
}

fn validate_scene(scene: &SceneDescriptor) -> Result<(), String> {
    if !scene.cube_size.is_finite() || scene.cube_size <= 0.0 {
        return Err(format!(
            "Scene validation failed: cube_size must be positive and finite, got {}",
            scene.cube_size
        ));
    }
    if !scene.parallax_height_scale.is_finite() || scene.parallax_height_scale < 0.0 {
        return Err(format!(
            "Scene validation failed: parallax_height_scale must be non-negative, got {}",
            scene.parallax_height_scale
        ));
    }
    let sets = [
        ("brick_cubes", &scene.brick_cubes),
        ("mystery_cubes", &scene.mystery_cubes),
        ("coins", &scene.coins),
    ];
    for (name, positions) in sets {
        for p in positions.iter() {
            if !p.iter().all(|c| c.is_finite()) {
                return Err(format!(
                    "Scene validation failed: non-finite position {p:?} in {name}"
                ));
            }
        }
    }
    if let Some(ground) = &scene.ground {
        if !ground.scale.is_finite() || ground.scale <= 0.0 {
            return Err(format!(
                "Scene validation failed: ground scale must be positive, got {}",
                ground.scale
            ));
        }
    }
    Ok(())
}

fn default_cube_size() -> f32 {
    1.0
}

fn default_height_scale() -> f32 {
    0.1
}

const fn default_true() -> bool {
    true
}

fn default_bricks() -> Vec<[f32; 3]> {
    BRICK_ROW.to_vec()
}

fn default_mystery() -> Vec<[f32; 3]> {
    MYSTERY_BLOCKS.to_vec()
}

fn default_coins() -> Vec<[f32; 3]> {
    COIN_ROW.to_vec()
}

fn default_ground() -> Option<GroundSlab> {
    Some(GroundSlab {
        position: [0.0, -2.5, 0.0],
        scale: 2.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "cy_scene_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn default_layout_matches_authored_tables() {
        let scene = SceneDescriptor::default();
        assert_eq!(scene.brick_cubes.len(), 10);
        assert_eq!(scene.mystery_cubes.len(), 3);
        assert_eq!(scene.coins.len(), 10);
        assert_eq!(scene.cube_size, 1.0);
        assert!(scene.draw_skybox);
        assert!(scene.ground.is_some());
        // Coins keep their three-unit spacing.
        assert_eq!(scene.coins[1][0] - scene.coins[0][0], 3.0);
    }

    #[test]
    fn load_scene_parses_partial_override() {
        let path = temp_file_path("partial");
        fs::write(&path, r#"{ "cube_size": 2.0, "draw_skybox": false }"#)
            .expect("failed to write temp scene file");
        let scene = load_scene_from_path(&path).expect("partial scene should load");
        assert_eq!(scene.cube_size, 2.0);
        assert!(!scene.draw_skybox);
        // Unspecified sets keep the built-in layout.
        assert_eq!(scene.brick_cubes.len(), 10);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn load_scene_rejects_zero_cube_size() {
        let path = temp_file_path("zero_cube");
        fs::write(&path, r#"{ "cube_size": 0.0 }"#).expect("failed to write temp scene file");
        let err = load_scene_from_path(&path).expect_err("zero cube_size should fail");
        assert!(err.contains("cube_size"));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn load_scene_rejects_non_finite_positions() {
        let path = temp_file_path("nan_pos");
        fs::write(&path, r#"{ "coins": [[0.0, 1e39, 0.0]] }"#)
            .expect("failed to write temp scene file");
        // 1e39 is finite as f64 but overflows f32 to infinity when read.
        let err = load_scene_from_path(&path).expect_err("non-finite position should fail");
        assert!(err.contains("non-finite"));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn load_or_default_falls_back_on_missing_file() {
        let scene = load_or_default(Path::new("/nonexistent/scene.json"));
        assert_eq!(scene.brick_cubes.len(), 10);
    }

    #[test]
    fn load_or_default_falls_back_on_invalid_file() {
        let path = temp_file_path("invalid");
        fs::write(&path, "not json").expect("failed to write temp scene file");
        let scene = load_or_default(&path);
        assert_eq!(scene.coins.len(), 10);

        let _ = fs::remove_file(path);
    }
}
