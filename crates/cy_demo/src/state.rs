//! Application state and its flat-file persistence.
//!
//! The settings format is a fixed positional list of whitespace-separated
//! scalars: clear R, G, B; overlay flag (0/1); camera position X, Y, Z;
//! camera front X, Y, Z. Reading stops at the first missing or malformed
//! token and every later field keeps its default. Saving writes the same
//! fields newline-separated. The format deliberately covers only this
//! subset: light tuning and the model drag fields are never persisted.

use std::fmt::Write as _;
use std::path::Path;
use std::str::SplitWhitespace;

use cy_core::lighting::PointLight;
use cy_render::FlyCamera;
use glam::Vec3;

pub struct AppState {
    pub clear_color: [f32; 3],
    pub overlay_enabled: bool,
    pub camera: FlyCamera,
    pub mouse_look_enabled: bool,
    pub point_light: PointLight,
    /// Model placement fields edited by the overlay; nothing renders them.
    pub model_offset: Vec3,
    pub model_scale: f32,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            clear_color: [0.0, 0.0, 0.0],
            overlay_enabled: false,
            camera: FlyCamera::default(),
            mouse_look_enabled: true,
            point_light: PointLight::default(),
            model_offset: Vec3::ZERO,
            model_scale: 1.0,
        }
    }
}

/// Positional scalar reader: the first token that is missing or fails to
/// parse poisons the reader, so no later field is assigned either.
struct FieldReader<'a> {
    tokens: SplitWhitespace<'a>,
    failed: bool,
}

impl<'a> FieldReader<'a> {
    fn new(raw: &'a str) -> Self {
        Self {
            tokens: raw.split_whitespace(),
            failed: false,
        }
    }

    fn next_f32(&mut self) -> Option<f32> {
        if self.failed {
            return None;
        }
        match self.tokens.next().map(str::parse::<f32>) {
            Some(Ok(value)) => Some(value),
            _ => {
                self.failed = true;
                None
            }
        }
    }
}

impl AppState {
    /// Load persisted fields. A missing or unreadable file leaves every
    /// field at its default with no error surfaced; a truncated or
    /// malformed file keeps defaults from the failure point onward.
    pub fn load_from_file(&mut self, path: &Path) {
        let Ok(raw) = std::fs::read_to_string(path) else {
            return;
        };
        let mut reader = FieldReader::new(&raw);

        for channel in &mut self.clear_color {
            if let Some(value) = reader.next_f32() {
                *channel = value;
            }
        }
        if let Some(flag) = reader.next_f32() {
            self.overlay_enabled = flag != 0.0;
        }
        if let Some(x) = reader.next_f32() {
            self.camera.position.x = x;
        }
        if let Some(y) = reader.next_f32() {
            self.camera.position.y = y;
        }
        if let Some(z) = reader.next_f32() {
            self.camera.position.z = z;
        }
        // The facing vector is only applied when complete; yaw/pitch are
        // re-derived from it so the camera basis invariant holds.
        let front = (
            reader.next_f32(),
            reader.next_f32(),
            reader.next_f32(),
        );
        if let (Some(x), Some(y), Some(z)) = front {
            self.camera.set_facing(Vec3::new(x, y, z));
        }
    }

    /// Write the persisted subset in load order, newline-separated.
    pub fn save_to_file(&self, path: &Path) -> Result<(), String> {
        let mut out = String::new();
        for channel in self.clear_color {
            let _ = writeln!(out, "{channel}");
        }
        let _ = writeln!(out, "{}", u8::from(self.overlay_enabled));
        for component in self.camera.position.to_array() {
            let _ = writeln!(out, "{component}");
        }
        for component in self.camera.front().to_array() {
            let _ = writeln!(out, "{component}");
        }
        std::fs::write(path, out)
            .map_err(|e| format!("Failed to write settings {}: {e}", path.display()))
    }
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
            "cy_state_test_{}_{}_{}.txt",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn round_trip_restores_persisted_fields() {
        let path = temp_file_path("round_trip");
        let mut saved = AppState::default();
        saved.clear_color = [0.25, 0.5, 0.75];
        saved.overlay_enabled = true;
        saved.camera.position = Vec3::new(1.0, -2.0, 7.5);
        saved
            .camera
            .set_facing(Vec3::new(0.3, -0.2, -0.9).normalize());
        saved.save_to_file(&path).expect("save should succeed");

        let mut loaded = AppState::default();
        loaded.load_from_file(&path);
        assert_eq!(loaded.clear_color, saved.clear_color);
        assert!(loaded.overlay_enabled);
        assert!((loaded.camera.position - saved.camera.position).length() < 1e-5);
        assert!((loaded.camera.front() - saved.camera.front()).length() < 1e-4);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn light_tuning_is_not_persisted() {
        let path = temp_file_path("lossy");
        let mut saved = AppState::default();
        saved.point_light.linear = 0.7;
        saved.model_scale = 3.0;
        saved.save_to_file(&path).expect("save should succeed");

        let mut loaded = AppState::default();
        loaded.load_from_file(&path);
        // Fields outside the format come back as defaults, by design.
        assert_eq!(loaded.point_light.linear, PointLight::default().linear);
        assert_eq!(loaded.model_scale, 1.0);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn missing_file_keeps_defaults() {
        let mut state = AppState::default();
        state.load_from_file(Path::new("/nonexistent/settings.txt"));
        assert_eq!(state.clear_color, [0.0, 0.0, 0.0]);
        assert!(!state.overlay_enabled);
    }

    #[test]
    fn truncated_file_keeps_trailing_defaults() {
        let path = temp_file_path("truncated");
        // Only the clear color and flag are present.
        std::fs::write(&path, "0.1\n0.2\n0.3\n1\n").expect("failed to write settings");

        let mut state = AppState::default();
        let default_position = state.camera.position;
        state.load_from_file(&path);
        assert_eq!(state.clear_color, [0.1, 0.2, 0.3]);
        assert!(state.overlay_enabled);
        assert_eq!(state.camera.position, default_position);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn malformed_token_stops_reading_without_corruption() {
        let path = temp_file_path("malformed");
        // The third value is junk; everything from there on stays default.
        std::fs::write(&path, "0.1\n0.2\nbogus\n1\n9.0\n9.0\n9.0\n")
            .expect("failed to write settings");

        let mut state = AppState::default();
        state.load_from_file(&path);
        assert_eq!(state.clear_color[0], 0.1);
        assert_eq!(state.clear_color[1], 0.2);
        assert_eq!(state.clear_color[2], 0.0);
        assert!(!state.overlay_enabled);
        assert_eq!(state.camera.position, Vec3::new(0.0, 0.0, 3.0));

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn partial_front_vector_is_ignored() {
        let path = temp_file_path("partial_front");
        // Full record up through position, then only two front components.
        std::fs::write(&path, "0 0 0 0 1 2 3 0.5 0.5").expect("failed to write settings");

        let mut state = AppState::default();
        let default_front = state.camera.front();
        state.load_from_file(&path);
        assert_eq!(state.camera.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(state.camera.front(), default_front);

        let _ = std::fs::remove_file(path);
    }
}
