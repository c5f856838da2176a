use std::sync::Arc;
use winit::event_loop::ActiveEventLoop;
use winit::window::{CursorGrabMode, Window, WindowAttributes};

pub struct PlatformConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            title: "Coinyard".to_string(),
            width: 800,
            height: 600,
        }
    }
}

pub fn create_window(event_loop: &ActiveEventLoop, config: &PlatformConfig) -> Arc<Window> {
    let attrs = WindowAttributes::default()
        .with_title(&config.title)
        .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));

    let window = event_loop
        .create_window(attrs)
        .expect("Failed to create window");
    Arc::new(window)
}

/// Grab or release the cursor for mouse-look. Locked grab is preferred;
/// some platforms only support Confined, so fall through before giving up.
pub fn set_mouse_capture(window: &Window, captured: bool) {
    if captured {
        if let Err(err) = window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
        {
            log::warn!("Cursor grab not available: {err}");
        }
        window.set_cursor_visible(false);
    } else {
        if let Err(err) = window.set_cursor_grab(CursorGrabMode::None) {
            log::warn!("Cursor release failed: {err}");
        }
        window.set_cursor_visible(true);
    }
}
