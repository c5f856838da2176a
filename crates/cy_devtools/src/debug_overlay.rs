//! Debug overlay rendered via egui on top of the scene.
//!
//! Integration pattern: egui requires a three-phase render split because
//! `egui_wgpu::Renderer::render()` needs a `RenderPass<'static>`, while
//! `begin_render_pass` borrows the encoder. The phases are:
//!
//!   1. `prepare()` -- run egui UI logic, produce tessellated primitives
//!   2. `upload()`  -- upload textures and update GPU buffers (borrows encoder mutably)
//!   3. `paint()`   -- render into a new render pass with `forget_lifetime()`
//!   4. `cleanup()` -- free textures egui no longer references
//!
//! The overlay only runs UI logic when `visible` is true (toggled by F1),
//! but egui event handling is always active so the overlay can intercept
//! clicks when it is shown. The edit widgets write straight into the
//! application state through `OverlayParams`.

use cy_core::lighting::PointLight;
use cy_core::time::TimeState;
use glam::Vec3;
use winit::window::Window;

#[derive(Debug, Clone, Default)]
pub struct OverlayStats {
    pub draw_calls: u32,
    pub vertex_count: u32,
    pub quad_count: u32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CameraTelemetry {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub front: Vec3,
}

/// Mutable slices of application state the overlay edits in place, plus
/// read-only camera telemetry.
pub struct OverlayParams<'a> {
    pub clear_color: &'a mut [f32; 3],
    /// Model placement drags kept from the original tooling; nothing in the
    /// scene reads them.
    pub model_offset: &'a mut Vec3,
    pub model_scale: &'a mut f32,
    pub point_light: &'a mut PointLight,
    pub mouse_look_enabled: &'a mut bool,
    pub camera: CameraTelemetry,
}

pub struct DebugOverlay {
    pub egui_ctx: egui::Context,
    pub egui_winit_state: egui_winit::State,
    pub egui_renderer: egui_wgpu::Renderer,
    pub visible: bool,
}

impl DebugOverlay {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        window: &Window,
    ) -> Self {
        let egui_ctx = egui::Context::default();
        let egui_winit_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            window,
            None,
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);

        Self {
            egui_ctx,
            egui_winit_state,
            egui_renderer,
            visible: false,
        }
    }

    pub fn handle_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        let response = self.egui_winit_state.on_window_event(window, event);
        response.consumed
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        log::info!("Debug overlay: {}", if self.visible { "ON" } else { "OFF" });
    }

    pub fn prepare(
        &mut self,
        window: &Window,
        time: &TimeState,
        stats: &OverlayStats,
        params: &mut OverlayParams<'_>,
    ) -> (Vec<egui::ClippedPrimitive>, egui::TexturesDelta) {
        let raw_input = self.egui_winit_state.take_egui_input(window);
        let visible = self.visible;
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            if !visible {
                return;
            }

            egui::Window::new("Scene")
                .default_pos([10.0, 10.0])
                .show(ctx, |ui| {
                    ui.label(format!("FPS: {:.1}", time.smoothed_fps));
                    ui.label(format!("Frame time: {:.2} ms", time.smoothed_frame_time_ms));
                    ui.label(format!("Draw calls: {}", stats.draw_calls));
                    ui.label(format!("Quads: {}", stats.quad_count));
                    ui.label(format!("Vertices: {}", stats.vertex_count));
                    ui.separator();

                    ui.color_edit_button_rgb(params.clear_color);
                    ui.label("Background color");
                    ui.horizontal(|ui| {
                        ui.label("Model position");
                        ui.add(egui::DragValue::new(&mut params.model_offset.x).speed(0.05));
                        ui.add(egui::DragValue::new(&mut params.model_offset.y).speed(0.05));
                        ui.add(egui::DragValue::new(&mut params.model_offset.z).speed(0.05));
                    });
                    ui.add(
                        egui::Slider::new(params.model_scale, 0.1..=4.0).text("Model scale"),
                    );
                    ui.separator();

                    ui.add(
                        egui::Slider::new(&mut params.point_light.constant, 0.0..=1.0)
                            .text("pointLight.constant"),
                    );
                    ui.add(
                        egui::Slider::new(&mut params.point_light.linear, 0.0..=1.0)
                            .text("pointLight.linear"),
                    );
                    ui.add(
                        egui::Slider::new(&mut params.point_light.quadratic, 0.0..=1.0)
                            .text("pointLight.quadratic"),
                    );
                });

            egui::Window::new("Camera").show(ctx, |ui| {
                let cam = params.camera;
                ui.label(format!(
                    "Position: ({:.3}, {:.3}, {:.3})",
                    cam.position.x, cam.position.y, cam.position.z
                ));
                ui.label(format!("(Yaw, Pitch): ({:.3}, {:.3})", cam.yaw, cam.pitch));
                ui.label(format!(
                    "Front: ({:.3}, {:.3}, {:.3})",
                    cam.front.x, cam.front.y, cam.front.z
                ));
                ui.checkbox(params.mouse_look_enabled, "Camera mouse update");
            });
        });

        self.egui_winit_state
            .handle_platform_output(window, full_output.platform_output);

        let primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        (primitives, full_output.textures_delta)
    }

    /// Upload textures and update buffers. Call before creating the egui render pass.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        primitives: &[egui::ClippedPrimitive],
        textures_delta: &egui::TexturesDelta,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer
            .update_buffers(device, queue, encoder, primitives, screen_descriptor);
    }

    /// Render into an existing render pass. Call after `upload()`.
    pub fn paint(
        &self,
        render_pass: &mut wgpu::RenderPass<'static>,
        primitives: &[egui::ClippedPrimitive],
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        self.egui_renderer
            .render(render_pass, primitives, screen_descriptor);
    }

    /// Free textures that egui no longer needs. Call after rendering.
    pub fn cleanup(&mut self, textures_delta: &egui::TexturesDelta) {
        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}
