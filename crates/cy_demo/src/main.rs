//! Coinyard -- main loop and application entry point.
//!
//! Architecture: winit drives the event loop via `ApplicationHandler`. All
//! per-frame work runs inside `RedrawRequested`:
//!
//!   1. `begin_frame()` -- measure wall-clock delta
//!   2. Apply discrete input (Escape, F1) and held WASD camera movement
//!   3. Rebuild the world mesh on the CPU from the scene layout, baking
//!      every transform into world-space vertices
//!   4. Upload uniforms, draw the mesh pass then the skybox, composite egui
//!
//! Mouse look drives a classic fly camera; F1 releases the cursor and opens
//! the debug overlay. A flat-text settings file restores the clear color,
//! overlay visibility, and camera pose from the previous session.

mod geometry;
mod scene;
mod state;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;
use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, ElementState, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use cy_core::input::{InputState, Key};
use cy_core::lighting::{DirectionalLight, SpotLight};
use cy_core::time::TimeState;
use cy_devtools::{CameraTelemetry, DebugOverlay, OverlayParams, OverlayStats};
use cy_platform::window::{set_mouse_capture, PlatformConfig};
use cy_render::{
    skybox_pipeline::skybox_vertices, Cubemap, GpuContext, LightsUniform, MeshPipeline,
    MeshVertex, MoveDirection, RenderParams, SkyboxPipeline, Texture,
};
use geometry::{coin_mesh, MeshBatch};
use scene::SceneDescriptor;
use state::AppState;

const SETTINGS_PATH: &str = "assets/program_state.txt";
const SCENE_PATH: &str = "assets/scenes/courtyard.json";

const BRICK_MATERIAL: &str = "bricks";
const MYSTERY_MATERIAL: &str = "mystery";
const COIN_MATERIAL: &str = "coin";
const GROUND_MATERIAL: &str = "ground";

const COIN_SCALE: f32 = 0.1;
const COIN_SPIN_RATE: f32 = 5.0;
const COIN_SEGMENTS: u32 = 24;

/// All mutable application state lives here. Constructed lazily in
/// `ApplicationHandler::resumed` once the window and GPU surface exist.
struct DemoState {
    window: Arc<Window>,
    gpu: GpuContext,
    time: TimeState,
    input: InputState,
    app: AppState,
    scene: SceneDescriptor,
    dir_light: DirectionalLight,
    spot_light: SpotLight,

    mesh_pipeline: MeshPipeline,
    skybox_pipeline: SkyboxPipeline,
    debug_overlay: DebugOverlay,

    materials: HashMap<Arc<str>, wgpu::BindGroup>,
    coin_vertices: Vec<MeshVertex>,
    coin_indices: Vec<u32>,

    // --- Per-frame GPU mesh state --------------------------------------------
    // The world mesh is rebuilt on the CPU each frame, then streamed into
    // these GPU buffers. Buffers grow (power-of-two) but never shrink.
    batch: MeshBatch,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    mesh_vertex_capacity: usize,
    mesh_index_capacity: usize,

    camera_buffer: wgpu::Buffer,
    lights_buffer: wgpu::Buffer,
    params_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,

    sky_vertex_buffer: wgpu::Buffer,
    sky_uniform_buffer: wgpu::Buffer,
    sky_frame_bind_group: wgpu::BindGroup,
    sky_cubemap_bind_group: wgpu::BindGroup,
}

impl DemoState {
    fn new(window: Arc<Window>) -> Self {
        let gpu = GpuContext::new(window.clone());
        let time = TimeState::new();
        let input = InputState::new();

        let mut app = AppState::default();
        app.load_from_file(Path::new(SETTINGS_PATH));
        let scene = scene::load_or_default(Path::new(SCENE_PATH));

        let mesh_pipeline = MeshPipeline::new(&gpu.device, gpu.surface_format);
        let skybox_pipeline = SkyboxPipeline::new(&gpu.device, gpu.surface_format);
        let mut debug_overlay = DebugOverlay::new(&gpu.device, gpu.surface_format, &window);

        // A session saved with the overlay open restores with the cursor
        // released; otherwise the window captures it for mouse look.
        if app.overlay_enabled {
            debug_overlay.visible = true;
            app.mouse_look_enabled = false;
        }
        set_mouse_capture(&window, !app.overlay_enabled);

        let materials = load_materials(&gpu.device, &gpu.queue, &mesh_pipeline);
        let (coin_vertices, coin_indices) = coin_mesh(1.0, 0.15, COIN_SEGMENTS);

        let mesh_vertex_capacity = 4096;
        let mesh_index_capacity = 8192;
        let vertex_buffer = create_vertex_buffer(&gpu.device, mesh_vertex_capacity);
        let index_buffer = create_index_buffer(&gpu.device, mesh_index_capacity);

        let camera_buffer = create_uniform_buffer::<cy_render::CameraUniform>(
            &gpu.device,
            "Camera Uniform Buffer",
        );
        let lights_buffer =
            create_uniform_buffer::<LightsUniform>(&gpu.device, "Lights Uniform Buffer");
        let params_buffer =
            create_uniform_buffer::<RenderParams>(&gpu.device, "Params Uniform Buffer");
        let frame_bind_group = mesh_pipeline.create_frame_bind_group(
            &gpu.device,
            &camera_buffer,
            &lights_buffer,
            &params_buffer,
        );

        let sky_vertex_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Skybox Vertex Buffer"),
                contents: bytemuck::cast_slice(&skybox_vertices()),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let sky_uniform_buffer = create_uniform_buffer::<cy_render::SkyboxUniform>(
            &gpu.device,
            "Skybox Uniform Buffer",
        );
        let sky_frame_bind_group =
            skybox_pipeline.create_frame_bind_group(&gpu.device, &sky_uniform_buffer);
        let cubemap = Cubemap::load(
            &gpu.device,
            &gpu.queue,
            &[
                "assets/textures/skybox/right.png",
                "assets/textures/skybox/left.png",
                "assets/textures/skybox/top.png",
                "assets/textures/skybox/bottom.png",
                "assets/textures/skybox/front.png",
                "assets/textures/skybox/back.png",
            ],
        );
        let sky_cubemap_bind_group =
            skybox_pipeline.create_cubemap_bind_group(&gpu.device, &cubemap);

        Self {
            window,
            gpu,
            time,
            input,
            app,
            scene,
            dir_light: DirectionalLight::default(),
            spot_light: SpotLight::default(),
            mesh_pipeline,
            skybox_pipeline,
            debug_overlay,
            materials,
            coin_vertices,
            coin_indices,
            batch: MeshBatch::new(),
            vertex_buffer,
            index_buffer,
            mesh_vertex_capacity,
            mesh_index_capacity,
            camera_buffer,
            lights_buffer,
            params_buffer,
            frame_bind_group,
            sky_vertex_buffer,
            sky_uniform_buffer,
            sky_frame_bind_group,
            sky_cubemap_bind_group,
        }
    }

    fn apply_camera_movement(&mut self, dt: f32) {
        if self.input.is_held(Key::W) {
            self.app.camera.process_keyboard(MoveDirection::Forward, dt);
        }
        if self.input.is_held(Key::S) {
            self.app
                .camera
                .process_keyboard(MoveDirection::Backward, dt);
        }
        if self.input.is_held(Key::A) {
            self.app.camera.process_keyboard(MoveDirection::Left, dt);
        }
        if self.input.is_held(Key::D) {
            self.app.camera.process_keyboard(MoveDirection::Right, dt);
        }
    }

    /// Rebuild the world mesh for this frame. Geometry is emitted grouped by
    /// material so runs collapse into single draw calls.
    fn rebuild_world_mesh(&mut self) {
        self.batch.clear();

        if let Some(ground) = self.scene.ground {
            self.batch.push_cube(
                Vec3::from(ground.position),
                self.scene.cube_size * ground.scale,
                GROUND_MATERIAL,
            );
        }
        for position in &self.scene.brick_cubes {
            self.batch
                .push_cube(Vec3::from(*position), self.scene.cube_size, BRICK_MATERIAL);
        }
        for position in &self.scene.mystery_cubes {
            self.batch.push_cube(
                Vec3::from(*position),
                self.scene.cube_size,
                MYSTERY_MATERIAL,
            );
        }

        // Coins bob on a cosine of absolute time and spin about their own
        // axis, so the motion stays continuous across frame-rate changes.
        let t = self.time.total_time as f32;
        let bob = Vec3::new(0.0, (t).cos() / 2.0, 0.0);
        for position in &self.scene.coins {
            let transform = Mat4::from_translation(Vec3::from(*position) + bob)
                * Mat4::from_scale(Vec3::splat(COIN_SCALE))
                * Mat4::from_rotation_y(COIN_SPIN_RATE * t);
            self.batch.push_mesh(
                &self.coin_vertices,
                &self.coin_indices,
                transform,
                COIN_MATERIAL,
            );
        }

        self.ensure_mesh_capacity();
        if !self.batch.vertices.is_empty() {
            self.gpu.queue.write_buffer(
                &self.vertex_buffer,
                0,
                bytemuck::cast_slice(&self.batch.vertices),
            );
        }
        if !self.batch.indices.is_empty() {
            self.gpu.queue.write_buffer(
                &self.index_buffer,
                0,
                bytemuck::cast_slice(&self.batch.indices),
            );
        }
    }

    fn ensure_mesh_capacity(&mut self) {
        if self.batch.vertices.len() > self.mesh_vertex_capacity {
            self.mesh_vertex_capacity = self.batch.vertices.len().next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(&self.gpu.device, self.mesh_vertex_capacity);
            log::debug!("Vertex buffer grown to {}", self.mesh_vertex_capacity);
        }
        if self.batch.indices.len() > self.mesh_index_capacity {
            self.mesh_index_capacity = self.batch.indices.len().next_power_of_two();
            self.index_buffer = create_index_buffer(&self.gpu.device, self.mesh_index_capacity);
            log::debug!("Index buffer grown to {}", self.mesh_index_capacity);
        }
    }

    fn upload_uniforms(&self) {
        let aspect = self.gpu.aspect_ratio();
        self.gpu.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.app.camera.build_uniform(aspect)]),
        );
        self.gpu.queue.write_buffer(
            &self.sky_uniform_buffer,
            0,
            bytemuck::cast_slice(&[self.app.camera.build_skybox_uniform(aspect)]),
        );
        let lights = LightsUniform::pack(&self.dir_light, &self.app.point_light, &self.spot_light);
        self.gpu
            .queue
            .write_buffer(&self.lights_buffer, 0, bytemuck::cast_slice(&[lights]));
        let params = RenderParams {
            height_scale: self.scene.parallax_height_scale,
            ..RenderParams::default()
        };
        self.gpu
            .queue
            .write_buffer(&self.params_buffer, 0, bytemuck::cast_slice(&[params]));
    }
}

struct App {
    config: PlatformConfig,
    state: Option<DemoState>,
}

impl App {
    fn new() -> Self {
        Self {
            config: PlatformConfig::default(),
            state: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let window = cy_platform::window::create_window(event_loop, &self.config);
        log::info!(
            "Window created: {}x{}",
            self.config.width,
            self.config.height
        );
        self.state = Some(DemoState::new(window));
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }

    // Mouse look must use raw motion, not `CursorMoved`: a Locked grab
    // freezes the cursor position entirely, and a Confined grab pins it to
    // the window edge, so position deltas die as soon as the cursor is
    // captured. Raw deltas keep flowing in both modes.
    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if let DeviceEvent::MouseMotion { delta } = event {
            if state.app.mouse_look_enabled {
                let (dx, dy) = mouse_look_delta(delta);
                state.app.camera.process_mouse_movement(dx, dy);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let state = match self.state.as_mut() {
            Some(s) => s,
            None => return,
        };

        let egui_consumed = state
            .debug_overlay
            .handle_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                let w = physical_size.width;
                let h = physical_size.height;
                if w > 0 && h > 0 {
                    state.gpu.resize(w, h);
                    log::info!("Resized to {}x{}", w, h);
                }
            }

            WindowEvent::KeyboardInput { event, .. } if !egui_consumed => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    if let Some(key) = map_key(key_code) {
                        match event.state {
                            ElementState::Pressed => state.input.key_down(key),
                            ElementState::Released => state.input.key_up(key),
                        }
                    }
                }
            }

            // Camera look runs on raw deltas in `device_event`; the cursor
            // position only matters to egui and the telemetry readout.
            WindowEvent::CursorMoved { position, .. } => {
                state.input.cursor_position = (position.x, position.y);
            }

            WindowEvent::MouseWheel { delta, .. } if !egui_consumed => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => (pos.y / 20.0) as f32,
                };
                state.app.camera.process_mouse_scroll(dy);
            }

            WindowEvent::RedrawRequested => {
                if state.gpu.size.0 == 0 || state.gpu.size.1 == 0 {
                    return;
                }

                state.time.begin_frame();

                if state.input.is_just_pressed(Key::Escape) {
                    event_loop.exit();
                    return;
                }
                if state.input.is_just_pressed(Key::F1) {
                    state.debug_overlay.toggle();
                    if state.debug_overlay.visible {
                        // Opening the overlay frees the cursor for the UI.
                        state.app.mouse_look_enabled = false;
                        set_mouse_capture(&state.window, false);
                    } else {
                        // Closing it recaptures the cursor, but mouse look
                        // stays off until re-enabled from the Camera window.
                        set_mouse_capture(&state.window, true);
                    }
                }
                state.app.overlay_enabled = state.debug_overlay.visible;

                state.apply_camera_movement(state.time.real_dt as f32);
                state.rebuild_world_mesh();
                state.upload_uniforms();

                let Some((output, view)) = state.gpu.begin_frame() else {
                    return;
                };

                let stats = OverlayStats {
                    draw_calls: state.batch.draw_calls.len() as u32,
                    vertex_count: state.batch.vertices.len() as u32,
                    quad_count: state.batch.quad_count as u32,
                };
                let telemetry = CameraTelemetry {
                    position: state.app.camera.position,
                    yaw: state.app.camera.yaw(),
                    pitch: state.app.camera.pitch(),
                    front: state.app.camera.front(),
                };
                let mut params = OverlayParams {
                    clear_color: &mut state.app.clear_color,
                    model_offset: &mut state.app.model_offset,
                    model_scale: &mut state.app.model_scale,
                    point_light: &mut state.app.point_light,
                    mouse_look_enabled: &mut state.app.mouse_look_enabled,
                    camera: telemetry,
                };
                let (egui_primitives, egui_textures_delta) =
                    state
                        .debug_overlay
                        .prepare(&state.window, &state.time, &stats, &mut params);

                let screen_descriptor = egui_wgpu::ScreenDescriptor {
                    size_in_pixels: [state.gpu.size.0, state.gpu.size.1],
                    pixels_per_point: state.window.scale_factor() as f32,
                };

                let mut encoder =
                    state
                        .gpu
                        .device
                        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("Render Encoder"),
                        });

                {
                    let [r, g, b] = state.app.clear_color;
                    let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                        label: Some("Scene Render Pass"),
                        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color {
                                    r: r as f64,
                                    g: g as f64,
                                    b: b as f64,
                                    a: 1.0,
                                }),
                                store: wgpu::StoreOp::Store,
                            },
                        })],
                        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                            view: &state.gpu.depth_view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        }),
                        ..Default::default()
                    });

                    render_pass.set_pipeline(&state.mesh_pipeline.render_pipeline);
                    render_pass.set_bind_group(0, &state.frame_bind_group, &[]);
                    render_pass.set_vertex_buffer(0, state.vertex_buffer.slice(..));
                    render_pass
                        .set_index_buffer(state.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

                    let mut last_bound_material: Option<&Arc<str>> = None;
                    for draw in &state.batch.draw_calls {
                        if let Some(bind_group) = state.materials.get(&draw.material_key) {
                            let need_rebind = match last_bound_material {
                                Some(last) => **last != *draw.material_key,
                                None => true,
                            };
                            if need_rebind {
                                render_pass.set_bind_group(1, bind_group, &[]);
                                last_bound_material = Some(&draw.material_key);
                            }
                            render_pass.draw_indexed(
                                draw.index_start..(draw.index_start + draw.index_count),
                                0,
                                0..1,
                            );
                        } else {
                            log::warn!("No material '{}' for draw call", draw.material_key);
                        }
                    }

                    // Skybox last: the LessEqual depth test keeps it behind
                    // everything already drawn.
                    if state.scene.draw_skybox {
                        render_pass.set_pipeline(&state.skybox_pipeline.render_pipeline);
                        render_pass.set_bind_group(0, &state.sky_frame_bind_group, &[]);
                        render_pass.set_bind_group(1, &state.sky_cubemap_bind_group, &[]);
                        render_pass.set_vertex_buffer(0, state.sky_vertex_buffer.slice(..));
                        render_pass.draw(0..36, 0..1);
                    }
                }

                state.debug_overlay.upload(
                    &state.gpu.device,
                    &state.gpu.queue,
                    &mut encoder,
                    &egui_primitives,
                    &egui_textures_delta,
                    &screen_descriptor,
                );

                {
                    let mut egui_pass = encoder
                        .begin_render_pass(&wgpu::RenderPassDescriptor {
                            label: Some("egui Render Pass"),
                            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                                view: &view,
                                resolve_target: None,
                                ops: wgpu::Operations {
                                    load: wgpu::LoadOp::Load,
                                    store: wgpu::StoreOp::Store,
                                },
                            })],
                            depth_stencil_attachment: None,
                            ..Default::default()
                        })
                        .forget_lifetime();

                    state
                        .debug_overlay
                        .paint(&mut egui_pass, &egui_primitives, &screen_descriptor);
                }

                state.debug_overlay.cleanup(&egui_textures_delta);

                state.gpu.queue.submit(std::iter::once(encoder.finish()));
                output.present();

                state.input.end_frame();
            }

            _ => {}
        }
    }
}

fn create_vertex_buffer(device: &wgpu::Device, vertex_capacity: usize) -> wgpu::Buffer {
    let byte_len = (vertex_capacity * std::mem::size_of::<MeshVertex>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("World Vertex Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_index_buffer(device: &wgpu::Device, index_capacity: usize) -> wgpu::Buffer {
    let byte_len = (index_capacity * std::mem::size_of::<u32>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("World Index Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_uniform_buffer<T>(device: &wgpu::Device, label: &str) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: std::mem::size_of::<T>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Build the four fixed materials. Any missing texture file degrades to a
/// flat color or checkerboard, so the demo always starts.
fn load_materials(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    pipeline: &MeshPipeline,
) -> HashMap<Arc<str>, wgpu::BindGroup> {
    // Neutral maps for materials without dedicated textures: a straight-up
    // tangent-space normal and a zero-displacement height field.
    let flat_normal = Texture::flat_color(device, queue, [128, 128, 255, 255], "flat_normal");
    let flat_height = Texture::flat_color(device, queue, [0, 0, 0, 255], "flat_height");
    let dim_specular = Texture::flat_color(device, queue, [80, 80, 80, 255], "dim_specular");

    let mut materials = HashMap::new();

    let brick_diffuse = Texture::load_or_fallback(device, queue, "assets/textures/bricks.png");
    let brick_normal =
        Texture::load_or_fallback(device, queue, "assets/textures/bricks_normal.png");
    let brick_height =
        Texture::load_or_fallback(device, queue, "assets/textures/bricks_height.png");
    materials.insert(
        Arc::from(BRICK_MATERIAL),
        pipeline.create_material_bind_group(
            device,
            &brick_diffuse,
            &dim_specular,
            &brick_normal,
            &brick_height,
        ),
    );

    let mystery_diffuse =
        Texture::load_or_fallback(device, queue, "assets/textures/mystery_block.png");
    materials.insert(
        Arc::from(MYSTERY_MATERIAL),
        pipeline.create_material_bind_group(
            device,
            &mystery_diffuse,
            &dim_specular,
            &flat_normal,
            &flat_height,
        ),
    );

    let coin_diffuse = Texture::load_or_fallback(device, queue, "assets/textures/coin.png");
    let coin_specular = Texture::flat_color(device, queue, [200, 180, 90, 255], "coin_specular");
    materials.insert(
        Arc::from(COIN_MATERIAL),
        pipeline.create_material_bind_group(
            device,
            &coin_diffuse,
            &coin_specular,
            &flat_normal,
            &flat_height,
        ),
    );

    let ground_diffuse = Texture::load_or_fallback(device, queue, "assets/textures/ground.png");
    materials.insert(
        Arc::from(GROUND_MATERIAL),
        pipeline.create_material_bind_group(
            device,
            &ground_diffuse,
            &dim_specular,
            &flat_normal,
            &flat_height,
        ),
    );

    materials
}

/// Raw device deltas use the screen convention (positive y is downward);
/// the camera wants positive dy for upward motion.
fn mouse_look_delta(delta: (f64, f64)) -> (f32, f32) {
    (delta.0 as f32, -delta.1 as f32)
}

fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::KeyW => Some(Key::W),
        KeyCode::KeyA => Some(Key::A),
        KeyCode::KeyS => Some(Key::S),
        KeyCode::KeyD => Some(Key::D),
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::F1 => Some(Key::F1),
        _ => None,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Coinyard starting...");

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app).expect("Event loop error");
}

#[cfg(test)]
mod tests {
    use super::*;
    use cy_render::FlyCamera;

    #[test]
    fn raw_mouse_delta_flips_screen_y() {
        let (dx, dy) = mouse_look_delta((3.0, -4.0));
        assert_eq!(dx, 3.0);
        assert_eq!(dy, 4.0);
    }

    #[test]
    fn raw_upward_motion_raises_pitch() {
        // Raw motion reports upward movement as negative y; after the flip
        // the camera must pitch up.
        let mut camera = FlyCamera::default();
        let (dx, dy) = mouse_look_delta((0.0, -20.0));
        camera.process_mouse_movement(dx, dy);
        assert!(camera.pitch() > 0.0);
        assert!(camera.front().y > 0.0);
    }
}
