/*!
# Lowpoly Water Demo

Procedural low-poly terrain with animated reflective water, rendered
through the lowpoly water engine's three-pass pipeline on the OpenGL
backend. The camera orbits the island automatically; close the window to
quit.
*/

mod configs;
mod terrain_gen;

use std::num::NonZeroU32;

use glam::Vec3;
use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, PossiblyCurrentContext, Version};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::prelude::{GlConfig, GlSurface, NotCurrentGlContext};
use glutin::surface::{Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use lowpoly_water_engine::lowpoly::camera::SceneCamera;
use lowpoly_water_engine::lowpoly::device::GraphicsContext;
use lowpoly_water_engine::lowpoly::render::RenderEngine;
use lowpoly_water_engine::lowpoly::scene::{Light, Terrain, WaterTile};
use lowpoly_water_engine::lowpoly::Engine;
use lowpoly_water_engine::{engine_error, engine_info};
use lowpoly_water_engine_renderer_gl::{GlContext, GlTerrainShader, GlWaterShader};

/// Degrees the camera orbits per frame
const ORBIT_SPEED: f32 = 0.05;
const ORBIT_PITCH: f32 = 22.0;
const ORBIT_DISTANCE: f32 = 110.0;

/// Everything that only exists while the window is alive
struct SceneState {
    window: Window,
    gl_surface: Surface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    ctx: GlContext,
    engine: RenderEngine,
    terrain: Terrain,
    water: WaterTile,
    camera: SceneCamera,
    light: Light,
    orbit_angle: f32,
}

#[derive(Default)]
struct DemoApp {
    state: Option<SceneState>,
}

impl DemoApp {
    fn init_scene(&mut self, event_loop: &ActiveEventLoop) -> Result<(), Box<dyn std::error::Error>> {
        let window_attributes = WindowAttributes::default()
            .with_title("Lowpoly Water")
            .with_inner_size(PhysicalSize::new(configs::WIDTH, configs::HEIGHT));

        // Pick a multisampled config so the main pass gets antialiasing
        let template = ConfigTemplateBuilder::new().with_multisampling(4);
        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(window_attributes))
            .build(event_loop, template, |candidates| {
                candidates
                    .reduce(|best, next| {
                        if next.num_samples() > best.num_samples() {
                            next
                        } else {
                            best
                        }
                    })
                    .expect("no GL config found")
            })?;
        let window = window.ok_or("display builder returned no window")?;
        let gl_display = gl_config.display();

        let raw_window_handle = window.window_handle()?.as_raw();
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(Some(raw_window_handle));
        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes)? };

        let surface_attributes = window.build_surface_attributes(Default::default())?;
        let gl_surface =
            unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes)? };
        let gl_context = not_current.make_current(&gl_surface)?;
        if let Err(error) =
            gl_surface.set_swap_interval(&gl_context, SwapInterval::Wait(NonZeroU32::new(1).unwrap()))
        {
            engine_error!("demo", "vsync not available: {}", error);
        }

        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|name| gl_display.get_proc_address(name))
        };

        let size = window.inner_size();
        let mut ctx = GlContext::new(gl, size.width, size.height);

        let terrain_shader = GlTerrainShader::new(ctx.gl())?;
        let water_shader = GlWaterShader::new(ctx.gl())?;
        let engine = RenderEngine::new(&mut ctx, Box::new(terrain_shader), Box::new(water_shader))?;

        let terrain = terrain_gen::generate_terrain(&mut ctx, configs::WORLD_SIZE)?;
        let water = WaterTile::generate(&mut ctx, configs::WORLD_SIZE, configs::WATER_HEIGHT)?;

        let camera = SceneCamera::new(
            size.width as f32 / size.height as f32,
            configs::WATER_HEIGHT,
        );
        let light = Light::new(
            configs::LIGHT_DIRECTION,
            configs::LIGHT_COLOR,
            configs::LIGHT_BIAS,
        );

        engine_info!("demo", "Scene ready: {0}x{0} world", configs::WORLD_SIZE);
        self.state = Some(SceneState {
            window,
            gl_surface,
            gl_context,
            ctx,
            engine,
            terrain,
            water,
            camera,
            light,
            orbit_angle: 0.0,
        });
        Ok(())
    }
}

impl SceneState {
    /// Advance the turntable camera one step
    fn move_camera(&mut self) {
        self.orbit_angle = (self.orbit_angle + ORBIT_SPEED) % 360.0;
        let angle = self.orbit_angle.to_radians();
        let center = Vec3::new(
            configs::WORLD_SIZE as f32 / 2.0,
            0.0,
            configs::WORLD_SIZE as f32 / 2.0,
        );
        let horizontal = ORBIT_DISTANCE * ORBIT_PITCH.to_radians().cos();
        let vertical = ORBIT_DISTANCE * ORBIT_PITCH.to_radians().sin();
        let offset = Vec3::new(horizontal * angle.sin(), vertical, horizontal * angle.cos());
        self.camera.set_position(center + offset);
        self.camera.set_pitch(ORBIT_PITCH);
        self.camera.set_yaw(-self.orbit_angle);
    }

    fn render_frame(&mut self) {
        self.move_camera();
        if let Err(error) = self.engine.render(
            &mut self.ctx,
            &self.terrain,
            &self.water,
            &mut self.camera,
            &self.light,
        ) {
            engine_error!("demo", "frame failed: {}", error);
        }
        if let Err(error) = self.gl_surface.swap_buffers(&self.gl_context) {
            engine_error!("demo", "swap failed: {}", error);
        }
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.gl_surface.resize(
            &self.gl_context,
            NonZeroU32::new(size.width).unwrap(),
            NonZeroU32::new(size.height).unwrap(),
        );
        self.ctx.set_surface_size(size.width, size.height);
        self.camera
            .set_aspect_ratio(size.width as f32 / size.height as f32);
    }

    /// Release GPU resources in reverse creation order
    fn shutdown(self) {
        let SceneState {
            engine,
            terrain,
            water,
            mut ctx,
            ..
        } = self;
        if let Err(error) = water.delete(&mut ctx) {
            engine_error!("demo", "water cleanup failed: {}", error);
        }
        if let Err(error) = terrain.delete(&mut ctx) {
            engine_error!("demo", "terrain cleanup failed: {}", error);
        }
        if let Err(error) = engine.close(&mut ctx) {
            engine_error!("demo", "engine cleanup failed: {}", error);
        }
    }
}

impl ApplicationHandler for DemoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        if let Err(error) = self.init_scene(event_loop) {
            engine_error!("demo", "initialization failed: {}", error);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                if let Some(state) = self.state.take() {
                    state.shutdown();
                }
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(state) = self.state.as_mut() {
                    state.resize(size);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(state) = self.state.as_mut() {
                    state.render_frame();
                    state.window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    Engine::initialize()?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = DemoApp::default();
    event_loop.run_app(&mut app)?;

    Engine::shutdown();
    Ok(())
}
