use super::*;
use crate::camera::SceneCamera;
use crate::device::context::{
    GraphicsContext, PixelFormat, TextureFilter, TextureStorageDesc, TextureWrap,
};
use crate::device::mock_context::MockContext;
use crate::rendering::test_shaders::{new_log, RecordingWaterShader};
use glam::Vec3;

fn test_light() -> Light {
    Light::new(
        Vec3::new(0.3, -1.0, 0.5),
        Vec3::new(1.0, 0.95, 0.95),
        glam::Vec2::new(0.3, 0.8),
    )
}

fn test_texture(ctx: &mut MockContext) -> ResourceId {
    ctx.create_texture_2d(&TextureStorageDesc {
        width: 64,
        height: 64,
        format: PixelFormat::RGBA8,
        filter: TextureFilter::Linear,
        wrap: TextureWrap::Repeat,
        depth_role: false,
    })
    .unwrap()
}

struct Setup {
    ctx: MockContext,
    water: WaterTile,
    reflection: ResourceId,
    refraction: ResourceId,
    depth: ResourceId,
}

fn setup() -> Setup {
    let mut ctx = MockContext::new();
    let water = WaterTile::generate(&mut ctx, 2, -1.0).unwrap();
    let reflection = test_texture(&mut ctx);
    let refraction = test_texture(&mut ctx);
    let depth = test_texture(&mut ctx);
    Setup {
        ctx,
        water,
        reflection,
        refraction,
        depth,
    }
}

#[test]
fn test_render_binds_textures_to_fixed_units() {
    let mut s = setup();
    let mut renderer = WaterRenderer::new(Box::new(RecordingWaterShader { calls: new_log() }));
    let camera = SceneCamera::new(16.0 / 9.0, -1.0);

    renderer
        .render(
            &mut s.ctx,
            &s.water,
            &camera,
            &test_light(),
            s.reflection,
            s.refraction,
            s.depth,
        )
        .unwrap();

    s.ctx
        .index_of(&format!("BindTextureToUnit({}, 0)", s.reflection.raw()));
    s.ctx
        .index_of(&format!("BindTextureToUnit({}, 1)", s.refraction.raw()));
    s.ctx
        .index_of(&format!("BindTextureToUnit({}, 2)", s.depth.raw()));
}

#[test]
fn test_alpha_blending_wraps_the_draw() {
    let mut s = setup();
    let mut renderer = WaterRenderer::new(Box::new(RecordingWaterShader { calls: new_log() }));
    let camera = SceneCamera::new(16.0 / 9.0, -1.0);

    renderer
        .render(
            &mut s.ctx,
            &s.water,
            &camera,
            &test_light(),
            s.reflection,
            s.refraction,
            s.depth,
        )
        .unwrap();

    let enable = s.ctx.index_of("SetAlphaBlending(true)");
    let draw = s.ctx.index_of("DrawArrays(24)");
    let disable = s.ctx.index_of("SetAlphaBlending(false)");
    assert!(enable < draw);
    assert!(draw < disable);
}

#[test]
fn test_wave_time_advances_once_per_render() {
    let mut s = setup();
    let calls = new_log();
    let mut renderer = WaterRenderer::new(Box::new(RecordingWaterShader {
        calls: calls.clone(),
    }));
    let camera = SceneCamera::new(16.0 / 9.0, -1.0);

    assert_eq!(renderer.wave_time(), 0.0);
    for _ in 0..3 {
        renderer
            .render(
                &mut s.ctx,
                &s.water,
                &camera,
                &test_light(),
                s.reflection,
                s.refraction,
                s.depth,
            )
            .unwrap();
    }
    assert!((renderer.wave_time() - 0.006).abs() < 1e-6);

    let calls = calls.borrow();
    assert_eq!(calls[0], "water.start");
    assert!(calls[1].starts_with("water.wave_time(0.002"));
}

#[test]
fn test_shader_receives_height_and_camera() {
    let mut s = setup();
    let calls = new_log();
    let mut renderer = WaterRenderer::new(Box::new(RecordingWaterShader {
        calls: calls.clone(),
    }));
    let camera = SceneCamera::new(16.0 / 9.0, -1.0);

    renderer
        .render(
            &mut s.ctx,
            &s.water,
            &camera,
            &test_light(),
            s.reflection,
            s.refraction,
            s.depth,
        )
        .unwrap();

    let calls = calls.borrow();
    assert!(calls.contains(&"water.height(-1)".to_string()));
    assert!(calls.contains(&"water.camera(pos: (0, 0, 0), near_far: (0.4, 2500))".to_string()));
}
