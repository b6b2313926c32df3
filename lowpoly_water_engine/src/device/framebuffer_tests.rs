use super::*;
use crate::device::attachment::Attachment;
use crate::device::context::PixelFormat;
use crate::device::mock_context::MockContext;

fn color_depth_fbo(ctx: &mut MockContext, width: u32, height: u32) -> Fbo {
    FboConfig::new()
        .add_color_attachment(0, Attachment::texture(PixelFormat::RGBA8))
        .add_depth_attachment(Attachment::render_buffer(PixelFormat::DEPTH_COMPONENT24))
        .build(ctx, width, height, 0)
        .unwrap()
}

fn color_only_fbo(ctx: &mut MockContext, width: u32, height: u32) -> Fbo {
    FboConfig::new()
        .add_color_attachment(0, Attachment::texture(PixelFormat::RGBA8))
        .build(ctx, width, height, 0)
        .unwrap()
}

// ============================================================================
// Build
// ============================================================================

#[test]
fn test_build_initializes_attachments_while_bound() {
    let mut ctx = MockContext::new();
    let fbo = color_depth_fbo(&mut ctx, 1280, 720);

    assert_eq!(fbo.width(), 1280);
    assert_eq!(fbo.height(), 720);
    assert!(fbo.has_depth());
    assert_eq!(ctx.created_framebuffers.len(), 1);
    assert_eq!(ctx.created_textures.len(), 1);
    assert_eq!(ctx.created_render_buffers.len(), 1);

    // Attachments are created between bind and unbind of the new FBO
    let bind = ctx.index_of("BindFramebuffer(1)");
    let attach_color = ctx.index_of("AttachTexture2d(Color(0), 2)");
    let attach_depth = ctx.index_of("AttachRenderBuffer(Depth, 3)");
    let unbind = ctx.index_of("BindFramebuffer(default)");
    assert!(bind < attach_color);
    assert!(attach_color < attach_depth);
    assert!(attach_depth < unbind);
}

#[test]
fn test_build_leaves_default_surface_bound() {
    let mut ctx = MockContext::new();
    let _fbo = color_depth_fbo(&mut ctx, 640, 360);
    assert!(ctx.bound_draw().is_none());
    assert!(ctx.bound_read().is_none());
}

#[test]
fn test_build_duplicate_color_slot_fails() {
    let mut ctx = MockContext::new();
    let result = FboConfig::new()
        .add_color_attachment(0, Attachment::texture(PixelFormat::RGBA8))
        .add_color_attachment(0, Attachment::texture(PixelFormat::RGBA8))
        .build(&mut ctx, 64, 64, 0);
    assert!(result.is_err());
    // The failed build must not leave the new framebuffer bound
    assert!(ctx.bound_draw().is_none());
}

#[test]
fn test_color_and_depth_buffer_getters() {
    let mut ctx = MockContext::new();
    let fbo = color_depth_fbo(&mut ctx, 64, 64);

    let color = fbo.color_buffer(0).unwrap();
    let depth = fbo.depth_buffer().unwrap();
    assert_ne!(color, depth);
    assert_ne!(color.raw(), 0);
    assert_ne!(depth.raw(), 0);
    assert!(fbo.color_buffer(1).is_err());

    let color_only = color_only_fbo(&mut ctx, 64, 64);
    assert!(color_only.depth_buffer().is_err());
}

// ============================================================================
// Bind / unbind for rendering
// ============================================================================

#[test]
fn test_bind_for_render_sets_viewport_to_fbo() {
    let mut ctx = MockContext::with_surface(1280, 720);
    let fbo = color_depth_fbo(&mut ctx, 640, 360);

    fbo.bind_for_render(&mut ctx, 0).unwrap();
    assert_eq!(ctx.bound_draw(), Some(fbo.id()));
    assert_eq!(ctx.viewport(), (640, 360));

    fbo.unbind_after_render(&mut ctx).unwrap();
    assert!(ctx.bound_draw().is_none());
    assert_eq!(ctx.viewport(), (1280, 720));
}

#[test]
fn test_nested_bind_for_render_fails() {
    let mut ctx = MockContext::new();
    let first = color_depth_fbo(&mut ctx, 64, 64);
    let second = color_depth_fbo(&mut ctx, 64, 64);

    first.bind_for_render(&mut ctx, 0).unwrap();
    assert!(second.bind_for_render(&mut ctx, 0).is_err());
    first.unbind_after_render(&mut ctx).unwrap();
}

// ============================================================================
// Blits
// ============================================================================

#[test]
fn test_blit_to_screen_copies_color_only() {
    let mut ctx = MockContext::with_surface(1280, 720);
    let fbo = color_depth_fbo(&mut ctx, 640, 360);

    fbo.blit_to_screen(&mut ctx, 0).unwrap();
    ctx.index_of("BlitFramebuffer(640x360 -> 1280x720, BlitMask(COLOR))");
    assert!(ctx.bound_read().is_none());
    assert!(ctx.bound_draw().is_none());
}

#[test]
fn test_blit_to_fbo_copies_depth_when_both_have_depth() {
    let mut ctx = MockContext::new();
    let src = color_depth_fbo(&mut ctx, 640, 360);
    let dst = color_depth_fbo(&mut ctx, 1280, 720);

    src.blit_to_fbo(&mut ctx, 0, &dst, 0).unwrap();
    ctx.index_of("BlitFramebuffer(640x360 -> 1280x720, BlitMask(COLOR | DEPTH))");
}

#[test]
fn test_blit_to_fbo_skips_depth_when_either_lacks_it() {
    let mut ctx = MockContext::new();
    let src = color_depth_fbo(&mut ctx, 640, 360);
    let dst = color_only_fbo(&mut ctx, 640, 360);

    src.blit_to_fbo(&mut ctx, 0, &dst, 0).unwrap();
    ctx.index_of("BlitFramebuffer(640x360 -> 640x360, BlitMask(COLOR))");

    let src_no_depth = color_only_fbo(&mut ctx, 320, 180);
    let dst_depth = color_depth_fbo(&mut ctx, 640, 360);
    src_no_depth.blit_to_fbo(&mut ctx, 0, &dst_depth, 0).unwrap();
    ctx.index_of("BlitFramebuffer(320x180 -> 640x360, BlitMask(COLOR))");
}

#[test]
fn test_blit_to_fbo_unbinds_both_slots() {
    let mut ctx = MockContext::new();
    let src = color_depth_fbo(&mut ctx, 64, 64);
    let dst = color_depth_fbo(&mut ctx, 64, 64);

    src.blit_to_fbo(&mut ctx, 0, &dst, 0).unwrap();
    assert!(ctx.bound_read().is_none());
    assert!(ctx.bound_draw().is_none());
}

// ============================================================================
// Completeness
// ============================================================================

#[test]
fn test_matching_attachments_are_complete() {
    let mut ctx = MockContext::new();
    let fbo = color_depth_fbo(&mut ctx, 640, 360);
    assert!(fbo.is_complete(&mut ctx).unwrap());
    assert!(ctx.bound_draw().is_none());
}

#[test]
fn test_no_attachments_is_incomplete() {
    let mut ctx = MockContext::new();
    let fbo = FboConfig::new().build(&mut ctx, 64, 64, 0).unwrap();
    assert!(!fbo.is_complete(&mut ctx).unwrap());
}

// ============================================================================
// Release
// ============================================================================

#[test]
fn test_release_deletes_every_resource() {
    let mut ctx = MockContext::new();
    let fbo = color_depth_fbo(&mut ctx, 64, 64);

    fbo.release(&mut ctx).unwrap();
    assert_eq!(ctx.deleted_framebuffers.len(), 1);
    assert_eq!(ctx.deleted_textures.len(), 1);
    assert_eq!(ctx.deleted_render_buffers.len(), 1);
}
