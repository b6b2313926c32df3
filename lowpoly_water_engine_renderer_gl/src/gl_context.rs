/// GlContext - the GraphicsContext implementation over glow
///
/// Owns the loaded GL function table and maps the engine's opaque handles
/// to glow objects. All GL objects live in registries keyed by the raw
/// handle value; handing out a handle for an object that was deleted (or
/// never created here) is reported as an error instead of passed to GL.
use std::rc::Rc;

use glow::HasContext;
use rustc_hash::FxHashMap;

use glam::Vec4;
use lowpoly_water_engine::engine_bail;
use lowpoly_water_engine::lowpoly::device::{
    AttachmentPoint, BlitMask, DrawBuffer, FramebufferId, GraphicsContext, MeshHandle,
    PixelFormat, ProvokingVertex, ResourceId, TextureFilter, TextureStorageDesc, TextureWrap,
    VertexAttribute, VertexLayout,
};
use lowpoly_water_engine::lowpoly::device::AttributeFormat;
use lowpoly_water_engine::lowpoly::{Error, Result};

struct GlMesh {
    vao: glow::VertexArray,
    vertex_buffer: glow::Buffer,
    index_buffer: Option<glow::Buffer>,
}

/// OpenGL graphics context. Thread-affine: must stay on the thread that
/// made the native context current.
pub struct GlContext {
    gl: Rc<glow::Context>,
    surface: (u32, u32),
    next_id: u32,
    framebuffers: FxHashMap<u32, glow::Framebuffer>,
    textures: FxHashMap<u32, glow::Texture>,
    render_buffers: FxHashMap<u32, glow::Renderbuffer>,
    meshes: FxHashMap<u32, GlMesh>,
}

impl GlContext {
    /// Wrap a loaded GL context. `width`/`height` are the initial surface
    /// dimensions in physical pixels.
    pub fn new(gl: glow::Context, width: u32, height: u32) -> Self {
        Self {
            gl: Rc::new(gl),
            surface: (width, height),
            next_id: 1,
            framebuffers: FxHashMap::default(),
            textures: FxHashMap::default(),
            render_buffers: FxHashMap::default(),
            meshes: FxHashMap::default(),
        }
    }

    /// Shared GL function table, used to build the shader programs
    pub fn gl(&self) -> Rc<glow::Context> {
        Rc::clone(&self.gl)
    }

    fn alloc_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn framebuffer(&self, id: FramebufferId) -> Result<glow::Framebuffer> {
        match self.framebuffers.get(&id.raw()) {
            Some(fbo) => Ok(*fbo),
            None => engine_bail!("lowpoly::gl::Context", "unknown framebuffer {}", id.raw()),
        }
    }

    fn texture(&self, id: ResourceId) -> Result<glow::Texture> {
        match self.textures.get(&id.raw()) {
            Some(texture) => Ok(*texture),
            None => engine_bail!("lowpoly::gl::Context", "unknown texture {}", id.raw()),
        }
    }

    fn render_buffer(&self, id: ResourceId) -> Result<glow::Renderbuffer> {
        match self.render_buffers.get(&id.raw()) {
            Some(buffer) => Ok(*buffer),
            None => engine_bail!("lowpoly::gl::Context", "unknown render buffer {}", id.raw()),
        }
    }

    fn set_capability(&self, capability: u32, enabled: bool) {
        unsafe {
            if enabled {
                self.gl.enable(capability);
            } else {
                self.gl.disable(capability);
            }
        }
    }
}

/// `GL_COLOR_ATTACHMENT0 + slot` or `GL_DEPTH_ATTACHMENT`
pub(crate) fn attachment_point_gl(point: AttachmentPoint) -> u32 {
    match point {
        AttachmentPoint::Color(slot) => glow::COLOR_ATTACHMENT0 + slot,
        AttachmentPoint::Depth => glow::DEPTH_ATTACHMENT,
    }
}

pub(crate) fn draw_buffer_gl(buffer: DrawBuffer) -> u32 {
    match buffer {
        DrawBuffer::Back => glow::BACK,
        DrawBuffer::Color(slot) => glow::COLOR_ATTACHMENT0 + slot,
    }
}

pub(crate) fn blit_mask_gl(mask: BlitMask) -> u32 {
    let mut bits = 0;
    if mask.contains(BlitMask::COLOR) {
        bits |= glow::COLOR_BUFFER_BIT;
    }
    if mask.contains(BlitMask::DEPTH) {
        bits |= glow::DEPTH_BUFFER_BIT;
    }
    bits
}

/// Internal format for texture and render buffer storage
pub(crate) fn pixel_format_gl(format: PixelFormat) -> u32 {
    match format {
        PixelFormat::RGBA8 => glow::RGBA8,
        PixelFormat::DEPTH_COMPONENT24 => glow::DEPTH_COMPONENT24,
    }
}

/// Upload format and data type matching an internal format
pub(crate) fn upload_format_gl(format: PixelFormat) -> (u32, u32) {
    match format {
        PixelFormat::RGBA8 => (glow::RGBA, glow::UNSIGNED_BYTE),
        PixelFormat::DEPTH_COMPONENT24 => (glow::DEPTH_COMPONENT, glow::FLOAT),
    }
}

/// Component count, GL data type and normalization flag of an attribute
pub(crate) fn attribute_format_gl(format: AttributeFormat) -> (i32, u32, bool) {
    match format {
        AttributeFormat::F32x2 => (2, glow::FLOAT, false),
        AttributeFormat::F32x3 => (3, glow::FLOAT, false),
        AttributeFormat::I8x4 => (4, glow::BYTE, false),
        AttributeFormat::U8x4_NORM => (4, glow::UNSIGNED_BYTE, true),
        AttributeFormat::INT_2_10_10_10_REV_NORM => (4, glow::INT_2_10_10_10_REV, true),
    }
}

pub(crate) fn texture_filter_gl(filter: TextureFilter) -> i32 {
    match filter {
        TextureFilter::Nearest => glow::NEAREST as i32,
        TextureFilter::Linear => glow::LINEAR as i32,
    }
}

pub(crate) fn texture_wrap_gl(wrap: TextureWrap) -> i32 {
    match wrap {
        TextureWrap::ClampToEdge => glow::CLAMP_TO_EDGE as i32,
        TextureWrap::Repeat => glow::REPEAT as i32,
    }
}

impl GraphicsContext for GlContext {
    // ===== FRAMEBUFFER OBJECTS =====

    fn create_framebuffer(&mut self) -> Result<FramebufferId> {
        let fbo = unsafe { self.gl.create_framebuffer() }.map_err(Error::BackendError)?;
        let id = self.alloc_id();
        self.framebuffers.insert(id, fbo);
        Ok(FramebufferId::new(id))
    }

    fn delete_framebuffer(&mut self, fbo: FramebufferId) -> Result<()> {
        let Some(handle) = self.framebuffers.remove(&fbo.raw()) else {
            engine_bail!("lowpoly::gl::Context", "delete of unknown framebuffer {}", fbo.raw());
        };
        unsafe { self.gl.delete_framebuffer(handle) };
        Ok(())
    }

    fn bind_framebuffer(&mut self, fbo: Option<FramebufferId>) -> Result<()> {
        let handle = fbo.map(|id| self.framebuffer(id)).transpose()?;
        unsafe { self.gl.bind_framebuffer(glow::FRAMEBUFFER, handle) };
        Ok(())
    }

    fn bind_draw_framebuffer(&mut self, fbo: Option<FramebufferId>) -> Result<()> {
        let handle = fbo.map(|id| self.framebuffer(id)).transpose()?;
        unsafe { self.gl.bind_framebuffer(glow::DRAW_FRAMEBUFFER, handle) };
        Ok(())
    }

    fn bind_read_framebuffer(&mut self, fbo: Option<FramebufferId>) -> Result<()> {
        let handle = fbo.map(|id| self.framebuffer(id)).transpose()?;
        unsafe { self.gl.bind_framebuffer(glow::READ_FRAMEBUFFER, handle) };
        Ok(())
    }

    fn set_draw_buffer(&mut self, buffer: DrawBuffer) -> Result<()> {
        unsafe { self.gl.draw_buffer(draw_buffer_gl(buffer)) };
        Ok(())
    }

    fn set_read_buffer(&mut self, buffer: DrawBuffer) -> Result<()> {
        unsafe { self.gl.read_buffer(draw_buffer_gl(buffer)) };
        Ok(())
    }

    fn framebuffer_complete(&mut self) -> Result<bool> {
        let status = unsafe { self.gl.check_framebuffer_status(glow::FRAMEBUFFER) };
        Ok(status == glow::FRAMEBUFFER_COMPLETE)
    }

    fn blit_framebuffer(&mut self, src: (u32, u32), dst: (u32, u32), mask: BlitMask) -> Result<()> {
        // NEAREST is mandatory whenever depth is part of the copy
        unsafe {
            self.gl.blit_framebuffer(
                0,
                0,
                src.0 as i32,
                src.1 as i32,
                0,
                0,
                dst.0 as i32,
                dst.1 as i32,
                blit_mask_gl(mask),
                glow::NEAREST,
            );
        }
        Ok(())
    }

    // ===== ATTACHMENT STORAGE =====

    fn create_texture_2d(&mut self, desc: &TextureStorageDesc) -> Result<ResourceId> {
        let texture = unsafe { self.gl.create_texture() }.map_err(Error::BackendError)?;
        let internal_format = pixel_format_gl(desc.format);
        let (format, data_type) = upload_format_gl(desc.format);
        unsafe {
            self.gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                internal_format as i32,
                desc.width as i32,
                desc.height as i32,
                0,
                format,
                data_type,
                None,
            );
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                texture_filter_gl(desc.filter),
            );
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                texture_filter_gl(desc.filter),
            );
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                texture_wrap_gl(desc.wrap),
            );
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                texture_wrap_gl(desc.wrap),
            );
            self.gl.bind_texture(glow::TEXTURE_2D, None);
        }
        let id = self.alloc_id();
        self.textures.insert(id, texture);
        Ok(ResourceId::new(id))
    }

    fn create_render_buffer(
        &mut self,
        width: u32,
        height: u32,
        samples: u32,
        format: PixelFormat,
    ) -> Result<ResourceId> {
        let buffer = unsafe { self.gl.create_renderbuffer() }.map_err(Error::BackendError)?;
        let internal_format = pixel_format_gl(format);
        unsafe {
            self.gl.bind_renderbuffer(glow::RENDERBUFFER, Some(buffer));
            if samples > 0 {
                self.gl.renderbuffer_storage_multisample(
                    glow::RENDERBUFFER,
                    samples as i32,
                    internal_format,
                    width as i32,
                    height as i32,
                );
            } else {
                self.gl.renderbuffer_storage(
                    glow::RENDERBUFFER,
                    internal_format,
                    width as i32,
                    height as i32,
                );
            }
            self.gl.bind_renderbuffer(glow::RENDERBUFFER, None);
        }
        let id = self.alloc_id();
        self.render_buffers.insert(id, buffer);
        Ok(ResourceId::new(id))
    }

    fn attach_texture_2d(&mut self, point: AttachmentPoint, texture: ResourceId) -> Result<()> {
        let handle = self.texture(texture)?;
        unsafe {
            self.gl.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                attachment_point_gl(point),
                glow::TEXTURE_2D,
                Some(handle),
                0,
            );
        }
        Ok(())
    }

    fn attach_render_buffer(&mut self, point: AttachmentPoint, buffer: ResourceId) -> Result<()> {
        let handle = self.render_buffer(buffer)?;
        unsafe {
            self.gl.framebuffer_renderbuffer(
                glow::FRAMEBUFFER,
                attachment_point_gl(point),
                glow::RENDERBUFFER,
                Some(handle),
            );
        }
        Ok(())
    }

    fn delete_texture(&mut self, texture: ResourceId) -> Result<()> {
        let Some(handle) = self.textures.remove(&texture.raw()) else {
            engine_bail!("lowpoly::gl::Context", "delete of unknown texture {}", texture.raw());
        };
        unsafe { self.gl.delete_texture(handle) };
        Ok(())
    }

    fn delete_render_buffer(&mut self, buffer: ResourceId) -> Result<()> {
        let Some(handle) = self.render_buffers.remove(&buffer.raw()) else {
            engine_bail!(
                "lowpoly::gl::Context",
                "delete of unknown render buffer {}",
                buffer.raw()
            );
        };
        unsafe { self.gl.delete_renderbuffer(handle) };
        Ok(())
    }

    // ===== RASTER STATE =====

    fn set_viewport(&mut self, width: u32, height: u32) -> Result<()> {
        unsafe { self.gl.viewport(0, 0, width as i32, height as i32) };
        Ok(())
    }

    fn clear_color_and_depth(&mut self, color: Vec4) -> Result<()> {
        unsafe {
            self.gl.clear_color(color.x, color.y, color.z, color.w);
            self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
        Ok(())
    }

    fn set_culling(&mut self, enabled: bool) -> Result<()> {
        self.set_capability(glow::CULL_FACE, enabled);
        Ok(())
    }

    fn set_depth_test(&mut self, enabled: bool) -> Result<()> {
        self.set_capability(glow::DEPTH_TEST, enabled);
        Ok(())
    }

    fn set_multisample(&mut self, enabled: bool) -> Result<()> {
        self.set_capability(glow::MULTISAMPLE, enabled);
        Ok(())
    }

    fn set_alpha_blending(&mut self, enabled: bool) -> Result<()> {
        unsafe {
            if enabled {
                self.gl.enable(glow::BLEND);
                self.gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
            } else {
                self.gl.disable(glow::BLEND);
            }
        }
        Ok(())
    }

    fn set_clip_plane(&mut self, enabled: bool) -> Result<()> {
        self.set_capability(glow::CLIP_DISTANCE0, enabled);
        Ok(())
    }

    fn set_provoking_vertex(&mut self, _convention: ProvokingVertex) -> Result<()> {
        // glow does not wrap glProvokingVertex. The shaders here carry no
        // flat varyings (water derives its triangle normal from the
        // indicator offsets, terrain bakes per-face values into unshared
        // vertices), so the convention has no observable effect in this
        // backend.
        Ok(())
    }

    // ===== MESHES AND DRAWING =====

    fn create_mesh(
        &mut self,
        data: &[u8],
        layout: &VertexLayout,
        indices: Option<&[u32]>,
    ) -> Result<MeshHandle> {
        let gl = &self.gl;
        let vao = unsafe { gl.create_vertex_array() }.map_err(Error::BackendError)?;
        let vertex_buffer = unsafe { gl.create_buffer() }.map_err(Error::BackendError)?;
        unsafe {
            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vertex_buffer));
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, data, glow::STATIC_DRAW);
            for (location, attribute) in layout.attributes.iter().enumerate() {
                setup_attribute(gl, location as u32, attribute, layout.stride);
            }
        }
        let index_buffer = match indices {
            Some(indices) => {
                let buffer = unsafe { gl.create_buffer() }.map_err(Error::BackendError)?;
                unsafe {
                    gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(buffer));
                    gl.buffer_data_u8_slice(
                        glow::ELEMENT_ARRAY_BUFFER,
                        bytemuck::cast_slice(indices),
                        glow::STATIC_DRAW,
                    );
                }
                Some(buffer)
            }
            None => None,
        };
        unsafe {
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);
        }
        let id = self.alloc_id();
        self.meshes.insert(
            id,
            GlMesh {
                vao,
                vertex_buffer,
                index_buffer,
            },
        );
        Ok(MeshHandle::new(id))
    }

    fn delete_mesh(&mut self, mesh: MeshHandle) -> Result<()> {
        let Some(record) = self.meshes.remove(&mesh.raw()) else {
            engine_bail!("lowpoly::gl::Context", "delete of unknown mesh {}", mesh.raw());
        };
        unsafe {
            self.gl.delete_vertex_array(record.vao);
            self.gl.delete_buffer(record.vertex_buffer);
            if let Some(buffer) = record.index_buffer {
                self.gl.delete_buffer(buffer);
            }
        }
        Ok(())
    }

    fn bind_mesh(&mut self, mesh: MeshHandle) -> Result<()> {
        let Some(record) = self.meshes.get(&mesh.raw()) else {
            engine_bail!("lowpoly::gl::Context", "bind of unknown mesh {}", mesh.raw());
        };
        unsafe { self.gl.bind_vertex_array(Some(record.vao)) };
        Ok(())
    }

    fn unbind_mesh(&mut self) -> Result<()> {
        unsafe { self.gl.bind_vertex_array(None) };
        Ok(())
    }

    fn draw_arrays(&mut self, vertex_count: u32) -> Result<()> {
        unsafe { self.gl.draw_arrays(glow::TRIANGLES, 0, vertex_count as i32) };
        Ok(())
    }

    fn draw_elements(&mut self, index_count: u32) -> Result<()> {
        unsafe {
            self.gl
                .draw_elements(glow::TRIANGLES, index_count as i32, glow::UNSIGNED_INT, 0);
        }
        Ok(())
    }

    // ===== TEXTURE SAMPLING =====

    fn bind_texture_to_unit(&mut self, texture: ResourceId, unit: u32) -> Result<()> {
        let handle = self.texture(texture)?;
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(handle));
        }
        Ok(())
    }

    // ===== SURFACE =====

    fn surface_size(&self) -> (u32, u32) {
        self.surface
    }

    fn set_surface_size(&mut self, width: u32, height: u32) {
        self.surface = (width, height);
    }
}

unsafe fn setup_attribute(
    gl: &glow::Context,
    location: u32,
    attribute: &VertexAttribute,
    stride: u32,
) {
    gl.enable_vertex_attrib_array(location);
    let (size, data_type, normalized) = attribute_format_gl(attribute.format);
    gl.vertex_attrib_pointer_f32(
        location,
        size,
        data_type,
        normalized,
        stride as i32,
        attribute.offset as i32,
    );
}

#[cfg(test)]
#[path = "gl_context_tests.rs"]
mod tests;
