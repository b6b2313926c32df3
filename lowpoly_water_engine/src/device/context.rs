/// GraphicsContext trait - the explicit handle to the graphics API
///
/// OpenGL exposes a single, process-wide binding slot for framebuffers,
/// textures and meshes. Instead of hiding that behind free functions, every
/// operation here flows through an explicit context object passed by
/// reference, so the binding discipline (bind immediately before use, unbind
/// immediately after) is visible at every call site and enforceable by test
/// doubles.
///
/// A context is thread-affine (a GL context belongs to the thread that made
/// it current), so the trait deliberately has no `Send`/`Sync` bound.
use bitflags::bitflags;
use glam::Vec4;

use crate::error::Result;

// ============================================================================
// Handles
// ============================================================================

/// Opaque handle to a framebuffer object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FramebufferId(u32);

impl FramebufferId {
    /// Wrap a raw backend identifier. Must be non-zero; zero is the
    /// default (window) framebuffer and is represented as `None` in binds.
    pub fn new(raw: u32) -> Self {
        debug_assert!(raw != 0, "framebuffer id 0 is the default surface");
        Self(raw)
    }

    /// The raw backend identifier
    pub fn raw(&self) -> u32 {
        self.0
    }
}

/// Opaque handle to an attachment's storage (texture or render buffer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceId(u32);

impl ResourceId {
    /// Wrap a raw backend identifier (non-zero)
    pub fn new(raw: u32) -> Self {
        debug_assert!(raw != 0, "resource id 0 is reserved");
        Self(raw)
    }

    /// The raw backend identifier
    pub fn raw(&self) -> u32 {
        self.0
    }
}

/// Opaque handle to an uploaded mesh (vertex array + buffers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(u32);

impl MeshHandle {
    /// Wrap a raw backend identifier (non-zero)
    pub fn new(raw: u32) -> Self {
        debug_assert!(raw != 0, "mesh handle 0 is reserved");
        Self(raw)
    }

    /// The raw backend identifier
    pub fn raw(&self) -> u32 {
        self.0
    }
}

// ============================================================================
// Attachment and raster state types
// ============================================================================

/// Where an attachment is plugged into a framebuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentPoint {
    /// A color slot (`GL_COLOR_ATTACHMENT0 + slot`)
    Color(u32),
    /// The depth slot
    Depth,
}

/// Which buffer receives draw output / supplies read pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawBuffer {
    /// The window back buffer
    Back,
    /// A framebuffer color slot
    Color(u32),
}

/// Pixel storage formats used by attachments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum PixelFormat {
    /// 8 bits per channel color
    RGBA8,
    /// 24-bit depth, floating-point upload path
    DEPTH_COMPONENT24,
}

/// Texture minification/magnification filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFilter {
    Nearest,
    Linear,
}

/// Texture coordinate wrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureWrap {
    ClampToEdge,
    Repeat,
}

/// Provoking vertex convention for flat-shaded varyings
///
/// Flat-shaded per-triangle values (normals, colors) are read from a single
/// vertex of each triangle; the convention decides which one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvokingVertex {
    First,
    Last,
}

bitflags! {
    /// Which channels a blit copies
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BlitMask: u32 {
        const COLOR = 0b01;
        const DEPTH = 0b10;
    }
}

/// Descriptor for creating 2-D texture storage for an attachment
///
/// The depth role must be decided before creation: it selects the upload
/// format and data type (depth-component/float vs. rgba/byte) in addition
/// to the internal format.
#[derive(Debug, Clone)]
pub struct TextureStorageDesc {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Internal pixel format
    pub format: PixelFormat,
    /// Filtering for both minification and magnification
    pub filter: TextureFilter,
    /// Coordinate wrapping for both axes
    pub wrap: TextureWrap,
    /// Whether this texture backs a depth attachment
    pub depth_role: bool,
}

// ============================================================================
// Vertex layouts
// ============================================================================

/// Data format of a single vertex attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum AttributeFormat {
    /// Two f32 components (8 bytes)
    F32x2,
    /// Three f32 components (12 bytes)
    F32x3,
    /// Four i8 components, converted to float without normalization (4 bytes)
    I8x4,
    /// Four u8 components, normalized to [0,1] (4 bytes)
    U8x4_NORM,
    /// Packed 2_10_10_10_REV signed-normalized, used for normals (4 bytes)
    INT_2_10_10_10_REV_NORM,
}

impl AttributeFormat {
    /// Returns size in bytes for this format
    pub fn size_bytes(&self) -> u32 {
        match self {
            AttributeFormat::F32x2 => 8,
            AttributeFormat::F32x3 => 12,
            AttributeFormat::I8x4 => 4,
            AttributeFormat::U8x4_NORM => 4,
            AttributeFormat::INT_2_10_10_10_REV_NORM => 4,
        }
    }
}

/// One attribute within a vertex layout
#[derive(Debug, Clone, Copy)]
pub struct VertexAttribute {
    /// Data format
    pub format: AttributeFormat,
    /// Byte offset within a vertex
    pub offset: u32,
}

/// Layout of the packed per-vertex data in a mesh upload
#[derive(Debug, Clone)]
pub struct VertexLayout {
    /// Bytes per vertex
    pub stride: u32,
    /// Attributes in shader-location order
    pub attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    /// Layout of the water mesh: x,z position (f32) + 4 indicator bytes
    pub fn water() -> Self {
        Self {
            stride: 12,
            attributes: vec![
                VertexAttribute {
                    format: AttributeFormat::F32x2,
                    offset: 0,
                },
                VertexAttribute {
                    format: AttributeFormat::I8x4,
                    offset: 8,
                },
            ],
        }
    }

    /// Layout of the terrain mesh: position (3 x f32) + packed normal +
    /// rgba color bytes
    pub fn terrain() -> Self {
        Self {
            stride: 20,
            attributes: vec![
                VertexAttribute {
                    format: AttributeFormat::F32x3,
                    offset: 0,
                },
                VertexAttribute {
                    format: AttributeFormat::INT_2_10_10_10_REV_NORM,
                    offset: 12,
                },
                VertexAttribute {
                    format: AttributeFormat::U8x4_NORM,
                    offset: 16,
                },
            ],
        }
    }
}

// ============================================================================
// GraphicsContext trait
// ============================================================================

/// Low-level graphics operations used by the framebuffer model and the
/// render engine.
///
/// Implemented by backend-specific contexts (e.g., the glow-based
/// `GlContext`) and by `MockContext` in tests. Every method that touches
/// the global binding slot takes `&mut self` so a bind cannot escape the
/// borrow that performed it.
pub trait GraphicsContext {
    // ===== FRAMEBUFFER OBJECTS =====

    /// Allocate a new framebuffer object
    fn create_framebuffer(&mut self) -> Result<FramebufferId>;

    /// Delete a framebuffer object (not its attachments)
    fn delete_framebuffer(&mut self, fbo: FramebufferId) -> Result<()>;

    /// Bind a framebuffer for both reading and drawing.
    /// `None` binds the default (window) surface.
    fn bind_framebuffer(&mut self, fbo: Option<FramebufferId>) -> Result<()>;

    /// Bind a framebuffer as the draw target only
    fn bind_draw_framebuffer(&mut self, fbo: Option<FramebufferId>) -> Result<()>;

    /// Bind a framebuffer as the read source only
    fn bind_read_framebuffer(&mut self, fbo: Option<FramebufferId>) -> Result<()>;

    /// Select which color buffer receives draw output
    fn set_draw_buffer(&mut self, buffer: DrawBuffer) -> Result<()>;

    /// Select which color buffer supplies read pixels
    fn set_read_buffer(&mut self, buffer: DrawBuffer) -> Result<()>;

    /// Whether the currently bound framebuffer is complete
    /// (consistent dimensions, sample counts, and a supported format set)
    fn framebuffer_complete(&mut self) -> Result<bool>;

    /// Copy pixels from the bound read framebuffer to the bound draw
    /// framebuffer. `src` and `dst` are the full source/target extents.
    fn blit_framebuffer(&mut self, src: (u32, u32), dst: (u32, u32), mask: BlitMask) -> Result<()>;

    // ===== ATTACHMENT STORAGE =====

    /// Create 2-D texture storage for an attachment
    fn create_texture_2d(&mut self, desc: &TextureStorageDesc) -> Result<ResourceId>;

    /// Create (possibly multisampled) render buffer storage.
    /// `samples` of 0 means no multisampling.
    fn create_render_buffer(
        &mut self,
        width: u32,
        height: u32,
        samples: u32,
        format: PixelFormat,
    ) -> Result<ResourceId>;

    /// Attach a texture to the currently bound framebuffer
    fn attach_texture_2d(&mut self, point: AttachmentPoint, texture: ResourceId) -> Result<()>;

    /// Attach a render buffer to the currently bound framebuffer
    fn attach_render_buffer(&mut self, point: AttachmentPoint, buffer: ResourceId) -> Result<()>;

    /// Delete texture storage
    fn delete_texture(&mut self, texture: ResourceId) -> Result<()>;

    /// Delete render buffer storage
    fn delete_render_buffer(&mut self, buffer: ResourceId) -> Result<()>;

    // ===== RASTER STATE =====

    /// Resize the viewport
    fn set_viewport(&mut self, width: u32, height: u32) -> Result<()>;

    /// Clear the color buffer to `color` and the depth buffer to far
    fn clear_color_and_depth(&mut self, color: Vec4) -> Result<()>;

    /// Enable/disable back-face culling
    fn set_culling(&mut self, enabled: bool) -> Result<()>;

    /// Enable/disable depth testing
    fn set_depth_test(&mut self, enabled: bool) -> Result<()>;

    /// Enable/disable multisample antialiasing
    fn set_multisample(&mut self, enabled: bool) -> Result<()>;

    /// Enable/disable alpha blending (standard src-alpha/one-minus-src-alpha)
    fn set_alpha_blending(&mut self, enabled: bool) -> Result<()>;

    /// Enable/disable the clip-distance test for clip plane 0
    fn set_clip_plane(&mut self, enabled: bool) -> Result<()>;

    /// Set the provoking vertex convention for flat varyings
    fn set_provoking_vertex(&mut self, convention: ProvokingVertex) -> Result<()>;

    // ===== MESHES AND DRAWING =====

    /// Upload packed vertex data (and optional indices) as a drawable mesh
    fn create_mesh(
        &mut self,
        data: &[u8],
        layout: &VertexLayout,
        indices: Option<&[u32]>,
    ) -> Result<MeshHandle>;

    /// Delete a mesh and its buffers
    fn delete_mesh(&mut self, mesh: MeshHandle) -> Result<()>;

    /// Bind a mesh for drawing
    fn bind_mesh(&mut self, mesh: MeshHandle) -> Result<()>;

    /// Unbind the currently bound mesh
    fn unbind_mesh(&mut self) -> Result<()>;

    /// Draw `vertex_count` vertices of the bound mesh as triangles
    fn draw_arrays(&mut self, vertex_count: u32) -> Result<()>;

    /// Draw `index_count` indices of the bound mesh as triangles
    fn draw_elements(&mut self, index_count: u32) -> Result<()>;

    // ===== TEXTURE SAMPLING =====

    /// Bind a texture for sampling on the given texture unit
    fn bind_texture_to_unit(&mut self, texture: ResourceId, unit: u32) -> Result<()>;

    // ===== SURFACE =====

    /// Current window surface dimensions, used to restore the viewport
    /// after off-screen rendering
    fn surface_size(&self) -> (u32, u32);

    /// Record new window surface dimensions (on resize)
    fn set_surface_size(&mut self, width: u32, height: u32);
}
