/// Mock graphics context for tests (no GPU required)
///
/// Records every operation as a command string so tests can assert on
/// ordering, tracks created/deleted resources so tests can assert on
/// balanced lifecycles, and models the single binding slot strictly:
/// binding a framebuffer while another one is still bound is an error.
use glam::Vec4;
use rustc_hash::FxHashMap;

use crate::device::context::{
    AttachmentPoint, BlitMask, DrawBuffer, FramebufferId, GraphicsContext, MeshHandle,
    PixelFormat, ProvokingVertex, ResourceId, TextureStorageDesc, VertexLayout,
};
use crate::engine_bail;
use crate::error::Result;

/// Storage record for one attachment plugged into a mock framebuffer
#[derive(Debug, Clone)]
struct AttachmentRecord {
    width: u32,
    height: u32,
    samples: u32,
}

/// In-memory stand-in for a backend graphics context
pub struct MockContext {
    next_id: u32,
    surface: (u32, u32),
    viewport: (u32, u32),

    bound_draw: Option<FramebufferId>,
    bound_read: Option<FramebufferId>,
    bound_mesh: Option<MeshHandle>,

    /// Every operation, in call order
    pub commands: Vec<String>,

    pub created_framebuffers: Vec<FramebufferId>,
    pub deleted_framebuffers: Vec<FramebufferId>,
    pub created_textures: Vec<ResourceId>,
    pub deleted_textures: Vec<ResourceId>,
    pub created_render_buffers: Vec<ResourceId>,
    pub deleted_render_buffers: Vec<ResourceId>,
    pub created_meshes: Vec<MeshHandle>,
    pub deleted_meshes: Vec<MeshHandle>,

    texture_storage: FxHashMap<ResourceId, AttachmentRecord>,
    render_buffer_storage: FxHashMap<ResourceId, AttachmentRecord>,
    attachments: FxHashMap<FramebufferId, Vec<AttachmentRecord>>,
}

impl MockContext {
    /// New mock with a 1280x720 surface
    pub fn new() -> Self {
        Self::with_surface(1280, 720)
    }

    /// New mock with an explicit surface size
    pub fn with_surface(width: u32, height: u32) -> Self {
        Self {
            next_id: 1,
            surface: (width, height),
            viewport: (width, height),
            bound_draw: None,
            bound_read: None,
            bound_mesh: None,
            commands: Vec::new(),
            created_framebuffers: Vec::new(),
            deleted_framebuffers: Vec::new(),
            created_textures: Vec::new(),
            deleted_textures: Vec::new(),
            created_render_buffers: Vec::new(),
            deleted_render_buffers: Vec::new(),
            created_meshes: Vec::new(),
            deleted_meshes: Vec::new(),
            texture_storage: FxHashMap::default(),
            render_buffer_storage: FxHashMap::default(),
            attachments: FxHashMap::default(),
        }
    }

    fn alloc_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// The viewport set by the most recent `set_viewport`
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// The currently bound draw framebuffer (`None` = default surface)
    pub fn bound_draw(&self) -> Option<FramebufferId> {
        self.bound_draw
    }

    /// The currently bound read framebuffer (`None` = default surface)
    pub fn bound_read(&self) -> Option<FramebufferId> {
        self.bound_read
    }

    /// Commands whose string starts with `prefix`, in call order
    pub fn commands_matching(&self, prefix: &str) -> Vec<&str> {
        self.commands
            .iter()
            .map(String::as_str)
            .filter(|c| c.starts_with(prefix))
            .collect()
    }

    /// Index of the first command equal to `command`, panicking if absent
    #[track_caller]
    pub fn index_of(&self, command: &str) -> usize {
        self.commands
            .iter()
            .position(|c| c == command)
            .unwrap_or_else(|| panic!("command not recorded: {}", command))
    }

    fn record(&mut self, command: String) {
        self.commands.push(command);
    }

    fn storage_record(&self, point: AttachmentPoint, id: ResourceId) -> Result<AttachmentRecord> {
        if let Some(record) = self.texture_storage.get(&id) {
            return Ok(record.clone());
        }
        if let Some(record) = self.render_buffer_storage.get(&id) {
            return Ok(record.clone());
        }
        engine_bail!(
            "lowpoly::MockContext",
            "attach of unknown storage {} at {:?}",
            id.raw(),
            point
        );
    }

    fn attach(&mut self, point: AttachmentPoint, id: ResourceId) -> Result<()> {
        let Some(fbo) = self.bound_draw else {
            engine_bail!(
                "lowpoly::MockContext",
                "attach at {:?} with no framebuffer bound",
                point
            );
        };
        let record = self.storage_record(point, id)?;
        self.attachments.entry(fbo).or_default().push(record);
        Ok(())
    }
}

impl Default for MockContext {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsContext for MockContext {
    fn create_framebuffer(&mut self) -> Result<FramebufferId> {
        let id = FramebufferId::new(self.alloc_id());
        self.created_framebuffers.push(id);
        self.attachments.insert(id, Vec::new());
        self.record(format!("CreateFramebuffer({})", id.raw()));
        Ok(id)
    }

    fn delete_framebuffer(&mut self, fbo: FramebufferId) -> Result<()> {
        if !self.created_framebuffers.contains(&fbo) || self.deleted_framebuffers.contains(&fbo) {
            engine_bail!(
                "lowpoly::MockContext",
                "delete of unknown framebuffer {}",
                fbo.raw()
            );
        }
        self.deleted_framebuffers.push(fbo);
        self.record(format!("DeleteFramebuffer({})", fbo.raw()));
        Ok(())
    }

    fn bind_framebuffer(&mut self, fbo: Option<FramebufferId>) -> Result<()> {
        if let (Some(new), Some(old)) = (fbo, self.bound_draw) {
            engine_bail!(
                "lowpoly::MockContext",
                "bind of framebuffer {} while {} is still bound",
                new.raw(),
                old.raw()
            );
        }
        self.bound_draw = fbo;
        self.bound_read = fbo;
        match fbo {
            Some(id) => self.record(format!("BindFramebuffer({})", id.raw())),
            None => self.record("BindFramebuffer(default)".to_string()),
        }
        Ok(())
    }

    fn bind_draw_framebuffer(&mut self, fbo: Option<FramebufferId>) -> Result<()> {
        if let (Some(new), Some(old)) = (fbo, self.bound_draw) {
            engine_bail!(
                "lowpoly::MockContext",
                "draw-bind of framebuffer {} while {} is still bound",
                new.raw(),
                old.raw()
            );
        }
        self.bound_draw = fbo;
        match fbo {
            Some(id) => self.record(format!("BindDrawFramebuffer({})", id.raw())),
            None => self.record("BindDrawFramebuffer(default)".to_string()),
        }
        Ok(())
    }

    fn bind_read_framebuffer(&mut self, fbo: Option<FramebufferId>) -> Result<()> {
        if let (Some(new), Some(old)) = (fbo, self.bound_read) {
            engine_bail!(
                "lowpoly::MockContext",
                "read-bind of framebuffer {} while {} is still bound",
                new.raw(),
                old.raw()
            );
        }
        self.bound_read = fbo;
        match fbo {
            Some(id) => self.record(format!("BindReadFramebuffer({})", id.raw())),
            None => self.record("BindReadFramebuffer(default)".to_string()),
        }
        Ok(())
    }

    fn set_draw_buffer(&mut self, buffer: DrawBuffer) -> Result<()> {
        self.record(format!("SetDrawBuffer({:?})", buffer));
        Ok(())
    }

    fn set_read_buffer(&mut self, buffer: DrawBuffer) -> Result<()> {
        self.record(format!("SetReadBuffer({:?})", buffer));
        Ok(())
    }

    fn framebuffer_complete(&mut self) -> Result<bool> {
        let Some(fbo) = self.bound_draw else {
            engine_bail!(
                "lowpoly::MockContext",
                "completeness query with no framebuffer bound"
            );
        };
        self.record(format!("FramebufferComplete({})", fbo.raw()));
        let records = self.attachments.get(&fbo).map(Vec::as_slice).unwrap_or(&[]);
        let Some(first) = records.first() else {
            return Ok(false);
        };
        Ok(records.iter().all(|r| {
            r.width == first.width && r.height == first.height && r.samples == first.samples
        }))
    }

    fn blit_framebuffer(&mut self, src: (u32, u32), dst: (u32, u32), mask: BlitMask) -> Result<()> {
        self.record(format!(
            "BlitFramebuffer({}x{} -> {}x{}, {:?})",
            src.0, src.1, dst.0, dst.1, mask
        ));
        Ok(())
    }

    fn create_texture_2d(&mut self, desc: &TextureStorageDesc) -> Result<ResourceId> {
        let id = ResourceId::new(self.alloc_id());
        self.created_textures.push(id);
        self.texture_storage.insert(
            id,
            AttachmentRecord {
                width: desc.width,
                height: desc.height,
                samples: 0,
            },
        );
        self.record(format!(
            "CreateTexture2d({}, {}x{}, {:?}, depth: {})",
            id.raw(),
            desc.width,
            desc.height,
            desc.format,
            desc.depth_role
        ));
        Ok(id)
    }

    fn create_render_buffer(
        &mut self,
        width: u32,
        height: u32,
        samples: u32,
        format: PixelFormat,
    ) -> Result<ResourceId> {
        let id = ResourceId::new(self.alloc_id());
        self.created_render_buffers.push(id);
        self.render_buffer_storage.insert(
            id,
            AttachmentRecord {
                width,
                height,
                samples,
            },
        );
        self.record(format!(
            "CreateRenderBuffer({}, {}x{}, samples: {}, {:?})",
            id.raw(),
            width,
            height,
            samples,
            format
        ));
        Ok(id)
    }

    fn attach_texture_2d(&mut self, point: AttachmentPoint, texture: ResourceId) -> Result<()> {
        self.attach(point, texture)?;
        self.record(format!("AttachTexture2d({:?}, {})", point, texture.raw()));
        Ok(())
    }

    fn attach_render_buffer(&mut self, point: AttachmentPoint, buffer: ResourceId) -> Result<()> {
        self.attach(point, buffer)?;
        self.record(format!("AttachRenderBuffer({:?}, {})", point, buffer.raw()));
        Ok(())
    }

    fn delete_texture(&mut self, texture: ResourceId) -> Result<()> {
        if !self.created_textures.contains(&texture) || self.deleted_textures.contains(&texture) {
            engine_bail!(
                "lowpoly::MockContext",
                "delete of unknown texture {}",
                texture.raw()
            );
        }
        self.deleted_textures.push(texture);
        self.record(format!("DeleteTexture({})", texture.raw()));
        Ok(())
    }

    fn delete_render_buffer(&mut self, buffer: ResourceId) -> Result<()> {
        if !self.created_render_buffers.contains(&buffer)
            || self.deleted_render_buffers.contains(&buffer)
        {
            engine_bail!(
                "lowpoly::MockContext",
                "delete of unknown render buffer {}",
                buffer.raw()
            );
        }
        self.deleted_render_buffers.push(buffer);
        self.record(format!("DeleteRenderBuffer({})", buffer.raw()));
        Ok(())
    }

    fn set_viewport(&mut self, width: u32, height: u32) -> Result<()> {
        self.viewport = (width, height);
        self.record(format!("SetViewport({}x{})", width, height));
        Ok(())
    }

    fn clear_color_and_depth(&mut self, color: Vec4) -> Result<()> {
        self.record(format!(
            "ClearColorAndDepth({}, {}, {}, {})",
            color.x, color.y, color.z, color.w
        ));
        Ok(())
    }

    fn set_culling(&mut self, enabled: bool) -> Result<()> {
        self.record(format!("SetCulling({})", enabled));
        Ok(())
    }

    fn set_depth_test(&mut self, enabled: bool) -> Result<()> {
        self.record(format!("SetDepthTest({})", enabled));
        Ok(())
    }

    fn set_multisample(&mut self, enabled: bool) -> Result<()> {
        self.record(format!("SetMultisample({})", enabled));
        Ok(())
    }

    fn set_alpha_blending(&mut self, enabled: bool) -> Result<()> {
        self.record(format!("SetAlphaBlending({})", enabled));
        Ok(())
    }

    fn set_clip_plane(&mut self, enabled: bool) -> Result<()> {
        self.record(format!("SetClipPlane({})", enabled));
        Ok(())
    }

    fn set_provoking_vertex(&mut self, convention: ProvokingVertex) -> Result<()> {
        self.record(format!("SetProvokingVertex({:?})", convention));
        Ok(())
    }

    fn create_mesh(
        &mut self,
        data: &[u8],
        layout: &VertexLayout,
        indices: Option<&[u32]>,
    ) -> Result<MeshHandle> {
        if layout.stride == 0 || data.len() % layout.stride as usize != 0 {
            engine_bail!(
                "lowpoly::MockContext",
                "mesh data of {} bytes does not match stride {}",
                data.len(),
                layout.stride
            );
        }
        let id = MeshHandle::new(self.alloc_id());
        self.created_meshes.push(id);
        self.record(format!(
            "CreateMesh({}, {} vertices, {} indices)",
            id.raw(),
            data.len() / layout.stride as usize,
            indices.map(<[u32]>::len).unwrap_or(0)
        ));
        Ok(id)
    }

    fn delete_mesh(&mut self, mesh: MeshHandle) -> Result<()> {
        if !self.created_meshes.contains(&mesh) || self.deleted_meshes.contains(&mesh) {
            engine_bail!(
                "lowpoly::MockContext",
                "delete of unknown mesh {}",
                mesh.raw()
            );
        }
        self.deleted_meshes.push(mesh);
        self.record(format!("DeleteMesh({})", mesh.raw()));
        Ok(())
    }

    fn bind_mesh(&mut self, mesh: MeshHandle) -> Result<()> {
        if let Some(old) = self.bound_mesh {
            engine_bail!(
                "lowpoly::MockContext",
                "bind of mesh {} while {} is still bound",
                mesh.raw(),
                old.raw()
            );
        }
        self.bound_mesh = Some(mesh);
        self.record(format!("BindMesh({})", mesh.raw()));
        Ok(())
    }

    fn unbind_mesh(&mut self) -> Result<()> {
        self.bound_mesh = None;
        self.record("UnbindMesh".to_string());
        Ok(())
    }

    fn draw_arrays(&mut self, vertex_count: u32) -> Result<()> {
        if self.bound_mesh.is_none() {
            engine_bail!("lowpoly::MockContext", "draw with no mesh bound");
        }
        self.record(format!("DrawArrays({})", vertex_count));
        Ok(())
    }

    fn draw_elements(&mut self, index_count: u32) -> Result<()> {
        if self.bound_mesh.is_none() {
            engine_bail!("lowpoly::MockContext", "draw with no mesh bound");
        }
        self.record(format!("DrawElements({})", index_count));
        Ok(())
    }

    fn bind_texture_to_unit(&mut self, texture: ResourceId, unit: u32) -> Result<()> {
        self.record(format!("BindTextureToUnit({}, {})", texture.raw(), unit));
        Ok(())
    }

    fn surface_size(&self) -> (u32, u32) {
        self.surface
    }

    fn set_surface_size(&mut self, width: u32, height: u32) {
        self.surface = (width, height);
    }
}
