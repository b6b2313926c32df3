/// Attachment - one bindable surface within a framebuffer
///
/// An attachment owns the storage (texture or render buffer) for one slot of
/// an FBO. Texture-backed attachments can be sampled afterwards; render
/// buffers are write-only but cheaper and multisample-friendly.
///
/// The depth role must be decided before `initialize` because it changes
/// the storage format chosen at creation time.
use crate::device::context::{
    AttachmentPoint, GraphicsContext, PixelFormat, ResourceId, TextureFilter, TextureStorageDesc,
    TextureWrap,
};
use crate::engine_bail;
use crate::error::Result;

/// Configuration of a texture-backed attachment
#[derive(Debug, Clone)]
pub struct TextureAttachment {
    /// Internal pixel format of the texture storage
    pub format: PixelFormat,
    /// Nearest filtering instead of linear
    pub nearest_filtering: bool,
    /// Clamp texture coordinates to the edge instead of repeating
    pub clamp_edges: bool,
}

/// Configuration of a render-buffer-backed attachment
#[derive(Debug, Clone)]
pub struct RenderBufferAttachment {
    /// Internal pixel format of the render buffer storage
    pub format: PixelFormat,
}

/// Storage variant of an attachment
#[derive(Debug, Clone)]
pub enum AttachmentKind {
    /// Sampleable 2-D texture
    Texture(TextureAttachment),
    /// Write-only render buffer
    RenderBuffer(RenderBufferAttachment),
}

/// One FBO attachment: a storage variant plus its lifecycle state
///
/// Created unconfigured, given its role by the framebuffer config, then
/// initialized during the framebuffer build while the target FBO is bound.
/// Owned exclusively by its framebuffer and released exactly once with it.
#[derive(Debug, Clone)]
pub struct Attachment {
    kind: AttachmentKind,
    buffer_id: Option<ResourceId>,
    depth_role: bool,
}

impl Attachment {
    /// New texture attachment with linear filtering and repeat wrapping
    pub fn texture(format: PixelFormat) -> Self {
        Self::texture_with_params(format, false, false)
    }

    /// New texture attachment with explicit filtering and wrapping
    pub fn texture_with_params(format: PixelFormat, nearest_filtering: bool, clamp_edges: bool) -> Self {
        Self {
            kind: AttachmentKind::Texture(TextureAttachment {
                format,
                nearest_filtering,
                clamp_edges,
            }),
            buffer_id: None,
            depth_role: false,
        }
    }

    /// New render buffer attachment
    pub fn render_buffer(format: PixelFormat) -> Self {
        Self {
            kind: AttachmentKind::RenderBuffer(RenderBufferAttachment { format }),
            buffer_id: None,
            depth_role: false,
        }
    }

    /// Mark this attachment as the depth attachment.
    ///
    /// Must happen before `initialize` - the role selects the storage
    /// format. Calling it on an initialized attachment is a precondition
    /// violation and aborts.
    pub fn set_depth_role(&mut self) {
        assert!(
            self.buffer_id.is_none(),
            "depth role must be set before the attachment is initialized"
        );
        self.depth_role = true;
    }

    /// Whether this attachment is used as a depth attachment
    pub fn is_depth(&self) -> bool {
        self.depth_role
    }

    /// The storage variant
    pub fn kind(&self) -> &AttachmentKind {
        &self.kind
    }

    /// ID of the underlying storage, `None` until initialized
    pub fn buffer_id(&self) -> Option<ResourceId> {
        self.buffer_id
    }

    /// Create the storage and attach it to the currently bound framebuffer.
    ///
    /// The target framebuffer must be bound when this is called; the
    /// attach call applies to the active binding.
    ///
    /// # Errors
    ///
    /// Returns an error if the attachment was already initialized or if the
    /// backend fails to create the storage.
    pub fn initialize(
        &mut self,
        ctx: &mut dyn GraphicsContext,
        point: AttachmentPoint,
        width: u32,
        height: u32,
        samples: u32,
    ) -> Result<()> {
        if self.buffer_id.is_some() {
            engine_bail!(
                "lowpoly::Attachment",
                "attachment initialized twice at {:?}",
                point
            );
        }
        let id = match &self.kind {
            AttachmentKind::Texture(tex) => {
                let desc = TextureStorageDesc {
                    width,
                    height,
                    format: tex.format,
                    filter: if tex.nearest_filtering {
                        TextureFilter::Nearest
                    } else {
                        TextureFilter::Linear
                    },
                    wrap: if tex.clamp_edges {
                        TextureWrap::ClampToEdge
                    } else {
                        TextureWrap::Repeat
                    },
                    depth_role: self.depth_role,
                };
                let id = ctx.create_texture_2d(&desc)?;
                ctx.attach_texture_2d(point, id)?;
                id
            }
            AttachmentKind::RenderBuffer(rb) => {
                let id = ctx.create_render_buffer(width, height, samples, rb.format)?;
                ctx.attach_render_buffer(point, id)?;
                id
            }
        };
        self.buffer_id = Some(id);
        Ok(())
    }

    /// Release the underlying storage.
    ///
    /// Not idempotent: the owning framebuffer calls this exactly once.
    ///
    /// # Errors
    ///
    /// Returns an error if the attachment was never initialized (or was
    /// already released).
    pub fn release(&mut self, ctx: &mut dyn GraphicsContext) -> Result<()> {
        let Some(id) = self.buffer_id.take() else {
            engine_bail!("lowpoly::Attachment", "release of uninitialized attachment");
        };
        match &self.kind {
            AttachmentKind::Texture(_) => ctx.delete_texture(id),
            AttachmentKind::RenderBuffer(_) => ctx.delete_render_buffer(id),
        }
    }
}

#[cfg(test)]
#[path = "attachment_tests.rs"]
mod tests;
