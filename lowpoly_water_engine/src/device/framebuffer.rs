/// Framebuffer (FBO) model
///
/// An `Fbo` owns a framebuffer object plus the attachments plugged into it.
/// It is configured through [`FboConfig`], built in one shot against a
/// [`GraphicsContext`], used as a render target for off-screen passes, and
/// released exactly once when the render engine shuts down.
use rustc_hash::FxHashMap;

use crate::device::attachment::Attachment;
use crate::device::context::{
    AttachmentPoint, BlitMask, DrawBuffer, FramebufferId, GraphicsContext, ResourceId,
};
use crate::error::Result;
use crate::{engine_bail, engine_trace};

// ============================================================================
// FboConfig
// ============================================================================

/// Declarative description of a framebuffer, consumed by [`FboConfig::build`]
///
/// # Example
///
/// ```ignore
/// let fbo = FboConfig::new()
///     .add_color_attachment(0, Attachment::texture(PixelFormat::RGBA8))
///     .add_depth_attachment(Attachment::render_buffer(PixelFormat::DEPTH_COMPONENT24))
///     .build(ctx, 1280, 720, 0)?;
/// ```
pub struct FboConfig {
    color_attachments: Vec<(u32, Attachment)>,
    depth_attachment: Option<Attachment>,
}

impl FboConfig {
    /// Empty configuration with no attachments
    pub fn new() -> Self {
        Self {
            color_attachments: Vec::new(),
            depth_attachment: None,
        }
    }

    /// Add a color attachment at the given slot.
    ///
    /// Adding two attachments at the same slot is a configuration error
    /// that surfaces when the framebuffer is built.
    pub fn add_color_attachment(mut self, slot: u32, attachment: Attachment) -> Self {
        self.color_attachments.push((slot, attachment));
        self
    }

    /// Add the depth attachment. The attachment is given the depth role
    /// here, before any storage exists.
    pub fn add_depth_attachment(mut self, mut attachment: Attachment) -> Self {
        attachment.set_depth_role();
        self.depth_attachment = Some(attachment);
        self
    }

    /// Create the framebuffer object, initialize every attachment against
    /// it, and leave the default surface bound.
    ///
    /// `samples` of 0 disables multisampling; it only affects render buffer
    /// attachments.
    ///
    /// # Errors
    ///
    /// Returns an error if a color slot is configured twice, or if the
    /// backend fails to create the framebuffer or any attachment storage.
    pub fn build(
        self,
        ctx: &mut dyn GraphicsContext,
        width: u32,
        height: u32,
        samples: u32,
    ) -> Result<Fbo> {
        let id = ctx.create_framebuffer()?;
        ctx.bind_framebuffer(Some(id))?;

        let mut color_attachments: FxHashMap<u32, Attachment> = FxHashMap::default();
        for (slot, mut attachment) in self.color_attachments {
            if color_attachments.contains_key(&slot) {
                ctx.bind_framebuffer(None)?;
                engine_bail!("lowpoly::Fbo", "color slot {} configured twice", slot);
            }
            attachment.initialize(ctx, AttachmentPoint::Color(slot), width, height, samples)?;
            color_attachments.insert(slot, attachment);
        }

        let mut depth_attachment = self.depth_attachment;
        if let Some(attachment) = depth_attachment.as_mut() {
            attachment.initialize(ctx, AttachmentPoint::Depth, width, height, samples)?;
        }

        ctx.bind_framebuffer(None)?;

        engine_trace!(
            "lowpoly::Fbo",
            "Built framebuffer {} ({}x{}, {} color, depth: {})",
            id.raw(),
            width,
            height,
            color_attachments.len(),
            depth_attachment.is_some()
        );

        Ok(Fbo {
            id,
            width,
            height,
            color_attachments,
            depth_attachment,
        })
    }
}

impl Default for FboConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Fbo
// ============================================================================

/// An off-screen render target: a framebuffer object and its attachments
pub struct Fbo {
    id: FramebufferId,
    width: u32,
    height: u32,
    color_attachments: FxHashMap<u32, Attachment>,
    depth_attachment: Option<Attachment>,
}

impl Fbo {
    /// The backend framebuffer handle
    pub fn id(&self) -> FramebufferId {
        self.id
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether this framebuffer carries a depth attachment
    pub fn has_depth(&self) -> bool {
        self.depth_attachment.is_some()
    }

    /// Storage ID of the color attachment at `slot`, for sampling
    ///
    /// # Errors
    ///
    /// Returns an error if no attachment occupies the slot.
    pub fn color_buffer(&self, slot: u32) -> Result<ResourceId> {
        let Some(attachment) = self.color_attachments.get(&slot) else {
            engine_bail!("lowpoly::Fbo", "no color attachment at slot {}", slot);
        };
        match attachment.buffer_id() {
            Some(id) => Ok(id),
            None => engine_bail!("lowpoly::Fbo", "color attachment at slot {} released", slot),
        }
    }

    /// Storage ID of the depth attachment, for sampling
    ///
    /// # Errors
    ///
    /// Returns an error if the framebuffer has no depth attachment.
    pub fn depth_buffer(&self) -> Result<ResourceId> {
        let Some(attachment) = self.depth_attachment.as_ref() else {
            engine_bail!("lowpoly::Fbo", "framebuffer has no depth attachment");
        };
        match attachment.buffer_id() {
            Some(id) => Ok(id),
            None => engine_bail!("lowpoly::Fbo", "depth attachment released"),
        }
    }

    /// Bind this framebuffer as the draw target, direct output into the
    /// color attachment at `slot`, and size the viewport to the framebuffer.
    pub fn bind_for_render(&self, ctx: &mut dyn GraphicsContext, slot: u32) -> Result<()> {
        ctx.bind_draw_framebuffer(Some(self.id))?;
        ctx.set_draw_buffer(DrawBuffer::Color(slot))?;
        ctx.set_viewport(self.width, self.height)
    }

    /// Restore the default surface as the draw target and resize the
    /// viewport back to the window.
    pub fn unbind_after_render(&self, ctx: &mut dyn GraphicsContext) -> Result<()> {
        ctx.bind_draw_framebuffer(None)?;
        ctx.set_draw_buffer(DrawBuffer::Back)?;
        let (width, height) = ctx.surface_size();
        ctx.set_viewport(width, height)
    }

    /// Copy the color contents of slot `slot` to the window surface.
    ///
    /// Used to resolve a multisampled scene framebuffer to the screen.
    pub fn blit_to_screen(&self, ctx: &mut dyn GraphicsContext, slot: u32) -> Result<()> {
        ctx.bind_read_framebuffer(Some(self.id))?;
        ctx.set_read_buffer(DrawBuffer::Color(slot))?;
        ctx.bind_draw_framebuffer(None)?;
        ctx.set_draw_buffer(DrawBuffer::Back)?;
        let dst = ctx.surface_size();
        ctx.blit_framebuffer((self.width, self.height), dst, BlitMask::COLOR)?;
        ctx.bind_read_framebuffer(None)
    }

    /// Copy the contents of color slot `src_slot` into `target`'s color
    /// slot `target_slot`.
    ///
    /// Depth is copied as well when both framebuffers carry a depth
    /// attachment; otherwise only color is copied.
    pub fn blit_to_fbo(
        &self,
        ctx: &mut dyn GraphicsContext,
        src_slot: u32,
        target: &Fbo,
        target_slot: u32,
    ) -> Result<()> {
        ctx.bind_read_framebuffer(Some(self.id))?;
        ctx.set_read_buffer(DrawBuffer::Color(src_slot))?;
        ctx.bind_draw_framebuffer(Some(target.id))?;
        ctx.set_draw_buffer(DrawBuffer::Color(target_slot))?;

        let mut mask = BlitMask::COLOR;
        if self.has_depth() && target.has_depth() {
            mask |= BlitMask::DEPTH;
        }
        ctx.blit_framebuffer(
            (self.width, self.height),
            (target.width, target.height),
            mask,
        )?;

        ctx.bind_read_framebuffer(None)?;
        ctx.bind_draw_framebuffer(None)
    }

    /// Whether the backend considers this framebuffer complete.
    ///
    /// Binds the framebuffer for the query and restores the default
    /// surface afterwards.
    pub fn is_complete(&self, ctx: &mut dyn GraphicsContext) -> Result<bool> {
        ctx.bind_framebuffer(Some(self.id))?;
        let complete = ctx.framebuffer_complete()?;
        ctx.bind_framebuffer(None)?;
        Ok(complete)
    }

    /// Release the framebuffer object and every attachment.
    ///
    /// Consumes the framebuffer, so a second release is a compile error
    /// rather than a runtime double-delete.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to delete a resource.
    pub fn release(mut self, ctx: &mut dyn GraphicsContext) -> Result<()> {
        engine_trace!("lowpoly::Fbo", "Releasing framebuffer {}", self.id.raw());
        for (_, attachment) in self.color_attachments.iter_mut() {
            attachment.release(ctx)?;
        }
        if let Some(attachment) = self.depth_attachment.as_mut() {
            attachment.release(ctx)?;
        }
        ctx.delete_framebuffer(self.id)
    }
}

#[cfg(test)]
#[path = "framebuffer_tests.rs"]
mod tests;
