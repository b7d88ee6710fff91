//! Inventory icon renderer for Minecraft block models.
//!
//! The public API is session-oriented:
//!
//! - Open an [`Archive`] (client jar, extracted pack directory, or in-memory fixture)
//! - Wrap it in a [`ModelLibrary`] to resolve block models through their parent chains
//! - Start a [`RenderSession`] and iterate it; every item is one block's PNG or APNG bytes,
//!   a skip reason, or an error
#![forbid(unsafe_code)]

mod foundation;

/// Filmstrip timing and the per-block frame loop.
pub mod animation;
/// Read-only access to game asset containers.
pub mod archive;
/// PNG and APNG output.
pub mod encode;
/// Block model descriptors and the inheritance resolver.
pub mod model;
/// Scene renderer seam and the built-in CPU rasterizer.
pub mod render;
/// Element placement and GUI camera.
pub mod scene;
/// Batch rendering over a block list.
pub mod session;
/// Texture loading and per-face materials.
pub mod texture;

pub use crate::foundation::core::{FrameDelay, FrameRGBA, Mat4, TICKS_PER_SECOND, Vec3};
pub use crate::foundation::error::{RenderError, RenderResult};

pub use crate::archive::{Archive, ArchiveEntry, DirArchive, JarArchive, MemoryArchive};
pub use crate::encode::ContainerImage;
pub use crate::model::{FlattenedModel, ModelDescriptor, ModelLibrary, ResourceId};
pub use crate::render::{
    BackendKind, MaterializedElement, RenderBackend, RenderSettings, create_backend,
};
pub use crate::scene::{CameraSpec, SkipReason};
pub use crate::session::{BlockFilter, BlockOutcome, BlockRender, RenderOptions, RenderSession};
