use crate::animation::{AnimationProgress, drive_frames};
use crate::archive::Archive;
use crate::encode::{ContainerImage, encode_png};
use crate::foundation::error::{RenderError, RenderResult};
use crate::model::ModelLibrary;
use crate::render::{MaterializedElement, RenderBackend, create_backend};
use crate::scene::{Scene, SceneOutcome, SkipReason, build_scene};
use crate::texture::{FaceMaterial, TextureCache, face_material};

use super::RenderOptions;

/// What happened to one requested block.
#[derive(Debug)]
pub enum BlockOutcome {
    Rendered(ContainerImage),
    Skipped(SkipReason),
    Failed(RenderError),
}

/// One entry of a session's output, in request order.
#[derive(Debug)]
pub struct BlockRender {
    /// 1-based position in the filtered request list.
    pub index: usize,
    pub total: usize,
    pub block_name: String,
    pub outcome: BlockOutcome,
}

impl BlockRender {
    /// Encoded image bytes, when the block rendered.
    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.outcome {
            BlockOutcome::Rendered(image) => Some(image.bytes()),
            _ => None,
        }
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self.outcome {
            BlockOutcome::Skipped(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&RenderError> {
        match &self.outcome {
            BlockOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// A lazy, strictly sequential render over a block list.
///
/// Each call to `next` resolves, renders and encodes one block. Per-block failures come back as
/// [`BlockOutcome::Failed`] and the iteration continues. The render context is destroyed exactly
/// once: when the list is exhausted or when the session is dropped, whichever comes first.
pub struct RenderSession<'a, A: Archive> {
    library: &'a mut ModelLibrary<A>,
    names: std::vec::IntoIter<String>,
    index: usize,
    total: usize,
    options: RenderOptions,
    textures: TextureCache,
    backend: Option<Box<dyn RenderBackend>>,
}

impl<A: Archive> ModelLibrary<A> {
    /// Start a session over `names` with a backend built from `options`.
    ///
    /// Failing to create the render context fails the whole session.
    pub fn render<I, S>(
        &mut self,
        names: I,
        options: RenderOptions,
    ) -> RenderResult<RenderSession<'_, A>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let backend = create_backend(options.backend, &options.render_settings())?;
        Ok(self.render_with_backend(names, options, backend))
    }

    /// Start a session over every block model of the default namespace.
    pub fn render_all(&mut self, options: RenderOptions) -> RenderResult<RenderSession<'_, A>> {
        let namespace = self.default_namespace().to_string();
        let names = self.block_names(&namespace)?;
        self.render(names, options)
    }

    /// Start a session with a caller-provided backend. The session owns and destroys it.
    pub fn render_with_backend<I, S>(
        &mut self,
        names: I,
        options: RenderOptions,
        backend: Box<dyn RenderBackend>,
    ) -> RenderSession<'_, A>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names
            .into_iter()
            .map(Into::into)
            .filter(|name| options.filter.matches(name))
            .collect();
        let total = names.len();
        tracing::info!(blocks = total, "render session started");
        let textures = TextureCache::new(self.default_namespace());
        RenderSession {
            library: self,
            names: names.into_iter(),
            index: 0,
            total,
            options,
            textures,
            backend: Some(backend),
        }
    }
}

impl<A: Archive> RenderSession<'_, A> {
    pub fn total(&self) -> usize {
        self.total
    }

    /// Blocks not yet rendered.
    pub fn remaining(&self) -> usize {
        self.names.len()
    }

    /// Whether the render context has been released.
    pub fn is_closed(&self) -> bool {
        self.backend.is_none()
    }

    /// Textures decoded so far in this session.
    pub fn cached_textures(&self) -> usize {
        self.textures.len()
    }

    /// Release the render context and drop cached textures. Safe to call more than once.
    pub fn close(&mut self) {
        if let Some(mut backend) = self.backend.take() {
            backend.destroy();
            tracing::debug!(rendered = self.index, total = self.total, "render session closed");
        }
        self.textures.clear();
    }

    #[tracing::instrument(skip(self))]
    fn render_block(&mut self, block_name: &str) -> RenderResult<BlockOutcome> {
        let model = self.library.resolve(block_name)?;
        let scene = match build_scene(&model) {
            SceneOutcome::Ready(scene) => scene,
            SceneOutcome::Skip(reason) => {
                tracing::info!(%reason, "skipped");
                return Ok(BlockOutcome::Skipped(reason));
            }
        };

        let backend = self
            .backend
            .as_mut()
            .ok_or_else(|| RenderError::backend("render context already destroyed"))?;
        let archive = self.library.archive_mut();
        let textures = &mut self.textures;

        let pngs = drive_frames(self.options.animation, |progress| {
            let (elements, progress) = materialize(&scene, &mut *archive, &mut *textures, progress)?;
            let frame = backend.render_frame(&elements, &scene.camera)?;
            Ok((encode_png(&frame)?, progress))
        })?;

        let image = ContainerImage::assemble(pngs, self.options.tick_delay)?;
        tracing::info!(
            frames = image.frame_count(),
            bytes = image.bytes().len(),
            "rendered"
        );
        Ok(BlockOutcome::Rendered(image))
    }
}

impl<A: Archive> Iterator for RenderSession<'_, A> {
    type Item = BlockRender;

    fn next(&mut self) -> Option<BlockRender> {
        let Some(block_name) = self.names.next() else {
            self.close();
            return None;
        };
        self.index += 1;
        let outcome = self.render_block(&block_name).unwrap_or_else(|err| {
            tracing::warn!(block = %block_name, error = %err, "block failed");
            BlockOutcome::Failed(err)
        });
        Some(BlockRender {
            index: self.index,
            total: self.total,
            block_name,
            outcome,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.names.size_hint()
    }
}

impl<A: Archive> Drop for RenderSession<'_, A> {
    fn drop(&mut self) {
        self.close();
    }
}

/// Load materials for every face at `progress.tick`, recording animated cycle lengths.
///
/// Faces whose texture is missing are left out; any other failure aborts the block.
fn materialize<A: Archive + ?Sized>(
    scene: &Scene,
    archive: &mut A,
    textures: &mut TextureCache,
    mut progress: AnimationProgress,
) -> RenderResult<(Vec<MaterializedElement>, AnimationProgress)> {
    let mut elements = Vec::with_capacity(scene.elements.len());
    for instruction in &scene.elements {
        let mut faces: [Option<FaceMaterial>; 6] = Default::default();
        for (slot, binding) in faces.iter_mut().zip(&instruction.faces) {
            let Some(binding) = binding else {
                continue;
            };
            let asset = match textures.get_or_load(archive, &binding.texture) {
                Ok(asset) => asset,
                Err(RenderError::TextureNotFound(path)) => {
                    if progress.tick == 0 {
                        tracing::warn!(
                            block = %scene.block_name,
                            face = binding.side.name(),
                            %path,
                            "texture not found; face omitted"
                        );
                    }
                    continue;
                }
                Err(e) => return Err(e),
            };
            if let Some(cycle) = asset.cycle_ticks() {
                progress = progress.observe(cycle);
            }
            *slot = Some(face_material(
                &asset,
                progress.tick,
                binding.uv,
                binding.rotation,
            ));
        }
        elements.push(MaterializedElement {
            size: instruction.size,
            transform: instruction.transform,
            draw_order: instruction.draw_order,
            faces,
        });
    }
    Ok((elements, progress))
}

#[cfg(test)]
#[path = "../../tests/unit/session/render_session.rs"]
mod tests;
