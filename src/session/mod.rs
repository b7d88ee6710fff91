//! Pipeline orchestration: one render session walks a block list lazily, one block at a time.

mod options;
mod render_session;

pub use options::{BlockFilter, RenderOptions};
pub use render_session::{BlockOutcome, BlockRender, RenderSession};
