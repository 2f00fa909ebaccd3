//! Template renderer adapters.

mod clock;
mod filters;
mod tera_renderer;

pub use clock::RenderClock;
pub use filters::DEFAULT_NOW_FORMAT;
pub use tera_renderer::TeraRenderer;
