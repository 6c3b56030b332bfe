#![forbid(unsafe_code)]

mod rendering;
mod shapes;

pub use rendering::{init_tracing, render_layout_to_png, RenderConfig};
pub use shapes::{build_regions, sample_tokens, SyntheticShape};
