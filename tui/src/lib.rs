//! Terminal preview of a saved deck plan.

mod preview;

pub use preview::DeckPreview;

use anyhow::{Context, Result};
use std::path::Path;

/// Load the plan JSON at `path` and page through it until the user quits.
pub fn run_preview(path: &Path) -> Result<()> {
    let plan = deck_core::load_plan(path)
        .with_context(|| format!("failed to load deck plan from {}", path.display()))?;
    DeckPreview::new(plan).run()
}
