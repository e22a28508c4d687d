//! Ordered composition of items onto one canvas.

use thiserror::Error;

use crate::error::DrawError;
use crate::types::RasterImage;

use super::ComposableItem;

/// A composition that stopped at a failing item.
///
/// `canvas` holds every draw made before the failure; nothing is rolled back.
#[derive(Debug, Error)]
#[error("composition stopped at item {failed_at}: {error}")]
pub struct PartialComposition {
    pub canvas: RasterImage,
    pub failed_at: usize,
    #[source]
    pub error: DrawError,
}

impl From<PartialComposition> for DrawError {
    fn from(partial: PartialComposition) -> Self {
        DrawError::Layer {
            index: partial.failed_at,
            source: Box::new(partial.error),
        }
    }
}

/// Render `items` onto `canvas` strictly in order.
///
/// Each item draws on the result of the previous one. The first failure
/// stops the run and is returned together with the canvas as it stood.
#[tracing::instrument(skip_all, fields(items = items.len(), width = canvas.width(), height = canvas.height()))]
pub fn compose(
    mut canvas: RasterImage,
    items: &[ComposableItem],
) -> Result<RasterImage, PartialComposition> {
    if items.is_empty() {
        tracing::debug!("nothing to compose");
        return Ok(canvas);
    }

    for (index, item) in items.iter().enumerate() {
        tracing::debug!(index, kind = item.kind(), placement = ?item.placement(), "rendering item");
        if let Err(error) = item.render(&mut canvas) {
            tracing::warn!(index, kind = item.kind(), %error, "item failed; keeping earlier draws");
            return Err(PartialComposition {
                canvas,
                failed_at: index,
                error,
            });
        }
    }
    Ok(canvas)
}

impl RasterImage {
    /// Compose `items` onto a copy of this image.
    pub fn fill(&self, items: &[ComposableItem]) -> Result<RasterImage, PartialComposition> {
        compose(self.clone(), items)
    }
}
