use serde::{Deserialize, Serialize};

use crate::shared_str::SharedStr;
use crate::types::{ClipRegion, Color, Rect, TextAlign, TextBaseline, Transform};

/// One recorded drawing-context call.
///
/// Commands are stateful in the same way Canvas 2D calls are: a `FillRect`
/// uses whatever fill style the most recent `SetFillStyle` left in place,
/// and `Save`/`Restore` bracket style, transform and clip changes. Replaying
/// a list in order on any [`DrawContext`](crate::DrawContext) reproduces the
/// original frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    Save,
    Restore,

    /// Replace the current transform.
    SetTransform(Transform),
    Scale { x: f64, y: f64 },
    Translate { x: f64, y: f64 },

    /// Clear a rectangle to transparent, in the current transform.
    ClearRect { rect: Rect },

    /// Intersect the clip with a prebuilt region, in the current transform.
    Clip { region: ClipRegion },

    SetFillStyle(Color),
    SetStrokeStyle(Color),
    SetLineWidth(f64),
    /// Empty means solid.
    SetLineDash(Vec<f64>),
    /// CSS font shorthand, e.g. `"16px system-ui, sans-serif"`.
    SetFont(SharedStr),
    SetTextAlign(TextAlign),
    SetTextBaseline(TextBaseline),

    FillRect { rect: Rect },
    StrokeRect { rect: Rect },
    FillText { text: SharedStr, x: f64, y: f64 },
}

impl RenderCommand {
    /// Whether this command produces pixels (as opposed to changing state).
    pub fn is_paint(&self) -> bool {
        matches!(
            self,
            Self::ClearRect { .. } | Self::FillRect { .. } | Self::StrokeRect { .. } | Self::FillText { .. }
        )
    }
}
