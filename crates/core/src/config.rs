use easel_protocol::{Color, DrawContext, Rect};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const DEBUG_DASH: [f64; 2] = [4.0, 3.0];
const DEBUG_STROKE: Color = Color::rgba(0, 0, 0, 0.5);

/// Bounds for the logical frame width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    pub min_width: f64,
    pub max_width: f64,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            min_width: 320.0,
            max_width: 1080.0,
        }
    }
}

/// Development outlines around the frame and every placed component.
///
/// Purely cosmetic: it is handed to draw primitives, layouts and the frame
/// controller explicitly and never changes geometry or hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugOverlay {
    pub enabled: bool,
}

impl DebugOverlay {
    pub const OFF: Self = Self { enabled: false };
    pub const ON: Self = Self { enabled: true };

    /// Dashed outline drawn one pixel inside `rect`.
    pub fn outline(&self, ctx: &mut dyn DrawContext, rect: Rect) {
        self.stroke(ctx, rect.inset(1.0));
    }

    /// Dashed outline drawn exactly along `rect`.
    pub fn stroke(&self, ctx: &mut dyn DrawContext, rect: Rect) {
        if !self.enabled {
            return;
        }
        ctx.save();
        ctx.set_line_dash(&DEBUG_DASH);
        ctx.set_stroke_style(DEBUG_STROKE);
        ctx.set_line_width(1.0);
        ctx.stroke_rect(rect);
        ctx.restore();
    }
}

/// Static engine parameters, shared by every component.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub frame: FrameConfig,
    pub debug: DebugOverlay,
}

impl EngineConfig {
    /// Parse a (possibly partial) JSON object; missing fields keep defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug.enabled = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let FrameConfig {
            min_width: min,
            max_width: max,
        } = self.frame;
        if !min.is_finite() || !max.is_finite() {
            return Err(ConfigError::NonFiniteBounds { min, max });
        }
        if min <= 0.0 {
            return Err(ConfigError::NonPositiveMinWidth(min));
        }
        if min > max {
            return Err(ConfigError::InvertedBounds { min, max });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel_protocol::{CommandList, RenderCommand};

    #[test]
    fn defaults() {
        let cfg = EngineConfig::default();
        assert!((cfg.frame.min_width - 320.0).abs() < f64::EPSILON);
        assert!((cfg.frame.max_width - 1080.0).abs() < f64::EPSILON);
        assert!(!cfg.debug.enabled);
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = EngineConfig::from_json(r#"{"debug":{"enabled":true}}"#);
        assert_eq!(cfg, Ok(EngineConfig::default().with_debug(true)));

        let cfg = EngineConfig::from_json(r#"{"frame":{"max_width":1280}}"#);
        assert_eq!(cfg.map(|c| c.frame.max_width), Ok(1280.0));
    }

    #[test]
    fn rejects_bad_bounds() {
        assert_eq!(
            EngineConfig::from_json(r#"{"frame":{"min_width":900,"max_width":600}}"#),
            Err(ConfigError::InvertedBounds {
                min: 900.0,
                max: 600.0
            })
        );
        assert_eq!(
            EngineConfig::from_json(r#"{"frame":{"min_width":0}}"#),
            Err(ConfigError::NonPositiveMinWidth(0.0))
        );
        assert!(matches!(
            EngineConfig::from_json("{"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn disabled_overlay_draws_nothing() {
        let mut ctx = CommandList::new();
        DebugOverlay::OFF.outline(&mut ctx, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(ctx.commands().is_empty());
    }

    #[test]
    fn enabled_overlay_is_dashed_and_balanced() {
        let mut ctx = CommandList::new();
        let before = ctx.state().clone();
        DebugOverlay::ON.outline(&mut ctx, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(ctx.commands().contains(&RenderCommand::SetLineDash(vec![4.0, 3.0])));
        assert!(ctx.commands().contains(&RenderCommand::StrokeRect {
            rect: Rect::new(1.0, 1.0, 8.0, 8.0)
        }));
        assert_eq!(ctx.state(), &before);
    }
}
