use easel_protocol::{Rect, Viewport};

use crate::layout::{Component, LayoutStrategy, StackOptions, place, round_half_up, stack_extent};

/// Cross-axis (Y) alignment for [`HorizontalStack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    #[default]
    Center,
    Top,
    Bottom,
}

/// Equal-size items left to right, centered horizontally as a block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalStack {
    pub options: StackOptions,
    pub align: VAlign,
}

impl HorizontalStack {
    pub fn new(options: StackOptions) -> Self {
        Self {
            options,
            align: VAlign::default(),
        }
    }

    pub fn align(mut self, align: VAlign) -> Self {
        self.align = align;
        self
    }
}

impl LayoutStrategy for HorizontalStack {
    fn compute<A: Clone>(&self, components: &[Component<A>], viewport: Viewport) -> Vec<Component<A>> {
        let StackOptions { item_size, gap, .. } = self.options;
        let total = stack_extent(components.len(), item_size.w, gap);
        let x0 = round_half_up((viewport.width - total) / 2.0);
        let y = match self.align {
            VAlign::Center => round_half_up((viewport.height - item_size.h) / 2.0),
            VAlign::Top => 0.0,
            VAlign::Bottom => (viewport.height - item_size.h).max(0.0),
        };
        place(components, &self.options, |i| {
            Rect::new(x0 + i as f64 * (item_size.w + gap), y, item_size.w, item_size.h)
        })
    }
}
