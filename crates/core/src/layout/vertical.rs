use easel_protocol::{Rect, Viewport};

use crate::layout::{Component, LayoutStrategy, StackOptions, place, round_half_up, stack_extent};

/// Cross-axis (X) alignment for [`VerticalStack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    #[default]
    Center,
    Left,
    Right,
}

/// Equal-size items top to bottom, centered vertically as a block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalStack {
    pub options: StackOptions,
    pub align: HAlign,
}

impl VerticalStack {
    pub fn new(options: StackOptions) -> Self {
        Self {
            options,
            align: HAlign::default(),
        }
    }

    pub fn align(mut self, align: HAlign) -> Self {
        self.align = align;
        self
    }
}

impl LayoutStrategy for VerticalStack {
    fn compute<A: Clone>(&self, components: &[Component<A>], viewport: Viewport) -> Vec<Component<A>> {
        let StackOptions { item_size, gap, .. } = self.options;
        let total = stack_extent(components.len(), item_size.h, gap);
        let y0 = round_half_up((viewport.height - total) / 2.0);
        let x = match self.align {
            HAlign::Center => round_half_up((viewport.width - item_size.w) / 2.0),
            HAlign::Left => 0.0,
            HAlign::Right => (viewport.width - item_size.w).max(0.0),
        };
        place(components, &self.options, |i| {
            Rect::new(x, y0 + i as f64 * (item_size.h + gap), item_size.w, item_size.h)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Size, Visual};
    use crate::primitives::ButtonStyle;
    use easel_protocol::Point;

    fn items(n: usize) -> Vec<Component<()>> {
        (0..n)
            .map(|i| Component::new(&format!("item{i}"), Visual::button("b", ButtonStyle::default())))
            .collect()
    }

    fn frames(placed: &[Component<()>]) -> Vec<Rect> {
        placed.iter().map(|c| c.frame).collect()
    }

    #[test]
    fn two_items_centered_in_800x600() {
        let layout = VerticalStack::new(StackOptions::new(Size::new(280.0, 56.0)).gap(16.0));
        let placed = layout.compute(&items(2), Viewport::new(800.0, 600.0));
        assert_eq!(
            frames(&placed),
            vec![
                Rect::new(260.0, 236.0, 280.0, 56.0),
                Rect::new(260.0, 308.0, 280.0, 56.0),
            ]
        );
    }

    #[test]
    fn left_and_right_alignment() {
        let opts = StackOptions::new(Size::new(100.0, 20.0));
        let vp = Viewport::new(300.0, 100.0);
        let left = VerticalStack::new(opts).align(HAlign::Left).compute(&items(1), vp);
        let right = VerticalStack::new(opts).align(HAlign::Right).compute(&items(1), vp);
        assert!((left[0].frame.x).abs() < f64::EPSILON);
        assert!((right[0].frame.x - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn right_alignment_never_goes_negative() {
        let opts = StackOptions::new(Size::new(400.0, 20.0));
        let placed = VerticalStack::new(opts)
            .align(HAlign::Right)
            .compute(&items(1), Viewport::new(300.0, 100.0));
        assert!(placed[0].frame.x.abs() < f64::EPSILON);
    }

    #[test]
    fn overflowing_stack_starts_above_the_viewport() {
        let opts = StackOptions::new(Size::new(10.0, 100.0)).gap(0.0);
        let placed = VerticalStack::new(opts).compute(&items(3), Viewport::new(10.0, 100.0));
        assert!((placed[0].frame.y + 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn origin_offsets_every_frame_and_hit_test() {
        let opts = StackOptions::new(Size::new(200.0, 40.0))
            .gap(10.0)
            .origin(Point::new(260.0, 260.0));
        let placed = VerticalStack::new(opts).compute(&items(3), Viewport::new(280.0, 140.0));
        assert_eq!(
            frames(&placed),
            vec![
                Rect::new(300.0, 260.0, 200.0, 40.0),
                Rect::new(300.0, 310.0, 200.0, 40.0),
                Rect::new(300.0, 360.0, 200.0, 40.0),
            ]
        );
        assert!(placed[0].hit(Point::new(300.0, 260.0)));
        assert!(!placed[0].hit(Point::new(40.0, 0.0)));
    }

    #[test]
    fn deterministic() {
        let layout = VerticalStack::new(StackOptions::new(Size::new(33.3, 17.7)).gap(3.1));
        let vp = Viewport::new(641.0, 479.0);
        assert_eq!(
            frames(&layout.compute(&items(4), vp)),
            frames(&layout.compute(&items(4), vp))
        );
    }

    #[test]
    fn inputs_are_not_mutated() {
        let layout = VerticalStack::new(StackOptions::new(Size::new(10.0, 10.0)));
        let input = items(2);
        let _ = layout.compute(&input, Viewport::new(100.0, 100.0));
        assert!(input.iter().all(|c| c.frame == Rect::ZERO && c.hit_test.is_none()));
    }
}
