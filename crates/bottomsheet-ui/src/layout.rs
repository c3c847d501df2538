//! Layout engine abstraction.
//!
//! One sheet state machine drives two interchangeable layout strategies:
//! direct frame computation and an anchor/constant constraint model. Both
//! must produce identical geometry; the controller neither knows nor cares
//! which one is active.

use std::cell::Cell;
use std::rc::Rc;

use bottomsheet_ui_graphics::Rect;

use crate::views::SheetViewTree;

/// Inputs to one layout pass, computed by the controller from its state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutInputs {
    pub sheet_height: f32,
    pub header_height: f32,
    pub keyboard_offset: f32,
    pub is_visible: bool,
}

impl LayoutInputs {
    /// Offset of the sheet's bottom edge from the container's bottom edge:
    /// negative while riding above the keyboard, `sheet_height` while
    /// off-screen.
    pub fn bottom_offset(&self) -> f32 {
        if self.is_visible {
            -self.keyboard_offset
        } else {
            self.sheet_height
        }
    }
}

/// Capability surface the controller layouts through.
pub trait LayoutDriver {
    /// Commit a new sheet height ahead of the next layout pass.
    fn apply_height(&self, _height: f32) {}

    /// Commit a new bottom-edge offset ahead of the next layout pass.
    fn apply_bottom_offset(&self, _offset: f32) {}

    /// Write committed frames for the sheet, header, and scroll region.
    fn perform_layout_pass(&self, views: &SheetViewTree, inputs: &LayoutInputs);
}

/// Which layout strategy a presentation uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutStrategy {
    /// Compute every frame rect directly from the layout inputs.
    Frame,
    /// Keep bottom/height anchor constants and solve frames from them.
    Constraint,
}

impl LayoutStrategy {
    pub(crate) fn driver(self) -> Rc<dyn LayoutDriver> {
        match self {
            LayoutStrategy::Frame => Rc::new(FrameLayoutDriver),
            LayoutStrategy::Constraint => Rc::new(ConstraintLayoutDriver::default()),
        }
    }
}

/// Stateless driver: frames are a pure function of the layout inputs.
pub struct FrameLayoutDriver;

impl LayoutDriver for FrameLayoutDriver {
    fn perform_layout_pass(&self, views: &SheetViewTree, inputs: &LayoutInputs) {
        let bounds = views.container_bounds();
        let sheet_y = if inputs.is_visible {
            bounds.height - inputs.sheet_height - inputs.keyboard_offset
        } else {
            bounds.height
        };
        views
            .sheet()
            .set_frame(Rect::new(0.0, sheet_y, bounds.width, inputs.sheet_height));
        layout_sheet_children(views, inputs, bounds.width);
    }
}

/// Constraint driver: the controller's applies update anchor constants, and
/// the pass solves frames from them.
#[derive(Default)]
pub struct ConstraintLayoutDriver {
    bottom_constant: Cell<f32>,
    height_constant: Cell<f32>,
}

impl LayoutDriver for ConstraintLayoutDriver {
    fn apply_height(&self, height: f32) {
        self.height_constant.set(height);
    }

    fn apply_bottom_offset(&self, offset: f32) {
        self.bottom_constant.set(offset);
    }

    fn perform_layout_pass(&self, views: &SheetViewTree, inputs: &LayoutInputs) {
        let bounds = views.container_bounds();
        let height = self.height_constant.get();
        let sheet_bottom = bounds.height + self.bottom_constant.get();
        views
            .sheet()
            .set_frame(Rect::new(0.0, sheet_bottom - height, bounds.width, height));
        layout_sheet_children(views, inputs, bounds.width);
    }
}

fn layout_sheet_children(views: &SheetViewTree, inputs: &LayoutInputs, width: f32) {
    views
        .set_header_frame(Rect::new(0.0, 0.0, width, inputs.header_height));
    views.set_scroll_frame(Rect::new(
        0.0,
        inputs.header_height,
        width,
        (inputs.sheet_height - inputs.header_height).max(0.0),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use bottomsheet_ui_graphics::EdgeInsets;

    fn run_pass(strategy: LayoutStrategy, inputs: &LayoutInputs) -> (Rect, Rect, Rect) {
        let views = SheetViewTree::new(
            Rect::new(0.0, 0.0, 375.0, 800.0),
            EdgeInsets::bottom(34.0),
            16.0,
        );
        let driver = strategy.driver();
        driver.apply_height(inputs.sheet_height);
        driver.apply_bottom_offset(inputs.bottom_offset());
        driver.perform_layout_pass(&views, inputs);
        (views.sheet().frame(), views.header_frame(), views.scroll_frame())
    }

    #[test]
    fn both_strategies_agree_on_geometry() {
        let cases = [
            LayoutInputs {
                sheet_height: 300.0,
                header_height: 0.0,
                keyboard_offset: 0.0,
                is_visible: true,
            },
            LayoutInputs {
                sheet_height: 300.0,
                header_height: 56.0,
                keyboard_offset: 0.0,
                is_visible: false,
            },
            LayoutInputs {
                sheet_height: 420.0,
                header_height: 56.0,
                keyboard_offset: 300.0,
                is_visible: true,
            },
        ];
        for inputs in cases {
            let frame_result = run_pass(LayoutStrategy::Frame, &inputs);
            let constraint_result = run_pass(LayoutStrategy::Constraint, &inputs);
            assert_eq!(frame_result, constraint_result, "inputs: {inputs:?}");
        }
    }

    #[test]
    fn visible_sheet_rests_on_container_bottom() {
        let inputs = LayoutInputs {
            sheet_height: 300.0,
            header_height: 0.0,
            keyboard_offset: 0.0,
            is_visible: true,
        };
        let (sheet, _, _) = run_pass(LayoutStrategy::Frame, &inputs);
        assert_eq!(sheet, Rect::new(0.0, 500.0, 375.0, 300.0));
    }

    #[test]
    fn hidden_sheet_sits_below_container() {
        let inputs = LayoutInputs {
            sheet_height: 300.0,
            header_height: 0.0,
            keyboard_offset: 0.0,
            is_visible: false,
        };
        let (sheet, _, _) = run_pass(LayoutStrategy::Frame, &inputs);
        assert_eq!(sheet.y, 800.0);
    }

    #[test]
    fn keyboard_offset_lifts_the_sheet() {
        let inputs = LayoutInputs {
            sheet_height: 300.0,
            header_height: 0.0,
            keyboard_offset: 260.0,
            is_visible: true,
        };
        let (sheet, _, _) = run_pass(LayoutStrategy::Constraint, &inputs);
        assert_eq!(sheet.y, 240.0);
    }

    #[test]
    fn header_splits_the_sheet_from_the_scroll_region() {
        let inputs = LayoutInputs {
            sheet_height: 400.0,
            header_height: 56.0,
            keyboard_offset: 0.0,
            is_visible: true,
        };
        let (_, header, scroll) = run_pass(LayoutStrategy::Frame, &inputs);
        assert_eq!(header, Rect::new(0.0, 0.0, 375.0, 56.0));
        assert_eq!(scroll, Rect::new(0.0, 56.0, 375.0, 344.0));
    }
}
