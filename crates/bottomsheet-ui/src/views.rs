//! The sheet's view tree.
//!
//! A rendering-agnostic stand-in for the container/sheet/header/scroll view
//! hierarchy. Layout drivers write committed frames; the animator converges
//! the presented frame toward the committed one; the gesture interpreter
//! owns the translation transform while a drag is active. Hosts read
//! [`SheetViewTree::visible_sheet_frame`] each frame to draw.

use std::cell::Cell;
use std::rc::Rc;

use bottomsheet_foundation::ScrollState;
use bottomsheet_ui_graphics::{EdgeInsets, Point, Rect, Translation};

/// The sheet view itself.
pub struct SheetNode {
    frame: Cell<Rect>,
    presented_frame: Cell<Rect>,
    transform: Cell<Translation>,
    corner_radius: Cell<f32>,
}

impl SheetNode {
    fn new(corner_radius: f32) -> Self {
        Self {
            frame: Cell::new(Rect::ZERO),
            presented_frame: Cell::new(Rect::ZERO),
            transform: Cell::new(Translation::IDENTITY),
            corner_radius: Cell::new(corner_radius),
        }
    }

    /// Committed layout frame.
    pub fn frame(&self) -> Rect {
        self.frame.get()
    }

    pub fn set_frame(&self, frame: Rect) {
        self.frame.set(frame);
    }

    /// On-screen frame, converging toward [`Self::frame`] during layout
    /// animations.
    pub fn presented_frame(&self) -> Rect {
        self.presented_frame.get()
    }

    pub fn set_presented_frame(&self, frame: Rect) {
        self.presented_frame.set(frame);
    }

    /// Gesture/animation translation applied on top of the presented frame.
    pub fn transform(&self) -> Translation {
        self.transform.get()
    }

    pub fn set_transform(&self, transform: Translation) {
        self.transform.set(transform);
    }

    pub fn corner_radius(&self) -> f32 {
        self.corner_radius.get()
    }
}

/// The container-scoped view hierarchy backing one sheet controller.
pub struct SheetViewTree {
    container_bounds: Cell<Rect>,
    safe_area: Cell<EdgeInsets>,
    sheet: SheetNode,
    header_frame: Cell<Rect>,
    scroll_frame: Cell<Rect>,
    scroll: ScrollState,
}

impl SheetViewTree {
    pub fn new(container_bounds: Rect, safe_area: EdgeInsets, corner_radius: f32) -> Rc<Self> {
        Rc::new(Self {
            container_bounds: Cell::new(container_bounds),
            safe_area: Cell::new(safe_area),
            sheet: SheetNode::new(corner_radius),
            header_frame: Cell::new(Rect::ZERO),
            scroll_frame: Cell::new(Rect::ZERO),
            scroll: ScrollState::new(),
        })
    }

    pub fn container_bounds(&self) -> Rect {
        self.container_bounds.get()
    }

    pub fn set_container_bounds(&self, bounds: Rect) {
        self.container_bounds.set(bounds);
    }

    pub fn safe_area(&self) -> EdgeInsets {
        self.safe_area.get()
    }

    pub fn set_safe_area(&self, safe_area: EdgeInsets) {
        self.safe_area.set(safe_area);
    }

    pub fn sheet(&self) -> &SheetNode {
        &self.sheet
    }

    pub fn header_frame(&self) -> Rect {
        self.header_frame.get()
    }

    pub fn set_header_frame(&self, frame: Rect) {
        self.header_frame.set(frame);
    }

    pub fn scroll_frame(&self) -> Rect {
        self.scroll_frame.get()
    }

    pub fn set_scroll_frame(&self, frame: Rect) {
        self.scroll_frame.set(frame);
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    /// Copies the committed frame into the presented frame, ending any
    /// visual divergence without animating.
    pub fn snap_presentation(&self) {
        self.sheet.presented_frame.set(self.sheet.frame.get());
    }

    /// What the host should draw this frame: the presented frame shifted by
    /// the active gesture/animation transform.
    pub fn visible_sheet_frame(&self) -> Rect {
        let transform = self.sheet.transform.get();
        self.sheet.presented_frame.get().translate(transform.x, transform.y)
    }

    /// Background taps dismiss only when they land outside the sheet.
    pub fn point_is_outside_sheet(&self, point: Point) -> bool {
        !self.sheet.frame.get().contains(point)
    }
}
