//! Content measurement for sheet sizing.
//!
//! The sheet treats hosted content as an opaque measurable unit: it can ask
//! for the natural size at a given width and nothing else. Content owns its
//! own rendering and invalidation; the sheet only re-queries.

use std::rc::Rc;

use bottomsheet_ui_graphics::Size;

/// A renderable unit whose intrinsic size can be queried for a width.
///
/// Returning a degenerate size (see [`Size::is_degenerate`]) means "not
/// ready yet"; the sheet skips that measurement cycle instead of collapsing
/// to zero height.
pub trait MeasurableContent {
    fn measure(&self, width: f32) -> Size;
}

impl<F> MeasurableContent for F
where
    F: Fn(f32) -> Size,
{
    fn measure(&self, width: f32) -> Size {
        self(width)
    }
}

/// The content hosted inside a sheet: an optional header plus a body.
///
/// The header, when present, renders above the scrollable region and doubles
/// as the sheet's drag handle.
#[derive(Clone)]
pub struct HostedContent {
    header: Option<Rc<dyn MeasurableContent>>,
    body: Rc<dyn MeasurableContent>,
}

impl HostedContent {
    pub fn new(body: Rc<dyn MeasurableContent>) -> Self {
        Self { header: None, body }
    }

    pub fn with_header(
        header: Rc<dyn MeasurableContent>,
        body: Rc<dyn MeasurableContent>,
    ) -> Self {
        Self {
            header: Some(header),
            body,
        }
    }

    pub fn has_header(&self) -> bool {
        self.header.is_some()
    }

    /// Natural header height at the given width; 0.0 without a header.
    pub fn measure_header_height(&self, width: f32) -> f32 {
        match &self.header {
            Some(header) => {
                let size = header.measure(width);
                if size.is_degenerate() {
                    0.0
                } else {
                    size.height
                }
            }
            None => 0.0,
        }
    }

    /// Natural body size at the given width.
    pub fn measure_body(&self, width: f32) -> Size {
        self.body.measure(width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn closure_content_measures() {
        let content = HostedContent::new(Rc::new(|width: f32| Size::new(width, 420.0)));
        assert!(!content.has_header());
        assert_eq!(content.measure_header_height(375.0), 0.0);
        assert_eq!(content.measure_body(375.0).height, 420.0);
    }

    #[test]
    fn header_height_is_included_when_present() {
        let content = HostedContent::with_header(
            Rc::new(|_w: f32| Size::new(375.0, 56.0)),
            Rc::new(|_w: f32| Size::new(375.0, 420.0)),
        );
        assert!(content.has_header());
        assert_eq!(content.measure_header_height(375.0), 56.0);
    }

    #[test]
    fn degenerate_header_measures_as_zero() {
        let content = HostedContent::with_header(
            Rc::new(|_w: f32| Size::ZERO),
            Rc::new(|_w: f32| Size::new(375.0, 420.0)),
        );
        assert_eq!(content.measure_header_height(375.0), 0.0);
    }

    #[test]
    fn content_can_change_between_measurements() {
        let height = Rc::new(Cell::new(300.0f32));
        let body_height = height.clone();
        let content =
            HostedContent::new(Rc::new(move |_w: f32| Size::new(375.0, body_height.get())));

        assert_eq!(content.measure_body(375.0).height, 300.0);
        height.set(900.0);
        assert_eq!(content.measure_body(375.0).height, 900.0);
    }
}
