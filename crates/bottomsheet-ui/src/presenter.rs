//! Presentation adapters: hosting styles and binding bridges.
//!
//! A presenter owns at most one live controller, maps a boolean or optional
//! item binding onto the controller lifecycle, and turns drag progress into
//! dim-overlay opacity. Everything else — gestures, measurement, animation —
//! stays behind the controller's public contract.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use bottomsheet_animation::FrameScheduler;
use bottomsheet_foundation::{HostedContent, KeyboardNotificationCenter};
use bottomsheet_ui_graphics::{EdgeInsets, Rect};

use crate::config::SheetConfiguration;
use crate::consts;
use crate::controller::{SheetController, SheetEnvironment};
use crate::error::PresentError;
use crate::layout::LayoutStrategy;

/// How the sheet is hosted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PresentationStyle {
    /// Overlay inside the caller's own container.
    InPlaceOverlay,
    /// Full modal presentation into the screen's window.
    FullModal,
    /// Overlay positioned relative to a specific content rect.
    AnchoredOverlay { anchor: Rect },
}

/// Host services and geometry shared by every presentation.
#[derive(Clone)]
pub struct HostContext {
    /// The caller's container, used by in-place overlays.
    pub container_bounds: Rect,
    /// The screen/window bounds, required for full modal presentation.
    /// `None` models "no window to present into".
    pub screen_bounds: Option<Rect>,
    pub safe_area: EdgeInsets,
    pub scheduler: FrameScheduler,
    pub keyboard: KeyboardNotificationCenter,
}

/// Boolean presentation binding.
///
/// Flipping the value on presents; flipping it off while presented triggers
/// the dismiss animation, and the binding is reset exactly once from the
/// dismissal callback when the sheet dismisses itself.
#[derive(Clone, Default)]
pub struct SheetBinding {
    inner: Rc<BindingInner>,
}

#[derive(Default)]
struct BindingInner {
    value: Cell<bool>,
    observer: RefCell<Option<Box<dyn Fn(bool)>>>,
}

impl SheetBinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> bool {
        self.inner.value.get()
    }

    pub fn set(&self, presented: bool) {
        if self.inner.value.get() == presented {
            return;
        }
        self.inner.value.set(presented);
        if let Some(observer) = self.inner.observer.borrow().as_ref() {
            observer(presented);
        }
    }

    /// Reset from the dismissal path without re-notifying the observer.
    fn set_silently(&self, presented: bool) {
        self.inner.value.set(presented);
    }

    fn observe(&self, observer: impl Fn(bool) + 'static) {
        *self.inner.observer.borrow_mut() = Some(Box::new(observer));
    }
}

/// Optional-item presentation binding. The item is captured when the sheet
/// presents, so mutating the binding mid-presentation does not re-render
/// the live sheet.
pub struct ItemBinding<T> {
    inner: Rc<ItemBindingInner<T>>,
}

impl<T> Clone for ItemBinding<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

struct ItemBindingInner<T> {
    value: RefCell<Option<T>>,
    observer: RefCell<Option<Box<dyn Fn(bool)>>>,
}

impl<T> Default for ItemBinding<T> {
    fn default() -> Self {
        Self {
            inner: Rc::new(ItemBindingInner {
                value: RefCell::new(None),
                observer: RefCell::new(None),
            }),
        }
    }
}

impl<T: 'static> ItemBinding<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_some(&self) -> bool {
        self.inner.value.borrow().is_some()
    }

    pub fn with_item<R>(&self, f: impl FnOnce(Option<&T>) -> R) -> R {
        f(self.inner.value.borrow().as_ref())
    }

    pub fn set(&self, item: Option<T>) {
        let has_item = item.is_some();
        *self.inner.value.borrow_mut() = item;
        if let Some(observer) = self.inner.observer.borrow().as_ref() {
            observer(has_item);
        }
    }

    fn clear_silently(&self) {
        *self.inner.value.borrow_mut() = None;
    }

    fn observe(&self, observer: impl Fn(bool) + 'static) {
        *self.inner.observer.borrow_mut() = Some(Box::new(observer));
    }
}

/// External-facing entry point: instantiates controllers in one of the
/// three hosting styles and bridges bindings to the controller lifecycle.
pub struct SheetPresenter {
    host: HostContext,
    style: PresentationStyle,
    layout_strategy: LayoutStrategy,
    config: SheetConfiguration,
    active: RefCell<Option<Rc<SheetController>>>,
    dim_opacity: Cell<f32>,
    dim_listener: RefCell<Option<Box<dyn Fn(f32, bool)>>>,
}

impl SheetPresenter {
    /// Modal presentations go through the constraint layout path; overlays
    /// lay frames out directly.
    pub fn new(host: HostContext, style: PresentationStyle, config: SheetConfiguration) -> Rc<Self> {
        let layout_strategy = match style {
            PresentationStyle::FullModal => LayoutStrategy::Constraint,
            _ => LayoutStrategy::Frame,
        };
        Self::with_layout_strategy(host, style, config, layout_strategy)
    }

    pub fn with_layout_strategy(
        host: HostContext,
        style: PresentationStyle,
        config: SheetConfiguration,
        layout_strategy: LayoutStrategy,
    ) -> Rc<Self> {
        Rc::new(Self {
            host,
            style,
            layout_strategy,
            config,
            active: RefCell::new(None),
            dim_opacity: Cell::new(0.0),
            dim_listener: RefCell::new(None),
        })
    }

    /// Presents `content`, returning the live controller.
    pub fn present(
        self: &Rc<Self>,
        content: HostedContent,
    ) -> Result<Rc<SheetController>, PresentError> {
        self.present_with_callback(content, || {})
    }

    /// Presents `content` and runs `on_dismiss` exactly once when the sheet
    /// reaches its terminal state.
    pub fn present_with_callback(
        self: &Rc<Self>,
        content: HostedContent,
        on_dismiss: impl FnOnce() + 'static,
    ) -> Result<Rc<SheetController>, PresentError> {
        if self.active.borrow().is_some() {
            return Err(PresentError::AlreadyPresented);
        }
        let container = self.resolve_container()?;

        let environment = SheetEnvironment {
            container_bounds: container,
            safe_area: self.host.safe_area,
            scheduler: self.host.scheduler.clone(),
            keyboard: self.host.keyboard.clone(),
        };

        let presenter = Rc::downgrade(self);
        let controller = SheetController::new(
            self.config,
            content,
            environment,
            self.layout_strategy,
            move || {
                if let Some(presenter) = presenter.upgrade() {
                    presenter.active.borrow_mut().take();
                }
                on_dismiss();
            },
        );

        let dim_presenter = Rc::downgrade(self);
        controller.set_drag_progress_listener(move |progress, animated| {
            if let Some(presenter) = dim_presenter.upgrade() {
                presenter.update_dim(progress, animated);
            }
        });

        *self.active.borrow_mut() = Some(controller.clone());
        controller.present();
        Ok(controller)
    }

    /// Dismisses the active sheet, if any.
    pub fn dismiss(&self) {
        let active = self.active.borrow().clone();
        if let Some(controller) = active {
            controller.dismiss();
        }
    }

    pub fn is_presenting(&self) -> bool {
        self.active.borrow().is_some()
    }

    pub fn active_controller(&self) -> Option<Rc<SheetController>> {
        self.active.borrow().clone()
    }

    /// Current dim-overlay opacity: `base × (1 − drag progress)`.
    pub fn dim_opacity(&self) -> f32 {
        self.dim_opacity.get()
    }

    pub fn set_dim_listener(&self, listener: impl Fn(f32, bool) + 'static) {
        *self.dim_listener.borrow_mut() = Some(Box::new(listener));
    }

    /// Drives this presenter from a boolean binding.
    pub fn bind_presented(
        self: &Rc<Self>,
        binding: &SheetBinding,
        make_content: impl Fn() -> HostedContent + 'static,
    ) {
        let presenter = Rc::downgrade(self);
        let binding_for_observer = binding.clone();
        binding.observe(move |presented| {
            let Some(presenter) = presenter.upgrade() else {
                return;
            };
            if presented {
                let reset_binding = binding_for_observer.clone();
                let result = presenter
                    .present_with_callback(make_content(), move || reset_binding.set_silently(false));
                if let Err(err) = result {
                    log::warn!("sheet binding present failed: {err}");
                    binding_for_observer.set_silently(false);
                }
            } else {
                presenter.dismiss();
            }
        });
    }

    /// Drives this presenter from an optional-item binding. The item is
    /// captured at present time and handed to `make_content`.
    pub fn bind_item<T: 'static>(
        self: &Rc<Self>,
        binding: &ItemBinding<T>,
        make_content: impl Fn(&T) -> HostedContent + 'static,
    ) {
        let presenter = Rc::downgrade(self);
        let binding_for_observer = binding.clone();
        binding.observe(move |has_item| {
            let Some(presenter) = presenter.upgrade() else {
                return;
            };
            if has_item {
                let Some(content) =
                    binding_for_observer.with_item(|item| item.map(&make_content))
                else {
                    return;
                };
                let reset_binding = binding_for_observer.clone();
                let result = presenter
                    .present_with_callback(content, move || reset_binding.clear_silently());
                if let Err(err) = result {
                    log::warn!("sheet item binding present failed: {err}");
                    binding_for_observer.clear_silently();
                }
            } else {
                presenter.dismiss();
            }
        });
    }

    fn resolve_container(&self) -> Result<Rect, PresentError> {
        let container = match self.style {
            PresentationStyle::InPlaceOverlay => self.host.container_bounds,
            PresentationStyle::FullModal => match self.host.screen_bounds {
                Some(bounds) => bounds,
                None => {
                    log::error!("full modal sheet requested without a window");
                    return Err(PresentError::NoHostContainer);
                }
            },
            PresentationStyle::AnchoredOverlay { anchor } => anchor,
        };
        if container.width <= 0.0 || container.height <= 0.0 {
            log::error!("sheet host container is degenerate: {container:?}");
            return Err(PresentError::NoHostContainer);
        }
        Ok(container)
    }

    fn update_dim(&self, progress: f32, animated: bool) {
        let opacity = consts::DIM_OPACITY * (1.0 - progress.clamp(0.0, 1.0));
        self.dim_opacity.set(opacity);
        if let Some(listener) = self.dim_listener.borrow().as_ref() {
            listener(opacity, animated);
        }
    }
}

#[cfg(test)]
#[path = "tests/presenter_tests.rs"]
mod tests;
