//! Headless walkthrough of the bottom sheet pipeline.
//!
//! Presents a sheet into a scripted 375×800 container, then replays the
//! interactions a user would perform: an uncommitted drag that snaps back,
//! a keyboard round trip, and a committing drag that dismisses. Frames are
//! driven in real time off a wall-clock instant, so the printed geometry is
//! what a renderer would draw.
//!
//! Run with `--features logging` and `RUST_LOG=debug` to see the
//! controller's lifecycle logs interleaved with the script.

use std::rc::Rc;
use std::time::Duration;

use anyhow::{ensure, Result};
use web_time::Instant;

use bottomsheet_animation::FrameScheduler;
use bottomsheet_foundation::{
    HostedContent, KeyboardNotification, KeyboardNotificationCenter, PanRecognizer, PointerEvent,
    PointerEventKind,
};
use bottomsheet_ui::{
    HostContext, PresentationStyle, SheetBinding, SheetConfiguration, SheetController,
    SheetPresenter,
};
use bottomsheet_ui_graphics::{EdgeInsets, Point, Rect, Size};

struct Script {
    scheduler: FrameScheduler,
    started: Instant,
}

impl Script {
    fn new(scheduler: FrameScheduler) -> Self {
        Self {
            scheduler,
            started: Instant::now(),
        }
    }

    fn now_ms(&self) -> i64 {
        self.started.elapsed().as_millis() as i64
    }

    /// Drive the scheduler for roughly `duration_ms` of wall time.
    fn run(&self, duration_ms: u64) {
        let deadline = self.started.elapsed() + Duration::from_millis(duration_ms);
        while self.started.elapsed() < deadline {
            std::thread::sleep(Duration::from_millis(16));
            let nanos = self.started.elapsed().as_nanos() as u64;
            self.scheduler.drain(nanos);
        }
    }
}

fn print_sheet(label: &str, controller: &SheetController, dim: f32) {
    let frame = controller.views().visible_sheet_frame();
    println!(
        "{label:<28} sheet y={:7.1} h={:5.1} dim={dim:.2} visible={} dismissing={}",
        frame.y,
        frame.height,
        controller.state().is_visible(),
        controller.state().is_dismissing(),
    );
}

fn main() -> Result<()> {
    #[cfg(feature = "logging")]
    env_logger::init();

    let scheduler = FrameScheduler::new();
    let keyboard = KeyboardNotificationCenter::new();
    let host = HostContext {
        container_bounds: Rect::new(0.0, 0.0, 375.0, 800.0),
        screen_bounds: Some(Rect::new(0.0, 0.0, 375.0, 812.0)),
        safe_area: EdgeInsets::bottom(34.0),
        scheduler: scheduler.clone(),
        keyboard: keyboard.clone(),
    };

    let presenter = SheetPresenter::new(
        host,
        PresentationStyle::InPlaceOverlay,
        SheetConfiguration::default(),
    );

    let binding = SheetBinding::new();
    presenter.bind_presented(&binding, || {
        HostedContent::with_header(
            Rc::new(|width: f32| Size::new(width, 56.0)),
            Rc::new(|width: f32| Size::new(width, 420.0)),
        )
    });

    let script = Script::new(scheduler);

    log::info!("starting scripted sheet walkthrough");
    println!("== present ==");
    binding.set(true);
    let controller = presenter
        .active_controller()
        .ok_or_else(|| anyhow::anyhow!("presenter did not activate a controller"))?;
    script.run(600);
    print_sheet("after show transition", &controller, presenter.dim_opacity());

    println!("== uncommitted drag (snaps back) ==");
    let mut pan = PanRecognizer::new();
    let scroll_area = Point::new(180.0, 520.0);
    feed(&mut pan, &controller, PointerEventKind::Down, scroll_area, &script);
    // Slow 10px steps: well under both the distance and velocity thresholds.
    for step in 1..=6 {
        let position = Point::new(scroll_area.x, scroll_area.y + step as f32 * 10.0);
        feed(&mut pan, &controller, PointerEventKind::Move, position, &script);
        std::thread::sleep(Duration::from_millis(40));
    }
    print_sheet("mid drag", &controller, presenter.dim_opacity());
    feed(
        &mut pan,
        &controller,
        PointerEventKind::Up,
        Point::new(scroll_area.x, scroll_area.y + 60.0),
        &script,
    );
    script.run(400);
    print_sheet("after snap back", &controller, presenter.dim_opacity());

    println!("== keyboard round trip ==");
    keyboard.post(KeyboardNotification::will_show(336.0, 250));
    script.run(300);
    print_sheet("keyboard up", &controller, presenter.dim_opacity());
    keyboard.post(KeyboardNotification::will_hide(250));
    script.run(300);
    print_sheet("keyboard down", &controller, presenter.dim_opacity());

    println!("== committing drag ==");
    let mut pan = PanRecognizer::new();
    feed(&mut pan, &controller, PointerEventKind::Down, scroll_area, &script);
    for step in 1..=8 {
        let position = Point::new(scroll_area.x, scroll_area.y + step as f32 * 40.0);
        feed(&mut pan, &controller, PointerEventKind::Move, position, &script);
        std::thread::sleep(Duration::from_millis(8));
    }
    feed(
        &mut pan,
        &controller,
        PointerEventKind::Up,
        Point::new(scroll_area.x, scroll_area.y + 320.0),
        &script,
    );
    script.run(400);
    print_sheet("after committed drag", &controller, presenter.dim_opacity());

    ensure!(!presenter.is_presenting(), "sheet should be dismissed");
    ensure!(!binding.get(), "binding should have been reset");
    log::info!("walkthrough complete");
    println!("sheet dismissed; binding reset");
    Ok(())
}

fn feed(
    pan: &mut PanRecognizer,
    controller: &SheetController,
    kind: PointerEventKind,
    position: Point,
    script: &Script,
) {
    let event = PointerEvent::new(kind, position, script.now_ms());
    if let Some(sample) = pan.handle_event(&event) {
        controller.handle_scroll_pan(&sample);
    }
}
