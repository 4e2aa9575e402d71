// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless walk through the element tree: two nested boxes, two-tier
//! dispatch, a resize and a flush.
//!
//! Events go to both a [`PrettyPrintSink`] on stdout and a [`RecorderSink`];
//! the recording is exported as a Chrome trace JSON file at the end.

use std::cell::RefCell;
use std::fs::File;
use std::io::BufWriter;
use std::rc::Rc;

use kurbo::Circle;
use lamina_core::backend::Presenter;
use lamina_core::element::{ElementId, ElementTree, WindowConfig};
use lamina_core::message::{Arg, Message, handler};
use lamina_core::rect::Rectangle;
use lamina_core::trace::{
    DamageEvent, FlushBeginEvent, FlushEndEvent, LayoutEvent, PaintEvent, ResizeEvent, TraceSink,
    Tracer,
};

use lamina_debug::pretty::PrettyPrintSink;
use lamina_debug::recorder::RecorderSink;

/// Per-element payload: the fill colour.
#[derive(Clone, Copy, Debug)]
struct Fill(u32);

const BACKGROUND: u32 = 0xff20_2020;
const PANEL: u32 = 0xff30_60a0;
const BADGE: u32 = 0xffe0_a030;

/// Forwards every event to two sinks.
#[derive(Debug)]
struct Tee<A, B>(A, B);

impl<A: TraceSink, B: TraceSink> TraceSink for Tee<A, B> {
    fn on_layout(&mut self, e: &LayoutEvent) {
        self.0.on_layout(e);
        self.1.on_layout(e);
    }

    fn on_damage(&mut self, e: &DamageEvent) {
        self.0.on_damage(e);
        self.1.on_damage(e);
    }

    fn on_resize(&mut self, e: &ResizeEvent) {
        self.0.on_resize(e);
        self.1.on_resize(e);
    }

    fn on_flush_begin(&mut self, e: &FlushBeginEvent) {
        self.0.on_flush_begin(e);
        self.1.on_flush_begin(e);
    }

    fn on_flush_end(&mut self, e: &FlushEndEvent) {
        self.0.on_flush_end(e);
        self.1.on_flush_end(e);
    }

    fn on_paint(&mut self, e: &PaintEvent) {
        self.0.on_paint(e);
        self.1.on_paint(e);
    }
}

/// Stands in for a platform surface: counts presented pixels.
#[derive(Debug, Default)]
struct HeadlessPresenter {
    frames: u32,
    pixels: u64,
}

impl Presenter for HeadlessPresenter {
    fn present(
        &mut self,
        window: ElementId,
        pixels: &[u32],
        width: u32,
        height: u32,
        region: Rectangle,
    ) {
        self.frames += 1;
        let area = u64::from(region.width().unsigned_abs())
            * u64::from(region.height().unsigned_abs());
        self.pixels += area;
        let centre = (height / 2) as usize * width as usize + (width / 2) as usize;
        println!(
            "present {window:?} {}x{} region={region:?} centre=#{:08x}",
            width,
            height,
            pixels.get(centre).copied().unwrap_or_default(),
        );
    }
}

/// Class handler of the panel: fills its bounds, keeps its first child
/// inset by 20 pixels, and handles `user(1)`.
fn panel_class(
    tree: &mut ElementTree<Fill>,
    id: ElementId,
    message: Message,
    di: i32,
    mut arg: Arg<'_>,
) -> i32 {
    match message {
        Message::LAYOUT => {
            if let Some(badge) = tree.child(id, 0) {
                let inner = tree.bounds(id).inset(20);
                tree.move_element(badge, inner, false);
            }
            1
        }
        Message::PAINT => {
            let Fill(colour) = *tree.payload(id);
            if let Some(painter) = arg.painter() {
                painter.fill_rect(tree.bounds(id), colour);
            }
            1
        }
        m if m == Message::user(1) => {
            println!("  panel class handled {m:?} di={di}");
            1
        }
        _ => 0,
    }
}

/// User handler of the panel: handles `user(2)`, declines everything else.
fn panel_user(
    _tree: &mut ElementTree<Fill>,
    _id: ElementId,
    message: Message,
    di: i32,
    _arg: Arg<'_>,
) -> i32 {
    if message == Message::user(2) {
        println!("  panel user handled {message:?} di={di}");
        return 1;
    }
    0
}

/// Class handler of the badge: paints a disc inscribed in its bounds.
fn badge_class(
    tree: &mut ElementTree<Fill>,
    id: ElementId,
    message: Message,
    _di: i32,
    mut arg: Arg<'_>,
) -> i32 {
    if message != Message::PAINT {
        return 0;
    }
    let Fill(colour) = *tree.payload(id);
    let bounds = kurbo::Rect::from(tree.bounds(id));
    let disc = Circle::new(bounds.center(), bounds.width().min(bounds.height()) / 2.0);
    if let Some(painter) = arg.painter() {
        painter.fill_shape(&disc, colour);
    }
    1
}

fn main() {
    // -- sinks -------------------------------------------------------------
    let pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let recorder = Rc::new(RefCell::new(RecorderSink::new()));

    // -- tree --------------------------------------------------------------
    let mut tree = ElementTree::new();
    tree.set_tracer(Tracer::new(Box::new(Tee(pretty, Rc::clone(&recorder)))));

    let window = tree.create_window(WindowConfig::new(300, 200), Fill(BACKGROUND));
    let panel = tree.create_element(Some(window), 0, Some(handler(panel_class)), Fill(PANEL));
    tree.set_user_handler(panel, Some(handler(panel_user)));
    let badge = tree.create_element(Some(panel), 0, Some(handler(badge_class)), Fill(BADGE));

    // The window was laid out before it had children.
    tree.move_element(window, Rectangle::from_size(300, 200), true);
    println!(
        "panel={:?} badge={:?}",
        tree.bounds(panel),
        tree.bounds(badge)
    );

    // -- dispatch ----------------------------------------------------------
    for (name, id) in [("panel", panel), ("badge", badge)] {
        for n in 1..=3 {
            let result = tree.dispatch(id, Message::user(n), n.cast_signed(), Arg::None);
            println!("{name} <- {:?} = {result}", Message::user(n));
        }
    }

    // -- frames ------------------------------------------------------------
    let mut presenter = HeadlessPresenter::default();
    tree.flush(window, &mut presenter);

    tree.repaint(badge, None);
    tree.flush(window, &mut presenter);

    tree.resize_window(window, 400, 260);
    tree.flush(window, &mut presenter);

    println!(
        "{} frames, {} pixels presented",
        presenter.frames, presenter.pixels
    );

    // -- export Chrome trace -----------------------------------------------
    drop(tree.take_tracer());
    let path = "nested_boxes.trace.json";
    let file = File::create(path).expect("failed to create trace file");
    let mut writer = BufWriter::new(file);
    lamina_debug::chrome::export(recorder.borrow().as_bytes(), &mut writer)
        .expect("failed to write Chrome trace");

    println!("Wrote {path}");
}
