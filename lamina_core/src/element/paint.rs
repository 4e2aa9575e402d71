// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Damage accumulation and the paint walk.
//!
//! [`ElementTree::repaint`] clips a request to the element's clip and merges
//! it into the window's update region with a bounding union, so any number of
//! requests between two flushes collapse into one rectangle. Damage only
//! grows until [`ElementTree::flush`] consumes it.
//!
//! A flush walks the window's tree once, front to back in child order. Each
//! node narrows the painter clip by its own clip; a node whose narrowed clip is
//! invalid is pruned together with its subtree, which is sound because a
//! descendant's clip never exceeds its ancestor's. Siblings each start from
//! their parent's narrowed clip.

use super::id::ElementId;
use super::store::ElementTree;
use crate::backend::Presenter;
use crate::message::{Arg, Message};
use crate::painter::Painter;
use crate::rect::Rectangle;
use crate::trace::{DamageEvent, FlushBeginEvent, FlushEndEvent};

/// Counters gathered during one paint walk.
#[derive(Clone, Copy, Debug, Default)]
struct WalkStats {
    painted: u32,
    pruned: u32,
}

impl<P> ElementTree<P> {
    /// Requests that `region` of `id` be repainted on the next flush.
    ///
    /// `None` means the element's whole bounds. The region is clipped to the
    /// element's clip; a request that falls entirely outside it is a no-op.
    ///
    /// Must not be called from a `PAINT` handler.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn repaint(&mut self, id: ElementId, region: Option<Rectangle>) {
        self.validate(id);
        let i = id.idx as usize;
        let requested = region.unwrap_or(self.bounds[i]);
        let clipped = requested.intersection(self.clip[i]);
        let accepted = clipped.is_valid().then_some(clipped);

        let window = self.id_at(self.window[i]);
        let surface = self.surface_mut(window);
        if let Some(accepted) = accepted {
            surface.update_region = Some(match surface.update_region {
                Some(pending) => pending.bounding(accepted),
                None => accepted,
            });
        }
        let update_region = surface.update_region;

        self.tracer.damage(&DamageEvent {
            element: id,
            window,
            requested,
            accepted,
            update_region,
        });
    }

    /// Paints the pending damage of `window` and presents it.
    ///
    /// Does nothing and returns `false` when no damage is pending. Otherwise
    /// every element whose clip intersects the damage receives `PAINT` with a
    /// [`Painter`] narrowed to that intersection, the buffer is handed to
    /// `presenter`, and the update region is cleared. Damage that no longer
    /// overlaps the window is dropped without presenting.
    ///
    /// Paint handlers must not call [`repaint`](Self::repaint) or
    /// [`move_element`](Self::move_element); damage they add is discarded
    /// when the flush completes.
    ///
    /// # Panics
    ///
    /// Panics if `window` is stale or not a window root.
    pub fn flush(&mut self, window: ElementId, presenter: &mut (impl Presenter + ?Sized)) -> bool {
        let surface = self.surface_mut(window);
        let Some(pending) = surface.update_region else {
            return false;
        };
        let region = surface.rect().intersection(pending);
        if !region.is_valid() {
            surface.update_region = None;
            return false;
        }
        let (width, height) = (surface.width, surface.height);
        let pixels = core::mem::take(&mut surface.pixels);

        self.tracer.flush_begin(&FlushBeginEvent { window, region });

        let mut painter = Painter::new(pixels, width, height, region);
        let mut stats = WalkStats::default();
        self.paint_subtree(window.idx, &mut painter, &mut stats);

        let surface = self.surface_mut(window);
        surface.pixels = painter.into_pixels();
        presenter.present(window, &surface.pixels, width, height, region);
        surface.update_region = None;

        self.tracer.flush_end(&FlushEndEvent {
            window,
            region,
            painted: stats.painted,
            pruned: stats.pruned,
        });
        true
    }

    /// Paints `idx` and its descendants within `painter.clip`.
    fn paint_subtree(&mut self, idx: u32, painter: &mut Painter, stats: &mut WalkStats) {
        let clip = painter.clip.intersection(self.clip[idx as usize]);
        if !clip.is_valid() {
            stats.pruned += 1;
            return;
        }

        painter.clip = clip;
        let id = self.id_at(idx);
        #[cfg(feature = "trace-rich")]
        self.tracer.paint(&crate::trace::PaintEvent { element: id, clip });
        self.dispatch(id, Message::PAINT, 0, Arg::Painter(painter));
        stats.painted += 1;

        let mut i = 0;
        while let Some(&child) = self.children[idx as usize].get(i) {
            painter.clip = clip;
            self.paint_subtree(child, painter, stats);
            i += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use super::*;
    use crate::element::WindowConfig;
    use crate::message::{Handler, handler};

    /// Records every present call.
    #[derive(Default)]
    struct RecordingPresenter {
        presents: Vec<(ElementId, Rectangle)>,
    }

    impl Presenter for RecordingPresenter {
        fn present(
            &mut self,
            window: ElementId,
            pixels: &[u32],
            width: u32,
            height: u32,
            region: Rectangle,
        ) {
            assert_eq!(pixels.len(), width as usize * height as usize);
            self.presents.push((window, region));
        }
    }

    /// Colour each element fills itself with.
    type Colour = u32;

    /// Fills the painter clip with the element's payload colour and logs
    /// the clip it was given.
    fn filler(log: &Rc<RefCell<Vec<(ElementId, Rectangle)>>>) -> Handler<Colour> {
        let log = Rc::clone(log);
        handler(move |tree: &mut ElementTree<Colour>, id, message, _, mut arg| {
            if message != Message::PAINT {
                return 0;
            }
            let colour = *tree.payload(id);
            let bounds = tree.bounds(id);
            if let Some(painter) = arg.painter() {
                log.borrow_mut().push((id, painter.clip()));
                painter.fill_rect(bounds, colour);
            }
            1
        })
    }

    /// Lays the single child out at the parent's bounds inset by 20.
    fn inset_layout() -> Handler<Colour> {
        handler(|tree: &mut ElementTree<Colour>, id, message, _, _| {
            if message == Message::LAYOUT {
                if let Some(child) = tree.child(id, 0) {
                    let inner = tree.bounds(id).inset(20);
                    tree.move_element(child, inner, false);
                }
                return 1;
            }
            0
        })
    }

    struct Scene {
        tree: ElementTree<Colour>,
        window: ElementId,
        a: ElementId,
        b: ElementId,
        log: Rc<RefCell<Vec<(ElementId, Rectangle)>>>,
    }

    /// 300×200 window; A fills it; B is A inset by 20 on every side.
    fn scene() -> Scene {
        let log = Rc::default();
        let mut tree = ElementTree::new();
        let window = tree.create_window(WindowConfig::new(300, 200), 0);
        let a = tree.create_element(Some(window), 0, Some(inset_layout()), 0xaa);
        tree.set_user_handler(a, Some(filler(&log)));
        let b = tree.create_element(Some(a), 0, Some(filler(&log)), 0xbb);
        tree.move_element(window, Rectangle::from_size(300, 200), true);
        tree.flush(window, &mut RecordingPresenter::default());
        log.borrow_mut().clear();
        Scene {
            tree,
            window,
            a,
            b,
            log,
        }
    }

    #[test]
    fn nested_inset_scenario() {
        let Scene {
            mut tree,
            window,
            a,
            b,
            ..
        } = scene();

        tree.move_element(a, Rectangle::new(0, 300, 0, 200), false);
        assert_eq!(tree.clip(a), Rectangle::new(0, 300, 0, 200));
        assert_eq!(tree.bounds(b), Rectangle::new(20, 280, 20, 180));
        assert_eq!(tree.clip(b), Rectangle::new(20, 280, 20, 180));

        assert_eq!(tree.update_region(window), None);
        tree.repaint(b, None);
        assert_eq!(
            tree.update_region(window),
            Some(Rectangle::new(20, 280, 20, 180))
        );
    }

    #[test]
    fn first_layout_comes_from_window() {
        let mut tree: ElementTree<Colour> = ElementTree::new();
        let window = tree.create_window(WindowConfig::new(300, 200), 0);
        let a = tree.create_element(Some(window), 0, Some(inset_layout()), 0);
        let b = tree.create_element(Some(a), 0, None, 0);

        tree.resize_window(window, 300, 200);
        // Same size: the root does not re-layout, so A is still unplaced.
        assert_eq!(tree.bounds(a), Rectangle::default());

        tree.move_element(window, Rectangle::new(0, 300, 0, 200), true);
        assert_eq!(tree.bounds(a), Rectangle::new(0, 300, 0, 200));
        assert_eq!(tree.bounds(b), Rectangle::new(20, 280, 20, 180));
    }

    #[test]
    fn repaint_outside_clip_is_noop() {
        let Scene {
            mut tree, window, b, ..
        } = scene();
        tree.repaint(b, Some(Rectangle::new(0, 10, 0, 10)));
        assert_eq!(tree.update_region(window), None);
        tree.repaint(b, Some(Rectangle::new(500, 600, 0, 10)));
        assert_eq!(tree.update_region(window), None);
    }

    #[test]
    fn repaint_is_clipped() {
        let Scene {
            mut tree, window, b, ..
        } = scene();
        tree.repaint(b, Some(Rectangle::new(0, 50, 0, 50)));
        assert_eq!(
            tree.update_region(window),
            Some(Rectangle::new(20, 50, 20, 50))
        );
    }

    #[test]
    fn repeated_repaints_merge_to_bounding_union() {
        let Scene {
            mut tree,
            window,
            a,
            ..
        } = scene();
        let regions = [
            Rectangle::new(10, 20, 10, 20),
            Rectangle::new(100, 120, 5, 8),
            Rectangle::new(10, 20, 10, 20),
            Rectangle::new(50, 60, 150, 190),
        ];
        for r in regions {
            tree.repaint(a, Some(r));
        }
        let union = regions.iter().copied().reduce(Rectangle::bounding);
        assert_eq!(tree.update_region(window), union);
        assert_eq!(union, Some(Rectangle::new(10, 120, 5, 190)));
    }

    #[test]
    fn flush_clears_damage_and_presents_region() {
        let Scene {
            mut tree,
            window,
            b,
            ..
        } = scene();
        let mut presenter = RecordingPresenter::default();
        assert!(!tree.flush(window, &mut presenter));
        assert!(presenter.presents.is_empty());

        tree.repaint(b, None);
        assert!(tree.flush(window, &mut presenter));
        assert_eq!(
            presenter.presents,
            [(window, Rectangle::new(20, 280, 20, 180))]
        );
        assert_eq!(tree.update_region(window), None);
    }

    #[test]
    fn flush_paints_only_intersecting_elements() {
        let Scene {
            mut tree,
            window,
            a,
            b,
            log,
        } = scene();
        let mut presenter = RecordingPresenter::default();

        // The window border strip is outside B.
        tree.repaint(a, Some(Rectangle::new(0, 300, 0, 10)));
        tree.flush(window, &mut presenter);
        assert_eq!(*log.borrow(), [(a, Rectangle::new(0, 300, 0, 10))]);

        log.borrow_mut().clear();
        tree.repaint(b, Some(Rectangle::new(0, 30, 0, 30)));
        tree.flush(window, &mut presenter);
        assert_eq!(
            *log.borrow(),
            [
                (a, Rectangle::new(20, 30, 20, 30)),
                (b, Rectangle::new(20, 30, 20, 30))
            ]
        );
    }

    #[test]
    fn flush_draws_in_paint_order() {
        let Scene {
            mut tree,
            window,
            b,
            ..
        } = scene();
        tree.repaint(window, None);
        tree.flush(window, &mut RecordingPresenter::default());

        let pixels = tree.pixels(window);
        let at = |x: usize, y: usize| pixels[y * 300 + x];
        assert_eq!(at(5, 5), 0xaa);
        assert_eq!(at(20, 20), 0xbb);
        assert_eq!(at(279, 179), 0xbb);
        assert_eq!(at(280, 179), 0xaa);

        // Damage confined to B leaves A's border untouched.
        *tree.payload_mut(b) = 0xcc;
        tree.repaint(b, None);
        tree.flush(window, &mut RecordingPresenter::default());
        let pixels = tree.pixels(window);
        assert_eq!(pixels[20 * 300 + 20], 0xcc);
        assert_eq!(pixels[5 * 300 + 5], 0xaa);
    }

    #[test]
    fn siblings_start_from_parent_clip() {
        let log = Rc::default();
        let mut tree: ElementTree<Colour> = ElementTree::new();
        let window = tree.create_window(WindowConfig::new(100, 100), 0);
        let left = tree.create_element(Some(window), 0, Some(filler(&log)), 1);
        let right = tree.create_element(Some(window), 0, Some(filler(&log)), 2);
        tree.move_element(left, Rectangle::new(0, 50, 0, 100), false);
        tree.move_element(right, Rectangle::new(50, 100, 0, 100), false);

        tree.flush(window, &mut RecordingPresenter::default());
        assert_eq!(
            *log.borrow(),
            [
                (left, Rectangle::new(0, 50, 0, 100)),
                (right, Rectangle::new(50, 100, 0, 100))
            ]
        );
    }

    #[test]
    fn unplaced_element_is_not_painted() {
        let log = Rc::default();
        let mut tree: ElementTree<Colour> = ElementTree::new();
        let window = tree.create_window(WindowConfig::new(100, 100), 0);
        let _unplaced = tree.create_element(Some(window), 0, Some(filler(&log)), 1);

        let mut presenter = RecordingPresenter::default();
        assert!(tree.flush(window, &mut presenter));
        assert_eq!(presenter.presents, [(window, Rectangle::new(0, 100, 0, 100))]);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn pruned_subtree_is_not_visited() {
        let log = Rc::default();
        let mut tree: ElementTree<Colour> = ElementTree::new();
        let window = tree.create_window(WindowConfig::new(100, 100), 0);
        let hidden = tree.create_element(Some(window), 0, Some(filler(&log)), 1);
        let inner = tree.create_element(Some(hidden), 0, Some(filler(&log)), 2);
        tree.move_element(hidden, Rectangle::new(200, 300, 0, 10), false);
        tree.move_element(inner, Rectangle::new(0, 10, 0, 10), false);

        tree.flush(window, &mut RecordingPresenter::default());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn zero_area_damage_still_flushes() {
        let mut tree: ElementTree<Colour> = ElementTree::new();
        let window = tree.create_element(None, 0, None, 0);
        tree.resize_window(window, 10, 10);
        tree.flush(window, &mut RecordingPresenter::default());

        // Zero-area damage on the right edge is valid.
        tree.repaint(window, Some(Rectangle::new(10, 20, 0, 10)));
        let edge = Rectangle::new(10, 10, 0, 10);
        assert_eq!(tree.update_region(window), Some(edge));

        let mut presenter = RecordingPresenter::default();
        assert!(tree.flush(window, &mut presenter));
        assert_eq!(presenter.presents, [(window, edge)]);
        assert_eq!(tree.update_region(window), None);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn flush_reports_painted_and_pruned() {
        use crate::trace::{TraceSink, Tracer};

        #[derive(Default)]
        struct Sink {
            damage: Vec<DamageEvent>,
            flushes: Vec<FlushEndEvent>,
        }
        impl TraceSink for Sink {
            fn on_damage(&mut self, e: &DamageEvent) {
                self.damage.push(*e);
            }
            fn on_flush_end(&mut self, e: &FlushEndEvent) {
                self.flushes.push(*e);
            }
        }

        let Scene {
            mut tree,
            window,
            a,
            b,
            ..
        } = scene();
        let sink = Rc::new(RefCell::new(Sink::default()));
        tree.set_tracer(Tracer::new(Box::new(Rc::clone(&sink))));

        tree.repaint(b, Some(Rectangle::new(0, 10, 0, 10)));
        tree.repaint(a, Some(Rectangle::new(0, 300, 0, 10)));
        tree.flush(window, &mut RecordingPresenter::default());

        let sink = sink.borrow();
        assert_eq!(sink.damage.len(), 2);
        assert_eq!(sink.damage[0].accepted, None);
        assert_eq!(
            sink.damage[1].update_region,
            Some(Rectangle::new(0, 300, 0, 10))
        );
        // The window root and A paint; B lies below the strip.
        assert_eq!(sink.flushes.len(), 1);
        assert_eq!(sink.flushes[0].painted, 2);
        assert_eq!(sink.flushes[0].pruned, 1);
    }
}
