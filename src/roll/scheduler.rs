//! Transition scheduler: Drives at most one slide at a time.
//!
//! The scheduler owns the current and next cell slots, the roll timer, the
//! in-flight ticket and the generation counter. A tick that arrives while a
//! ticket is in flight is dropped rather than queued, so a slow animator can
//! make the ticker skip a cycle.

use super::animator::{Animator, Ticket, Transition};
use super::timer::RollTimer;
use crate::cell::{CellPool, Container, NoticeCell};
use crate::layout::Rect;
use crate::view::DataSource;
use std::time::{Duration, Instant};

/// Result of a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutPass {
    /// The data source has no rows.
    Empty,
    /// The viewport has no area yet; retry after the next layout.
    Deferred,
    /// The first cell was placed in the viewport.
    PlacedCurrent,
    /// The next cell was staged below the viewport.
    StagedNext,
    /// The data source produced no cell for the slot.
    Skipped,
}

/// How a completion was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The ticket belongs to an earlier generation or is not in flight.
    Stale,
    /// The animation did not reach its end frames.
    Interrupted,
    /// Incoming cell promoted, outgoing cell recycled.
    Promoted,
    /// Slots changed under the animation; outgoing cell discarded.
    Discarded,
}

pub(crate) struct Scheduler<C> {
    pub(crate) timer: Option<RollTimer>,
    pub(crate) current: Option<NoticeCell<C>>,
    pub(crate) next: Option<NoticeCell<C>>,
    pub(crate) container: Container,
    pub(crate) in_flight: Option<Ticket>,
    pub(crate) generation: u64,
    pub(crate) index: usize,
    pub(crate) animator: Box<dyn Animator>,
    pub(crate) transition_duration: Duration,
}

impl<C: 'static> Scheduler<C> {
    pub(crate) fn new(animator: Box<dyn Animator>, transition_duration: Duration) -> Self {
        Self {
            timer: None,
            current: None,
            next: None,
            container: Container::new(),
            in_flight: None,
            generation: 0,
            index: 0,
            animator,
            transition_duration,
        }
    }

    /// Place the current cell, or stage the next one below the viewport.
    pub(crate) fn layout(
        &mut self,
        source: &dyn DataSource<C>,
        pool: &mut CellPool<C>,
        viewport: Rect,
    ) -> LayoutPass {
        let count = source.row_count();
        if count == 0 {
            return LayoutPass::Empty;
        }
        if self.index >= count {
            self.index = 0;
        }
        if viewport.is_empty() {
            return LayoutPass::Deferred;
        }

        if self.current.is_none() {
            let Some(mut cell) = source.cell_for(pool, self.index) else {
                tracing::debug!(index = self.index, "data source produced no current cell");
                return LayoutPass::Skipped;
            };
            cell.set_frame(viewport);
            self.container.add(cell.id());
            self.current = Some(cell);
            return LayoutPass::PlacedCurrent;
        }

        if let Some(current) = self.current.as_mut() {
            current.set_frame(viewport);
        }
        // A previously staged cell is dropped, not recycled
        if let Some(stale) = self.next.take() {
            self.container.remove(stale.id());
        }

        let upcoming = (self.index + 1) % count;
        let Some(mut cell) = source.cell_for(pool, upcoming) else {
            tracing::debug!(index = upcoming, "data source produced no next cell");
            return LayoutPass::Skipped;
        };
        cell.set_frame(viewport.below());
        self.container.add(cell.id());
        self.next = Some(cell);
        LayoutPass::StagedNext
    }

    /// Run one timer fire. Returns the ticket of the transition it started.
    pub(crate) fn on_tick(
        &mut self,
        source: &dyn DataSource<C>,
        pool: &mut CellPool<C>,
        viewport: Rect,
        now: Instant,
    ) -> Option<Ticket> {
        if let Some(busy) = self.in_flight {
            tracing::trace!(generation = busy.generation, "tick dropped, transition in flight");
            return None;
        }
        if source.row_count() == 0 {
            return None;
        }

        self.layout(source, pool, viewport);

        let (Some(current), Some(next)) = (self.current.as_ref(), self.next.as_ref()) else {
            return None;
        };
        let ticket = Ticket {
            generation: self.generation,
            outgoing: current.id(),
            incoming: next.id(),
        };
        let transition = Transition {
            ticket,
            outgoing_from: current.frame(),
            outgoing_to: viewport.above(),
            incoming_from: next.frame(),
            incoming_to: viewport,
            duration: self.transition_duration,
        };

        self.in_flight = Some(ticket);
        self.animator.start(transition, now);
        Some(ticket)
    }

    /// Apply intermediate frames of the in-flight transition.
    ///
    /// Returns `false` if the frames belong to a stale ticket.
    pub(crate) fn apply_progress(&mut self, ticket: Ticket, outgoing: Rect, incoming: Rect) -> bool {
        if self.in_flight != Some(ticket) {
            return false;
        }
        if let Some(cell) = self.current.as_mut().filter(|c| c.id() == ticket.outgoing) {
            cell.set_frame(outgoing);
        }
        if let Some(cell) = self.next.as_mut().filter(|c| c.id() == ticket.incoming) {
            cell.set_frame(incoming);
        }
        true
    }

    /// Handle an animation completion.
    ///
    /// `count` is the live row count, `None` when the data source is gone.
    pub(crate) fn complete(
        &mut self,
        ticket: Ticket,
        finished: bool,
        pool: &mut CellPool<C>,
        count: Option<usize>,
    ) -> Completion {
        if ticket.generation != self.generation || self.in_flight != Some(ticket) {
            tracing::trace!(
                ticket = ticket.generation,
                generation = self.generation,
                "stale completion ignored"
            );
            return Completion::Stale;
        }
        self.in_flight = None;

        if !finished {
            tracing::debug!(outgoing = ticket.outgoing.0, "transition interrupted");
            return Completion::Interrupted;
        }

        let slots_match = self.current.as_ref().map(NoticeCell::id) == Some(ticket.outgoing)
            && self.next.as_ref().map(NoticeCell::id) == Some(ticket.incoming);
        if !slots_match {
            self.container.remove(ticket.outgoing);
            tracing::debug!(outgoing = ticket.outgoing.0, "slots changed mid-flight, discarding");
            return Completion::Discarded;
        }

        if let (Some(outgoing), Some(incoming)) = (self.current.take(), self.next.take()) {
            self.container.remove(outgoing.id());
            pool.release(outgoing);
            self.current = Some(incoming);
        }
        self.index = match count {
            Some(n) if n > 0 => (self.index + 1) % n,
            _ => 0,
        };
        tracing::debug!(index = self.index, "transition promoted");
        Completion::Promoted
    }

    /// Drop the timer, both slots and the in-flight ticket.
    ///
    /// Bumps the generation so completions of transitions started before the
    /// reset are recognised as stale.
    pub(crate) fn reset(&mut self) {
        self.timer = None;
        self.in_flight = None;
        self.generation += 1;
        self.index = 0;
        if let Some(cell) = self.current.take() {
            self.container.remove(cell.id());
        }
        if let Some(cell) = self.next.take() {
            self.container.remove(cell.id());
        }
        self.container.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellRecipe;
    use crate::roll::AnimationEvent;

    struct Rows {
        count: usize,
        identifier: &'static str,
    }

    impl DataSource<String> for Rows {
        fn row_count(&self) -> usize {
            self.count
        }

        fn cell_for(&self, pool: &mut CellPool<String>, index: usize) -> Option<NoticeCell<String>> {
            let mut cell = pool.dequeue(self.identifier)?;
            cell.content = format!("row {index}");
            Some(cell)
        }
    }

    struct Silent;

    impl Animator for Silent {
        fn start(&mut self, _transition: Transition, _now: Instant) {}

        fn poll(&mut self, _now: Instant, _events: &mut Vec<AnimationEvent>) {}

        fn is_running(&self) -> bool {
            false
        }
    }

    const VIEWPORT: Rect = Rect::from_size(30, 2);

    fn setup() -> (Scheduler<String>, CellPool<String>) {
        let mut pool = CellPool::new();
        pool.register("row", CellRecipe::class(String::new));
        let scheduler = Scheduler::new(Box::new(Silent), Duration::from_millis(500));
        (scheduler, pool)
    }

    fn rows(count: usize) -> Rows {
        Rows {
            count,
            identifier: "row",
        }
    }

    /// Place the current cell and start one transition.
    fn start_rolling(scheduler: &mut Scheduler<String>, pool: &mut CellPool<String>) -> Ticket {
        let source = rows(3);
        assert_eq!(scheduler.layout(&source, pool, VIEWPORT), LayoutPass::PlacedCurrent);
        scheduler.on_tick(&source, pool, VIEWPORT, Instant::now()).unwrap()
    }

    #[test]
    fn test_layout_empty_and_deferred() {
        let (mut scheduler, mut pool) = setup();
        assert_eq!(scheduler.layout(&rows(0), &mut pool, VIEWPORT), LayoutPass::Empty);
        assert_eq!(scheduler.layout(&rows(2), &mut pool, Rect::ZERO), LayoutPass::Deferred);
        assert!(scheduler.current.is_none());
        assert!(scheduler.container.is_empty());
    }

    #[test]
    fn test_layout_skipped_without_cell() {
        let (mut scheduler, mut pool) = setup();
        let source = Rows {
            count: 2,
            identifier: "unregistered",
        };
        assert_eq!(scheduler.layout(&source, &mut pool, VIEWPORT), LayoutPass::Skipped);
        assert!(scheduler.current.is_none());
        assert!(scheduler.on_tick(&source, &mut pool, VIEWPORT, Instant::now()).is_none());
        assert!(scheduler.in_flight.is_none());
    }

    #[test]
    fn test_layout_places_then_stages() {
        let (mut scheduler, mut pool) = setup();
        let source = rows(3);
        assert_eq!(scheduler.layout(&source, &mut pool, VIEWPORT), LayoutPass::PlacedCurrent);
        assert_eq!(scheduler.current.as_ref().unwrap().frame(), VIEWPORT);

        assert_eq!(scheduler.layout(&source, &mut pool, VIEWPORT), LayoutPass::StagedNext);
        let next = scheduler.next.as_ref().unwrap();
        assert_eq!(next.frame(), VIEWPORT.below());
        assert_eq!(next.content, "row 1");
        assert_eq!(scheduler.container.ids().len(), 2);
    }

    #[test]
    fn test_replaced_incoming_discards_outgoing() {
        let (mut scheduler, mut pool) = setup();
        let ticket = start_rolling(&mut scheduler, &mut pool);

        scheduler.next = Some(pool.make_cell(Some("row".to_string()), String::new()));
        let idle_before = pool.idle_count();

        let result = scheduler.complete(ticket, true, &mut pool, Some(3));
        assert_eq!(result, Completion::Discarded);
        assert!(!scheduler.container.contains(ticket.outgoing));
        assert!(!pool.contains(ticket.outgoing));
        assert_eq!(pool.idle_count(), idle_before);
        assert_eq!(scheduler.index, 0);
        assert!(scheduler.in_flight.is_none());
    }

    #[test]
    fn test_replaced_outgoing_discards() {
        let (mut scheduler, mut pool) = setup();
        let ticket = start_rolling(&mut scheduler, &mut pool);

        scheduler.current = Some(pool.make_cell(None, String::new()));

        let result = scheduler.complete(ticket, true, &mut pool, Some(3));
        assert_eq!(result, Completion::Discarded);
        assert!(!scheduler.container.contains(ticket.outgoing));
        assert_eq!(pool.idle_count(), 0);
        assert_eq!(scheduler.index, 0);
        assert_eq!(scheduler.next.as_ref().unwrap().id(), ticket.incoming);
    }

    #[test]
    fn test_complete_after_reset_is_stale() {
        let (mut scheduler, mut pool) = setup();
        let ticket = start_rolling(&mut scheduler, &mut pool);
        scheduler.reset();

        assert_eq!(scheduler.complete(ticket, true, &mut pool, Some(3)), Completion::Stale);
        assert_eq!(pool.idle_count(), 0);
        assert!(scheduler.current.is_none());
    }

    #[test]
    fn test_promotion_with_source_gone_resets_index() {
        let (mut scheduler, mut pool) = setup();
        let ticket = start_rolling(&mut scheduler, &mut pool);

        assert_eq!(scheduler.complete(ticket, true, &mut pool, None), Completion::Promoted);
        assert_eq!(scheduler.index, 0);
        assert!(pool.contains(ticket.outgoing));
    }
}
