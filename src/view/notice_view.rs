//! NoticeView: The rolling notice controller.
//!
//! The view composes the cell pool and the transition scheduler behind a
//! small state machine:
//!
//! ```text
//!            reload_and_start (rows >= 2)
//!   ┌──────┐ ─────────────────────────▶ ┌─────────┐  pause   ┌────────┐
//!   │ Idle │                            │ Working │ ───────▶ │ Paused │
//!   └──────┘ ◀───────────────────────── └─────────┘ ◀─────── └────────┘
//!                      stop                          resume
//! ```
//!
//! Everything runs on the thread that owns the view. The host calls
//! [`NoticeView::on_frame`] from its event loop; that is where timer fires,
//! animation frames and off-thread stop requests are processed.

use super::source::{DataSource, NoticeDelegate};
use super::stop::StopHandle;
use crate::cell::{CellPool, CellRecipe, Container, NoticeCell};
use crate::config::NoticeConfig;
use crate::error::Result;
use crate::layout::Rect;
use crate::roll::{
    AnimationEvent, Animator, Completion, LayoutPass, RollTimer, Scheduler, SlideAnimator,
};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::any::Any;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

/// Rolling state of a [`NoticeView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NoticeStatus {
    /// Not rolling. Initial state and the state after `stop`.
    #[default]
    Idle,
    /// Timer running.
    Working,
    /// Timer parked.
    Paused,
}

/// A fixed-size viewport that periodically rolls to the next notice.
pub struct NoticeView<C> {
    config: NoticeConfig,
    bounds: Rect,
    status: NoticeStatus,
    pool: CellPool<C>,
    scheduler: Scheduler<C>,
    data_source: Option<Weak<dyn DataSource<C>>>,
    delegate: Option<Weak<dyn NoticeDelegate>>,
    /// A start was deferred because the viewport had no area.
    needs_retry: bool,
    dirty: bool,
    stop_tx: Sender<()>,
    stop_rx: Receiver<()>,
    events: Vec<AnimationEvent>,
}

impl<C: 'static> NoticeView<C> {
    /// Create a view with the default timing and the built-in slide animator.
    pub fn new(bounds: Rect) -> Self {
        Self::build(bounds, NoticeConfig::default(), Box::new(SlideAnimator::new()))
    }

    /// Create a view with custom timing.
    pub fn with_config(bounds: Rect, config: NoticeConfig) -> Result<Self> {
        Self::with_animator(bounds, config, Box::new(SlideAnimator::new()))
    }

    /// Create a view with custom timing and animation engine.
    pub fn with_animator(
        bounds: Rect,
        config: NoticeConfig,
        animator: Box<dyn Animator>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(bounds, config, animator))
    }

    fn build(bounds: Rect, config: NoticeConfig, animator: Box<dyn Animator>) -> Self {
        let (stop_tx, stop_rx) = unbounded();
        Self {
            config,
            bounds,
            status: NoticeStatus::Idle,
            pool: CellPool::new(),
            scheduler: Scheduler::new(animator, config.transition_duration),
            data_source: None,
            delegate: None,
            needs_retry: false,
            dirty: true,
            stop_tx,
            stop_rx,
            events: Vec::new(),
        }
    }

    // ---------------------------------------------------------------------
    // Collaborators
    // ---------------------------------------------------------------------

    /// Attach a data source. Only a weak reference is kept.
    pub fn set_data_source<S: DataSource<C> + 'static>(&mut self, source: &Rc<S>) {
        let weak: Weak<dyn DataSource<C>> = Rc::downgrade(source) as Weak<S>;
        self.data_source = Some(weak);
    }

    /// Attach a tap delegate. Only a weak reference is kept.
    pub fn set_delegate<D: NoticeDelegate + 'static>(&mut self, delegate: &Rc<D>) {
        let weak: Weak<dyn NoticeDelegate> = Rc::downgrade(delegate) as Weak<D>;
        self.delegate = Some(weak);
    }

    /// Detach the data source.
    pub fn clear_data_source(&mut self) {
        self.data_source = None;
    }

    fn data_source(&self) -> Option<Rc<dyn DataSource<C>>> {
        self.data_source.as_ref().and_then(Weak::upgrade)
    }

    fn delegate(&self) -> Option<Rc<dyn NoticeDelegate>> {
        self.delegate.as_ref().and_then(Weak::upgrade)
    }

    // ---------------------------------------------------------------------
    // Cell registration
    // ---------------------------------------------------------------------

    /// Register how to build cells for `identifier`. Later registrations win.
    pub fn register(&mut self, identifier: impl Into<String>, recipe: CellRecipe<C>) {
        self.pool.register(identifier, recipe);
    }

    /// Register a content constructor for `identifier`.
    pub fn register_class(&mut self, identifier: impl Into<String>, make: impl Fn() -> C + 'static) {
        self.register(identifier, CellRecipe::class(make));
    }

    /// Register a prefabricated layout for `identifier`.
    pub fn register_layout(
        &mut self,
        identifier: impl Into<String>,
        instantiate: impl Fn() -> Vec<Box<dyn Any>> + 'static,
    ) {
        self.register(identifier, CellRecipe::layout(instantiate));
    }

    /// Take a reusable cell for `identifier`, building one if none is idle.
    pub fn dequeue_reusable_cell(&mut self, identifier: &str) -> Option<NoticeCell<C>> {
        self.pool.dequeue(identifier)
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// Reset, then show the first row and start rolling if there are two or more.
    pub fn reload_and_start(&mut self) {
        self.stop();

        let Some(source) = self.data_source() else {
            return;
        };
        let count = source.row_count();
        if count == 0 {
            tracing::debug!("no rows, staying idle");
            return;
        }

        let viewport = self.viewport();
        if self.scheduler.layout(&*source, &mut self.pool, viewport) == LayoutPass::Deferred {
            tracing::debug!("viewport has no area, start deferred to next layout");
            self.needs_retry = true;
        }
        self.dirty = true;

        if count < 2 {
            return;
        }

        self.scheduler.timer = Some(RollTimer::new(self.config.stay_interval, Instant::now()));
        self.resume();
        tracing::debug!(rows = count, interval = ?self.config.stay_interval, "rolling started");
    }

    /// Stop rolling and drop every cell, pooled ones included.
    ///
    /// A transition still running keeps running, but its completion is
    /// ignored. To stop from another thread use [`stop_handle`](Self::stop_handle).
    pub fn stop(&mut self) {
        self.scheduler.reset();
        self.pool.clear();
        self.status = NoticeStatus::Idle;
        self.dirty = true;
        tracing::debug!(generation = self.scheduler.generation, "rolling stopped");
    }

    /// Park the timer. No effect when not started.
    pub fn pause(&mut self) {
        if let Some(timer) = self.scheduler.timer.as_mut() {
            timer.park();
            self.status = NoticeStatus::Paused;
            tracing::debug!("rolling paused");
        }
    }

    /// Fire the timer at the next frame. No effect when not started.
    pub fn resume(&mut self) {
        if let Some(timer) = self.scheduler.timer.as_mut() {
            timer.fire_immediately();
            self.status = NoticeStatus::Working;
            tracing::debug!("rolling resumed");
        }
    }

    /// Get a handle that can stop this view from another thread.
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle::new(self.stop_tx.clone())
    }

    /// Cut the running transition short; it completes as unfinished.
    pub fn interrupt_transition(&mut self) {
        self.scheduler.animator.interrupt();
    }

    // ---------------------------------------------------------------------
    // Event loop
    // ---------------------------------------------------------------------

    /// Advance the view to `now`.
    ///
    /// Processes pending stop requests, then animation events, then at most
    /// one timer fire.
    pub fn on_frame(&mut self, now: Instant) {
        if self.stop_rx.try_iter().count() > 0 {
            self.stop();
        }

        let mut events = std::mem::take(&mut self.events);
        self.scheduler.animator.poll(now, &mut events);
        for event in events.drain(..) {
            self.handle_event(event);
        }
        self.events = events;

        if self.scheduler.timer.as_mut().is_some_and(|timer| timer.poll(now)) {
            self.tick(now);
        }
    }

    /// Feed one animation event into the view.
    ///
    /// [`on_frame`](Self::on_frame) calls this for everything the animator
    /// reports; hosts whose animation engine calls back directly can use it
    /// as the completion entry point. Returns how a completion was handled.
    pub fn handle_event(&mut self, event: AnimationEvent) -> Option<Completion> {
        match event {
            AnimationEvent::Progress {
                ticket,
                outgoing,
                incoming,
            } => {
                if self.scheduler.apply_progress(ticket, outgoing, incoming) {
                    self.dirty = true;
                }
                None
            }
            AnimationEvent::Completed { ticket, finished } => {
                let count = self.data_source().map(|source| source.row_count());
                let completion = self.scheduler.complete(ticket, finished, &mut self.pool, count);
                if completion != Completion::Stale {
                    self.dirty = true;
                }
                Some(completion)
            }
        }
    }

    fn tick(&mut self, now: Instant) {
        let Some(source) = self.data_source() else {
            return;
        };
        let viewport = self.viewport();
        if viewport.is_empty() && source.row_count() > 0 {
            self.needs_retry = true;
        }
        if self
            .scheduler
            .on_tick(&*source, &mut self.pool, viewport, now)
            .is_some()
        {
            self.dirty = true;
        }
    }

    /// Forward a tap to the delegate with the row currently shown.
    pub fn tap(&self) {
        if let Some(delegate) = self.delegate() {
            delegate.on_tap(self.current_index());
        }
    }

    // ---------------------------------------------------------------------
    // Layout
    // ---------------------------------------------------------------------

    /// Get the view bounds.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Resize the view. Counts as a layout notification.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.dirty = true;
        if self.scheduler.in_flight.is_none() {
            let viewport = self.viewport();
            if let Some(current) = self.scheduler.current.as_mut() {
                current.set_frame(viewport);
            }
        }
        self.layout_changed();
    }

    /// Tell the view its layout pass ran.
    ///
    /// Retries a start that was deferred for lack of viewport area.
    pub fn layout_changed(&mut self) {
        if self.needs_retry {
            self.needs_retry = false;
            self.reload_and_start();
        }
    }

    /// The visible slot, in cell coordinates.
    #[inline]
    pub const fn viewport(&self) -> Rect {
        Rect::from_size(self.bounds.width, self.bounds.height)
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    /// Get the rolling status.
    #[inline]
    pub const fn status(&self) -> NoticeStatus {
        self.status
    }

    /// Index of the row currently shown.
    ///
    /// Reads as 0 when the stored index is out of range for the live row
    /// count, or when there is no data source.
    pub fn current_index(&self) -> usize {
        let Some(source) = self.data_source() else {
            return 0;
        };
        if self.scheduler.index >= source.row_count() {
            0
        } else {
            self.scheduler.index
        }
    }

    /// Get the time each notice stays visible.
    #[inline]
    pub const fn stay_interval(&self) -> Duration {
        self.config.stay_interval
    }

    /// Change the stay interval. Takes effect on the next `reload_and_start`.
    pub fn set_stay_interval(&mut self, stay_interval: Duration) -> Result<()> {
        let config = self.config.with_stay_interval(stay_interval);
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Get the timing configuration.
    #[inline]
    pub const fn config(&self) -> &NoticeConfig {
        &self.config
    }

    /// The fully visible cell, if any.
    pub const fn current_cell(&self) -> Option<&NoticeCell<C>> {
        self.scheduler.current.as_ref()
    }

    /// The cell staged or sliding in, if any.
    pub const fn next_cell(&self) -> Option<&NoticeCell<C>> {
        self.scheduler.next.as_ref()
    }

    /// Attached cells, back to front.
    pub fn visible_cells(&self) -> impl Iterator<Item = &NoticeCell<C>> + '_ {
        self.scheduler.container.ids().iter().filter_map(move |&id| {
            [self.scheduler.current.as_ref(), self.scheduler.next.as_ref()]
                .into_iter()
                .flatten()
                .find(|cell| cell.id() == id)
        })
    }

    /// Check whether a transition is in flight.
    #[inline]
    pub const fn is_animating(&self) -> bool {
        self.scheduler.in_flight.is_some()
    }

    /// Get the roll timer, present while working or paused.
    pub const fn timer(&self) -> Option<&RollTimer> {
        self.scheduler.timer.as_ref()
    }

    /// Get the cell pool.
    #[inline]
    pub const fn pool(&self) -> &CellPool<C> {
        &self.pool
    }

    /// Get the container of attached cells.
    #[inline]
    pub const fn container(&self) -> &Container {
        &self.scheduler.container
    }

    /// Number of stops since creation.
    #[inline]
    pub const fn generation(&self) -> u64 {
        self.scheduler.generation
    }

    /// Check if a deferred start is waiting for the next layout.
    #[inline]
    pub const fn needs_retry(&self) -> bool {
        self.needs_retry
    }

    /// Check whether anything visible changed since the last redraw.
    #[inline]
    pub const fn needs_redraw(&self) -> bool {
        self.dirty
    }

    /// Clear the redraw flag after rendering.
    pub const fn clear_redraw(&mut self) {
        self.dirty = false;
    }
}

impl<C> fmt::Debug for NoticeView<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoticeView")
            .field("bounds", &self.bounds)
            .field("status", &self.status)
            .field("index", &self.scheduler.index)
            .field("generation", &self.scheduler.generation)
            .field("animating", &self.scheduler.in_flight.is_some())
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}
