//! Animator: The service that slides two cells over a fixed duration.
//!
//! The view never interpolates frames itself. It hands a [`Transition`] to an
//! [`Animator`] and later receives [`AnimationEvent`]s back from
//! [`Animator::poll`] on the owning thread. Completions carry the
//! [`Ticket`] the transition was started with, which is how the view tells a
//! current completion from a stale one.

use crate::cell::CellId;
use crate::layout::Rect;
use std::time::{Duration, Instant};

/// Identifies one transition and the state it was started against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    /// View generation at start time. Bumped by every stop.
    pub generation: u64,
    /// Cell sliding out.
    pub outgoing: CellId,
    /// Cell sliding in.
    pub incoming: CellId,
}

/// A slide request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Ticket to echo back in events.
    pub ticket: Ticket,
    /// Start frame of the outgoing cell.
    pub outgoing_from: Rect,
    /// End frame of the outgoing cell.
    pub outgoing_to: Rect,
    /// Start frame of the incoming cell.
    pub incoming_from: Rect,
    /// End frame of the incoming cell.
    pub incoming_to: Rect,
    /// Total run time.
    pub duration: Duration,
}

impl Transition {
    /// Frames at progress `t` (already eased), clamped to `0.0..=1.0`.
    pub fn frames_at(&self, t: f32) -> (Rect, Rect) {
        (
            self.outgoing_from.lerp(&self.outgoing_to, t),
            self.incoming_from.lerp(&self.incoming_to, t),
        )
    }
}

/// Events reported back by an animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEvent {
    /// Intermediate frames.
    Progress {
        /// Transition the frames belong to.
        ticket: Ticket,
        /// Outgoing cell frame.
        outgoing: Rect,
        /// Incoming cell frame.
        incoming: Rect,
    },
    /// The transition ended.
    Completed {
        /// Transition that ended.
        ticket: Ticket,
        /// `false` if it was interrupted before reaching its end frames.
        finished: bool,
    },
}

/// An animation engine driven from the owning thread.
///
/// Completions must be reported in the order transitions were started.
pub trait Animator {
    /// Begin a transition.
    fn start(&mut self, transition: Transition, now: Instant);

    /// Append any events that became due by `now`.
    fn poll(&mut self, now: Instant, events: &mut Vec<AnimationEvent>);

    /// Cut every running transition short.
    ///
    /// Interrupted transitions complete with `finished == false`.
    fn interrupt(&mut self) {}

    /// Check whether any transition is still running.
    fn is_running(&self) -> bool;
}

/// Timing curve for [`SlideAnimator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Slow start and end.
    #[default]
    EaseInOut,
}

impl Easing {
    /// Map linear progress to eased progress.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInOut => t * t * (3.0 - 2.0 * t),
        }
    }
}

#[derive(Debug)]
struct Running {
    transition: Transition,
    started: Instant,
}

/// Tween-based animator that reports frames every poll.
#[derive(Debug, Default)]
pub struct SlideAnimator {
    running: Vec<Running>,
    easing: Easing,
    /// Completions of interrupted transitions, reported at the next poll.
    pending: Vec<AnimationEvent>,
}

impl SlideAnimator {
    /// Create an animator with the default ease-in-out curve.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an animator with a specific curve.
    pub const fn with_easing(easing: Easing) -> Self {
        Self {
            running: Vec::new(),
            easing,
            pending: Vec::new(),
        }
    }
}

impl Animator for SlideAnimator {
    fn start(&mut self, transition: Transition, now: Instant) {
        self.running.push(Running {
            transition,
            started: now,
        });
    }

    fn poll(&mut self, now: Instant, events: &mut Vec<AnimationEvent>) {
        events.append(&mut self.pending);

        let easing = self.easing;
        self.running.retain(|run| {
            let elapsed = now.saturating_duration_since(run.started);
            let duration = run.transition.duration.max(Duration::from_millis(1));
            let t = (elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0);
            let (outgoing, incoming) = run.transition.frames_at(easing.apply(t));
            let ticket = run.transition.ticket;
            events.push(AnimationEvent::Progress {
                ticket,
                outgoing,
                incoming,
            });
            if elapsed >= duration {
                events.push(AnimationEvent::Completed {
                    ticket,
                    finished: true,
                });
                false
            } else {
                true
            }
        });
    }

    fn interrupt(&mut self) {
        self.pending
            .extend(self.running.drain(..).map(|run| AnimationEvent::Completed {
                ticket: run.transition.ticket,
                finished: false,
            }));
    }

    fn is_running(&self) -> bool {
        !self.running.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transition() -> Transition {
        let viewport = Rect::from_size(20, 4);
        Transition {
            ticket: Ticket {
                generation: 0,
                outgoing: CellId(0),
                incoming: CellId(1),
            },
            outgoing_from: viewport,
            outgoing_to: viewport.above(),
            incoming_from: viewport.below(),
            incoming_to: viewport,
            duration: Duration::from_millis(500),
        }
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::EaseInOut] {
            assert!((easing.apply(0.0)).abs() < f32::EPSILON);
            assert!((easing.apply(1.0) - 1.0).abs() < f32::EPSILON);
        }
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_slide_progress_then_complete() {
        let start = Instant::now();
        let mut animator = SlideAnimator::with_easing(Easing::Linear);
        animator.start(transition(), start);
        assert!(animator.is_running());

        let mut events = Vec::new();
        animator.poll(start + Duration::from_millis(250), &mut events);
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            AnimationEvent::Progress { outgoing, incoming, .. }
                if outgoing.y == -2 && incoming.y == 2
        ));

        events.clear();
        animator.poll(start + Duration::from_millis(600), &mut events);
        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[0],
            AnimationEvent::Progress { outgoing, incoming, .. }
                if outgoing.y == -4 && incoming.y == 0
        ));
        assert!(matches!(events[1], AnimationEvent::Completed { finished: true, .. }));
        assert!(!animator.is_running());
    }

    #[test]
    fn test_interrupt_reports_unfinished() {
        let start = Instant::now();
        let mut animator = SlideAnimator::new();
        animator.start(transition(), start);
        animator.interrupt();

        let mut events = Vec::new();
        animator.poll(start + Duration::from_millis(10), &mut events);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], AnimationEvent::Completed { finished: false, .. }));
        assert!(!animator.is_running());
    }

    #[test]
    fn test_interrupt_spares_later_transition() {
        let start = Instant::now();
        let mut animator = SlideAnimator::with_easing(Easing::Linear);
        let first = transition();
        let mut second = transition();
        second.ticket.generation = 1;

        animator.start(first, start);
        animator.interrupt();
        assert!(!animator.is_running());
        animator.start(second, start + Duration::from_millis(5));

        let mut events = Vec::new();
        animator.poll(start + Duration::from_millis(255), &mut events);
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            AnimationEvent::Completed {
                ticket: first.ticket,
                finished: false,
            }
        );
        assert!(matches!(
            events[1],
            AnimationEvent::Progress { ticket, .. } if ticket == second.ticket
        ));
        assert!(animator.is_running());
    }

    #[test]
    fn test_completions_in_start_order() {
        let start = Instant::now();
        let mut animator = SlideAnimator::new();
        let first = transition();
        let mut second = transition();
        second.ticket.generation = 1;
        animator.start(first, start);
        animator.start(second, start + Duration::from_millis(100));

        let mut events = Vec::new();
        animator.poll(start + Duration::from_secs(1), &mut events);
        let completed: Vec<u64> = events
            .iter()
            .filter_map(|e| match e {
                AnimationEvent::Completed { ticket, .. } => Some(ticket.generation),
                AnimationEvent::Progress { .. } => None,
            })
            .collect();
        assert_eq!(completed, vec![0, 1]);
    }
}
