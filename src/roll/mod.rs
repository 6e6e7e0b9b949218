//! Roll module: Timing and transition machinery.
//!
//! - [`RollTimer`]: Repeating timer that can be parked and fired early
//! - [`Animator`]: Slide animation service, with [`SlideAnimator`] built in
//! - `Scheduler`: Owns the cell slots and runs one transition per tick

mod animator;
mod scheduler;
mod timer;

pub use animator::{AnimationEvent, Animator, Easing, SlideAnimator, Ticket, Transition};
pub use scheduler::Completion;
pub use timer::{FireDate, RollTimer};

pub(crate) use scheduler::{LayoutPass, Scheduler};
