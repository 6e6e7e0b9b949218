//! # Flywheel Notice
//!
//! A rolling notice ticker for terminal UIs.
//!
//! A [`NoticeView`] is a fixed-size viewport that shows one notice at a time
//! and periodically slides it up and out while the next one slides in,
//! looping through the rows of a [`DataSource`].
//!
//! ## Core Concepts
//!
//! - **Cell recycling**: Cells that roll out go back to a [`CellPool`] and are
//!   handed out again instead of being rebuilt
//! - **One transition at a time**: Timer fires that land mid-slide are dropped
//! - **Generation tickets**: A completion that arrives after `stop` is
//!   recognised as stale and cannot touch the pool or the slots
//! - **Single owner thread**: The view is driven by `on_frame`; other threads
//!   can only ask it to stop through a [`StopHandle`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use flywheel_notice::{CellPool, DataSource, NoticeCell, NoticeView, Rect};
//! use std::rc::Rc;
//!
//! struct Headlines(Vec<String>);
//!
//! impl DataSource<String> for Headlines {
//!     fn row_count(&self) -> usize {
//!         self.0.len()
//!     }
//!
//!     fn cell_for(&self, pool: &mut CellPool<String>, index: usize) -> Option<NoticeCell<String>> {
//!         let mut cell = pool.dequeue("headline")?;
//!         cell.content.clone_from(&self.0[index]);
//!         Some(cell)
//!     }
//! }
//!
//! let source = Rc::new(Headlines(vec!["one".into(), "two".into()]));
//! let mut view = NoticeView::new(Rect::from_size(40, 1));
//! view.register_class("headline", String::new);
//! view.set_data_source(&source);
//! view.reload_and_start();
//!
//! loop {
//!     view.on_frame(std::time::Instant::now());
//!     // draw view.visible_cells() clipped to view.viewport()
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod cell;
pub mod config;
pub mod error;
pub mod layout;
pub mod roll;
pub mod view;

// Re-exports for convenience
pub use actor::{Frame, FramePacer};
pub use cell::{CellId, CellPool, CellRecipe, Container, NoticeCell, Prefab};
pub use config::NoticeConfig;
pub use error::{Error, Result};
pub use layout::Rect;
pub use roll::{AnimationEvent, Animator, Completion, Easing, FireDate, RollTimer, SlideAnimator, Ticket, Transition};
pub use view::{DataSource, NoticeDelegate, NoticeStatus, NoticeView, StopHandle};
