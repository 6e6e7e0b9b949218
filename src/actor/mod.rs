//! Actor module: Threads that feed the owning thread's event loop.
//!
//! Notice views are single-threaded. The only actor is the frame pacer,
//! which tells the host loop when to call `on_frame`:
//!
//! ```text
//! ┌──────────────┐      Frame       ┌──────────────┐  on_frame  ┌────────────┐
//! │ Pacer Thread │ ───────────────▶ │  Host Loop   │ ─────────▶ │ NoticeView │
//! └──────────────┘  (bounded, 2)    └──────────────┘            └────────────┘
//!                                          ▲
//!                                          │ StopHandle
//!                                   any other thread
//! ```

mod pacer;

pub use pacer::{Frame, FramePacer};
