//! View module: The rolling notice controller and its collaborators.
//!
//! - [`NoticeView`]: Public state machine driving the roll
//! - [`DataSource`] / [`NoticeDelegate`]: Implemented by the application
//! - [`StopHandle`]: Cross-thread stop requests

mod notice_view;
mod source;
mod stop;

pub use notice_view::{NoticeStatus, NoticeView};
pub use source::{DataSource, NoticeDelegate};
pub use stop::StopHandle;
