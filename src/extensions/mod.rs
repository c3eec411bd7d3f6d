//! Selection plumbing between a category selector and the charts it drives.
//!
//! Charts never share selector state; each one registers a subscriber and
//! reacts to the same dispatched event.

pub mod dispatcher;
pub mod frame_subscriber;
pub mod selection;

pub use dispatcher::SelectionDispatcher;
pub use frame_subscriber::FrameSubscriber;
pub use selection::{ChartSubscriber, SelectionContext, SelectionEvent};
