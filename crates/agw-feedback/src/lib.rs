//! Request feedback for the Actions Gateway pages.
//!
//! Page requests go through four lifecycle events. The [`Coordinator`] maps
//! them onto a top-of-page progress indicator and toast notifications. Both
//! widgets are injected through the [`ProgressIndicator`] and [`ToastSink`]
//! traits, so the coordinator runs the same way in a browser binding, a
//! terminal replay or a test.
//!
//! ```
//! use agw_feedback::{Coordinator, EventDetail, FeedbackSettings, LifecycleEvent, XhrSnapshot};
//!
//! let mut coordinator = Coordinator::with_settings(FeedbackSettings::default());
//! let xhr = XhrSnapshot::with_status(404).body(r#"{"error":"Not found"}"#);
//! let mut detail = EventDetail::new(&xhr);
//!
//! coordinator.handle(LifecycleEvent::BeforeSwap, &mut detail);
//! assert!(!detail.should_swap);
//! assert_eq!(coordinator.toasts().visible()[0].toast.text, "Not found");
//! ```

pub mod coordinator;
pub mod error;
pub mod event;
pub mod progress;
pub mod settings;
pub mod toast;
pub mod transaction;
pub mod transcript;

pub use coordinator::{Coordinator, Reaction, Suppression};
pub use error::{FeedbackError, Result};
pub use event::{EventDetail, LifecycleEvent};
pub use progress::{ProgressBar, ProgressIndicator};
pub use settings::{FeedbackSettings, ProgressSettings, SwapPolicy, SwapSettings, ToastSettings};
pub use toast::{Gravity, Position, Toast, ToastId, ToastQueue, ToastSink, ToastType};
pub use transaction::{Transaction, XhrSnapshot};
pub use transcript::{
    ReplayStep, TranscriptEntry, parse_transcript, read_transcript, replay, replay_entry,
};
