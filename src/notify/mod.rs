//! Notification requests and their delivery to Sentry.
//!
//! - [`request`] -- [`NotificationRequest`] and [`Level`].
//! - [`event`] -- mapping a request onto a Sentry event.
//! - [`dispatch`] -- [`Dispatcher`], the best-effort send path.

pub mod dispatch;
pub mod event;
pub mod request;

pub use dispatch::{send_message, DispatchOutcome, Dispatcher};
pub use request::{Level, NotificationRequest};
