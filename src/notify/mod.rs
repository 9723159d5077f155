//! Outbound notification boundary.
//!
//! The core reports scheduling and shortlisting side effects to an external
//! dispatcher. Delivery is fire-and-forget: failures are logged, never
//! propagated, and never roll back a committed core operation.

pub mod adapters;
mod dispatcher;
mod event;

pub use adapters::{NullDispatcher, RecordingDispatcher};
pub use dispatcher::{DispatchError, NotificationDispatcher, dispatch_fire_and_forget};
pub use event::{NotificationEvent, Recipient};
