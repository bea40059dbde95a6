//! User notification events module.
//!
//! Provides the user-visible notification type and the sink trait for
//! emitting notifications after data changes. Runtime adapters (desktop
//! shell, web front-end) implement the sink to translate notifications
//! into platform-specific toasts or banners.

mod notification;
mod sink;

pub use notification::*;
pub use sink::*;
