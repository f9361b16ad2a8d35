//! Sadaqah domain events and admin notifications.
//!
//! - [`EventBus`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`] -- the event envelope handlers publish.
//! - [`EmailNotifier`] -- background task that mails admins about new
//!   submissions and completed donations.

pub mod bus;
pub mod delivery;
pub mod notifier;

pub use bus::{EventBus, PlatformEvent};
pub use delivery::email::{EmailConfig, EmailDelivery, EmailError};
pub use notifier::EmailNotifier;
