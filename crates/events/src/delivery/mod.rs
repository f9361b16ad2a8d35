//! Outbound delivery channels for admin notifications.

pub mod email;
