pub mod auth;
pub mod calculators;
pub mod contact;
pub mod dashboard;
pub mod donations;
pub mod events;
pub mod media;
pub mod slideshow;
pub mod stories;
pub mod subscriptions;
pub mod testimonials;
pub mod urgent_needs;
pub mod users;
pub mod volunteers;
pub mod webhook;
