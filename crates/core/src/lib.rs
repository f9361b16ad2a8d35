//! Domain logic for the Sadaqah donation platform.
//!
//! Pure functions and constants with no I/O: the Zakat and Kaffarah
//! calculators, status vocabularies, input validation, and payment webhook
//! signature checks. Shared by the repository and HTTP layers.

pub mod content;
pub mod donation;
pub mod error;
pub mod forms;
pub mod kaffarah;
pub mod moderation;
pub mod pagination;
pub mod payments;
pub mod roles;
pub mod types;
pub mod zakat;
