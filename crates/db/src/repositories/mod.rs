//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod contact_repo;
pub mod dashboard_repo;
pub mod donation_repo;
pub mod event_repo;
pub mod media_repo;
pub mod session_repo;
pub mod slideshow_repo;
pub mod story_repo;
pub mod subscription_repo;
pub mod testimonial_repo;
pub mod urgent_need_repo;
pub mod user_repo;
pub mod volunteer_repo;

pub use contact_repo::ContactRepo;
pub use dashboard_repo::DashboardRepo;
pub use donation_repo::DonationRepo;
pub use event_repo::EventRepo;
pub use media_repo::MediaRepo;
pub use session_repo::SessionRepo;
pub use slideshow_repo::SlideshowRepo;
pub use story_repo::StoryRepo;
pub use subscription_repo::SubscriptionRepo;
pub use testimonial_repo::TestimonialRepo;
pub use urgent_need_repo::UrgentNeedRepo;
pub use user_repo::UserRepo;
pub use volunteer_repo::VolunteerRepo;
