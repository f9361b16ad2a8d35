pub mod auth;
pub mod calculators;
pub mod contact;
pub mod dashboard;
pub mod donations;
pub mod events;
pub mod health;
pub mod media;
pub mod slideshow;
pub mod stories;
pub mod subscriptions;
pub mod testimonials;
pub mod urgent_needs;
pub mod users;
pub mod volunteers;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register|login|refresh                      public
/// /auth/logout, /auth/me                            requires auth
///
/// /calculators/zakat, /calculators/kaffarah         public calculators
///
/// /contact/create                                   contact form
/// /volunteers                                       volunteer application
/// /testimonials                                     submit, list approved
/// /stories, /stories/{slug}                         published stories
/// /events                                           published events (?upcoming)
/// /urgent-needs, /urgent-needs/{slug}               active appeals
/// /slideshow                                        active slides
/// /media                                            gallery
///
/// /donations/create-payment-intent                  one-time donation
/// /donations/create-checkout-session                recurring donation
/// /donations/webhook                                Stripe webhook
/// /donations/mine                                   donor history (auth)
/// /subscriptions/mine                               donor subscriptions (auth)
///
/// /admin/dashboard                                  summary (admin only)
/// /admin/contacts[/{id}]                            inbox
/// /admin/donations[/{id}[/status]]                  ledger
/// /admin/subscriptions[/{id}[/cancel]]              recurring donations
/// /admin/events[/{id}]                              CRUD
/// /admin/stories[/{id}]                             CRUD
/// /admin/testimonials[/{id}[/status]]               moderation
/// /admin/volunteers[/{id}[/status]]                 moderation
/// /admin/media[/{id}]                               CRUD
/// /admin/urgent-needs[/{id}]                        CRUD
/// /admin/slideshow[/{id}], /admin/slideshow/reorder CRUD + ordering
/// /admin/users[/{id}]                               list, get, update, deactivate
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Accounts.
        .nest("/auth", auth::router())
        // Stateless calculators.
        .nest("/calculators", calculators::router())
        // Public forms.
        .nest("/contact", contact::router())
        .nest("/volunteers", volunteers::router())
        .nest("/testimonials", testimonials::router())
        // Public content.
        .nest("/stories", stories::router())
        .nest("/events", events::router())
        .nest("/urgent-needs", urgent_needs::router())
        .nest("/slideshow", slideshow::router())
        .nest("/media", media::router())
        // Payments.
        .nest("/donations", donations::router())
        .nest("/subscriptions", subscriptions::router())
        // Admin console.
        .nest("/admin/dashboard", dashboard::admin_router())
        .nest("/admin/contacts", contact::admin_router())
        .nest("/admin/donations", donations::admin_router())
        .nest("/admin/subscriptions", subscriptions::admin_router())
        .nest("/admin/events", events::admin_router())
        .nest("/admin/stories", stories::admin_router())
        .nest("/admin/testimonials", testimonials::admin_router())
        .nest("/admin/volunteers", volunteers::admin_router())
        .nest("/admin/media", media::admin_router())
        .nest("/admin/urgent-needs", urgent_needs::admin_router())
        .nest("/admin/slideshow", slideshow::admin_router())
        .nest("/admin/users", users::admin_router())
}
