// Dashboards: the seeker overview and the employer's jobs with stats.
// The view is picked from the session role, never from the request.

pub mod handlers;
pub mod stats;
