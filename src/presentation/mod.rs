// Presentation layer - JSON boundary consumed by the dashboard front end
pub mod app_state;
pub mod handlers;
pub mod router;
