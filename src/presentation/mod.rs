// Presentation layer - DOM patch model, view renderers and UI input
pub mod dom;
pub mod event_loop;
pub mod events;
pub mod format;
pub mod views;
