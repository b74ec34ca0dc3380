pub mod bot;
pub mod perspective;
pub mod snapshot;
