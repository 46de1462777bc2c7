// Domain Layer - Pure logic and entities

pub mod output;
pub mod response;

// Re-exports
pub use output::CapturedOutput;
pub use response::render_response;
