mod json;
mod panic;

pub use json::Json;
pub use panic::handle_panic;
