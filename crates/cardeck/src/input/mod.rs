pub mod cursor;
pub mod drag;
