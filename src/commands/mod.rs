/// Each command returns a result struct instead of printing directly;
/// main.rs formats it as human-readable text or JSON based on --json.
mod complete;
mod jump;
mod pick;

pub use complete::*;
pub use jump::*;
pub use pick::*;
