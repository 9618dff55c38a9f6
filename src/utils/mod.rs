//! Small helpers shared across the client.

mod duration;

pub use duration::{format_duration, format_nanos};
