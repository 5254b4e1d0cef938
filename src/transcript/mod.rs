mod data;

pub use data::{Segment, Transcript};
