//! Cutline Timeline Model
//!
//! Defines the data contracts shared by the editing engines:
//! - **Time:** Seconds/tick time points and the sequence timebase
//! - **Clips:** Track kinds, clip handles, intervals and gaps
//! - **Geometry:** Frame sizes, points, the 3×3 anchor grid, coordinate spaces
//! - **Host:** The `TimelineHost` capability trait and an in-memory host
//!   backed by a JSON sequence snapshot
//!
//! Nothing in this crate edits a timeline on its own; the engines in
//! `cutline-edit-core` drive a host through the trait.

pub mod clip;
pub mod geometry;
pub mod host;
pub mod interval;
pub mod memory_host;
pub mod sequence;
pub mod time;

pub use clip::*;
pub use geometry::*;
pub use host::*;
pub use interval::*;
pub use memory_host::MemoryHost;
pub use sequence::*;
pub use time::*;
