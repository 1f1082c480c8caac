//! Core types for the data container model

mod calendar;
mod combine;
mod container;
mod geometry;
mod header;
mod value;

pub use calendar::{DateTime, Duration};
pub use container::DataContainer;
pub use geometry::{Color, Point};
pub use header::{HEADER_SIZE, MAGIC, VERSION};
pub use value::{ContainerView, FromValue, Value, ValueTag, ValueView};
