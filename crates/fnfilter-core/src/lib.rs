pub mod capabilities;
pub mod data;
mod error;
pub mod filter;
pub mod lifecycle;

pub use crate::capabilities::{Capabilities, Capability};
pub use crate::data::{Dataset, Record, Value};
pub use crate::error::{DataUnit, FilterError, FilterResult};
pub use crate::filter::{BatchFilter, Filter, StreamFilter};
pub use crate::lifecycle::{apply_batch, apply_stream, BatchRunner, StreamRunner};
