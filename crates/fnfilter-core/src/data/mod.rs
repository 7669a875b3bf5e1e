mod arrow;
mod dataset;
mod record;
mod value;

pub use dataset::{Dataset, RecordCursor, Records};
pub use record::Record;
pub use value::Value;
