mod batch;
pub mod config;
pub mod diagnostics;
mod function;
mod record;

pub use batch::BatchTransformAdapter;
pub use crate::config::{load_config, AdapterConfig, SinkKind};
pub use diagnostics::{Diagnostic, DiagnosticSink, MemorySink, StderrSink, TracingSink};
pub use function::{BatchFn, RecordFn, SchemaFn};
pub use record::RecordTransformAdapter;

pub use fnfilter_core::{
    apply_batch, apply_stream, BatchFilter, BatchRunner, Capabilities, Capability, DataUnit,
    Dataset, Filter, FilterError, FilterResult, Record, StreamFilter, StreamRunner, Value,
};
