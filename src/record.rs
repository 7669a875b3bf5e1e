use crate::{
    config::AdapterConfig,
    diagnostics::DiagnosticSink,
    function::{any_data, derive_schema, RecordFn, Reporting, SchemaFn},
};
use arrow::datatypes::Schema;
use fnfilter_core::{Capabilities, DataUnit, Filter, FilterResult, Record, StreamFilter};
use std::sync::Arc;

const DESCRIPTION: &str = "A stream filter that runs a supplied function over each record.";

/// Runs a function over each record as it streams through the filter.
///
/// The adapter keeps nothing between records; a function that needs state
/// carries it in its own captures.
pub struct RecordTransformAdapter {
    transform: RecordFn,
    output_schema: Option<SchemaFn>,
    reporting: Reporting,
}

impl RecordTransformAdapter {
    pub fn new<F>(transform: F) -> RecordTransformAdapter
    where
        F: Fn(&Record) -> anyhow::Result<Record> + Send + Sync + 'static,
    {
        RecordTransformAdapter {
            transform: Box::new(transform),
            output_schema: None,
            reporting: Reporting::new(DataUnit::Record, DESCRIPTION),
        }
    }

    pub fn with_output_schema<S>(mut self, output_schema: S) -> RecordTransformAdapter
    where
        S: Fn(&Schema) -> anyhow::Result<Schema> + Send + Sync + 'static,
    {
        self.output_schema = Some(Box::new(output_schema));
        self
    }

    pub fn with_config(mut self, config: AdapterConfig) -> RecordTransformAdapter {
        self.reporting.config = config;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> RecordTransformAdapter {
        self.reporting.sink = Some(sink);
        self
    }
}

impl Filter for RecordTransformAdapter {
    fn global_info(&self) -> String {
        self.reporting.global_info()
    }

    fn capabilities(&self) -> Capabilities {
        any_data()
    }

    fn determine_output_schema(&self, input: &Schema) -> FilterResult<Schema> {
        derive_schema(self.output_schema.as_ref(), input)
    }
}

impl StreamFilter for RecordTransformAdapter {
    fn transform_record(&self, record: &Record) -> FilterResult<Record> {
        (self.transform)(record).map_err(|source| self.reporting.fail(source))
    }
}
