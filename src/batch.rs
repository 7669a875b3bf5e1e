use crate::{
    config::AdapterConfig,
    diagnostics::DiagnosticSink,
    function::{any_data, derive_schema, BatchFn, Reporting, SchemaFn},
};
use arrow::datatypes::Schema;
use fnfilter_core::{BatchFilter, Capabilities, DataUnit, Dataset, Filter, FilterResult};
use std::sync::Arc;

const DESCRIPTION: &str = "A batch filter that runs a supplied function over whole datasets.";

/// Runs a function over every dataset handed to the filter.
///
/// Without a schema function the output schema is the input schema. Failures of
/// the transform function are reported to the diagnostic sink and returned as
/// [`FilterError::Transformation`](fnfilter_core::FilterError::Transformation).
pub struct BatchTransformAdapter {
    transform: BatchFn,
    output_schema: Option<SchemaFn>,
    reporting: Reporting,
}

impl BatchTransformAdapter {
    pub fn new<F>(transform: F) -> BatchTransformAdapter
    where
        F: Fn(&Dataset) -> anyhow::Result<Dataset> + Send + Sync + 'static,
    {
        BatchTransformAdapter {
            transform: Box::new(transform),
            output_schema: None,
            reporting: Reporting::new(DataUnit::Dataset, DESCRIPTION),
        }
    }

    pub fn with_output_schema<S>(mut self, output_schema: S) -> BatchTransformAdapter
    where
        S: Fn(&Schema) -> anyhow::Result<Schema> + Send + Sync + 'static,
    {
        self.output_schema = Some(Box::new(output_schema));
        self
    }

    pub fn with_config(mut self, config: AdapterConfig) -> BatchTransformAdapter {
        self.reporting.config = config;
        self
    }

    /// Overrides the sink selected by the configuration.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> BatchTransformAdapter {
        self.reporting.sink = Some(sink);
        self
    }
}

impl Filter for BatchTransformAdapter {
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

impl BatchFilter for BatchTransformAdapter {
    fn transform_batch(&self, data: &Dataset) -> FilterResult<Dataset> {
        (self.transform)(data).map_err(|source| self.reporting.fail(source))
    }
}
