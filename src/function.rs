use crate::{
    config::AdapterConfig,
    diagnostics::{sink_for, surface, DiagnosticSink},
};
use arrow::datatypes::Schema;
use fnfilter_core::{
    Capabilities, Capability, DataUnit, Dataset, FilterError, FilterResult, Record,
};
use std::sync::Arc;

pub type BatchFn = Box<dyn Fn(&Dataset) -> anyhow::Result<Dataset> + Send + Sync>;
pub type RecordFn = Box<dyn Fn(&Record) -> anyhow::Result<Record> + Send + Sync>;
pub type SchemaFn = Box<dyn Fn(&Schema) -> anyhow::Result<Schema> + Send + Sync>;

/// Output schema for `input`: unchanged without a schema function.
pub(crate) fn derive_schema(schema_fn: Option<&SchemaFn>, input: &Schema) -> FilterResult<Schema> {
    match schema_fn {
        None => Ok(input.clone()),
        Some(schema_fn) => schema_fn(input).map_err(FilterError::SchemaDerivation),
    }
}

/// Supplied functions work on any data and never need a class attribute.
pub(crate) fn any_data() -> Capabilities {
    let mut capabilities = Capabilities::new();
    capabilities
        .enable_all_attributes()
        .enable_all_classes()
        .enable(Capability::NoClass);
    capabilities
}

/// Description and failure reporting shared by both adapters.
pub(crate) struct Reporting {
    unit: DataUnit,
    description: &'static str,
    pub(crate) config: AdapterConfig,
    pub(crate) sink: Option<Arc<dyn DiagnosticSink>>,
}

impl Reporting {
    pub(crate) fn new(unit: DataUnit, description: &'static str) -> Reporting {
        Reporting {
            unit,
            description,
            config: AdapterConfig::default(),
            sink: None,
        }
    }

    pub(crate) fn global_info(&self) -> String {
        self.config
            .description
            .clone()
            .unwrap_or_else(|| self.description.to_string())
    }

    /// Reports to the explicit sink, or to the one the configuration selects.
    pub(crate) fn fail(&self, source: anyhow::Error) -> FilterError {
        match &self.sink {
            Some(sink) => surface(sink.as_ref(), self.unit, source),
            None => surface(sink_for(self.config.diagnostics).as_ref(), self.unit, source),
        }
    }
}
