use crate::{
    data::{Dataset, Record},
    error::FilterResult,
    filter::{BatchFilter, Filter, StreamFilter},
};
use arrow::datatypes::SchemaRef;
use std::sync::Arc;
use tracing::{debug, trace};

/// Remembers the output schema a filter determined for the last input schema
/// and class attribute.
#[derive(Debug, Default)]
pub struct SchemaCache {
    input: Option<(SchemaRef, Option<usize>)>,
    output: Option<SchemaRef>,
}

impl SchemaCache {
    pub fn output(&self) -> Option<&SchemaRef> {
        self.output.as_ref()
    }

    /// Returns the output schema for `input`, asking the filter only when the
    /// input schema or class attribute changed since the previous call.
    pub fn resolve<F: Filter + ?Sized>(
        &mut self,
        filter: &F,
        input: &SchemaRef,
        class_index: Option<usize>,
    ) -> FilterResult<SchemaRef> {
        if let (Some((cached_input, cached_class)), Some(cached_output)) =
            (&self.input, &self.output)
        {
            if cached_input == input && *cached_class == class_index {
                return Ok(cached_output.clone());
            }
        }

        filter.capabilities().test(input, class_index)?;

        debug!(
            fields = input.fields().len(),
            "determining output schema for {}",
            filter.global_info()
        );
        let output = Arc::new(filter.determine_output_schema(input)?);

        self.input = Some((input.clone(), class_index));
        self.output = Some(output.clone());
        Ok(output)
    }
}

pub struct BatchRunner<F: BatchFilter> {
    filter: F,
    schemas: SchemaCache,
}

impl<F: BatchFilter> BatchRunner<F> {
    pub fn new(filter: F) -> BatchRunner<F> {
        BatchRunner {
            filter,
            schemas: SchemaCache::default(),
        }
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    pub fn output_schema(&self) -> Option<&SchemaRef> {
        self.schemas.output()
    }

    pub fn run(&mut self, data: &Dataset) -> FilterResult<Dataset> {
        self.schemas
            .resolve(&self.filter, &data.schema(), data.class_index())?;

        trace!(records = data.num_records(), "transforming batch");
        self.filter.transform_batch(data)
    }
}

pub struct StreamRunner<F: StreamFilter> {
    filter: F,
    schemas: SchemaCache,
}

impl<F: StreamFilter> StreamRunner<F> {
    pub fn new(filter: F) -> StreamRunner<F> {
        StreamRunner {
            filter,
            schemas: SchemaCache::default(),
        }
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    pub fn output_schema(&self) -> Option<&SchemaRef> {
        self.schemas.output()
    }

    pub fn set_input_schema(&mut self, schema: SchemaRef) -> FilterResult<SchemaRef> {
        self.schemas.resolve(&self.filter, &schema, None)
    }

    /// Transforms one record, determining the output schema first if the
    /// record's schema has not been seen yet.
    pub fn push(&mut self, record: &Record) -> FilterResult<Record> {
        self.schemas.resolve(&self.filter, record.schema(), None)?;

        trace!("transforming record");
        self.filter.transform_record(record)
    }

    /// Streams every record of `data` through the filter and collects the
    /// results under the determined output schema.
    pub fn run(&mut self, data: &Dataset) -> FilterResult<Dataset> {
        let output_schema =
            self.schemas
                .resolve(&self.filter, &data.schema(), data.class_index())?;

        let mut output = Vec::with_capacity(data.num_records());
        for record in data.records() {
            let record = record?;
            trace!("transforming record");
            output.push(self.filter.transform_record(&record)?);
        }

        let transformed = Dataset::from_records(output_schema.clone(), &output)?;
        match data.class_index() {
            Some(class_index) if class_index < output_schema.fields().len() => {
                transformed.with_class_index(class_index)
            }
            _ => Ok(transformed),
        }
    }
}

pub fn apply_batch<F: BatchFilter>(filter: F, data: &Dataset) -> FilterResult<Dataset> {
    BatchRunner::new(filter).run(data)
}

pub fn apply_stream<F: StreamFilter>(filter: F, data: &Dataset) -> FilterResult<Dataset> {
    StreamRunner::new(filter).run(data)
}
