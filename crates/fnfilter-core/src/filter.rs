use crate::{
    capabilities::Capabilities,
    data::{Dataset, Record},
    error::FilterError,
};
use arrow::datatypes::Schema;

/// The schema phase shared by every filter: it is asked once per distinct
/// input schema, before any data flows through it.
pub trait Filter: Send + Sync {
    fn global_info(&self) -> String;
    fn capabilities(&self) -> Capabilities;
    fn determine_output_schema(&self, input: &Schema) -> Result<Schema, FilterError>;
}

/// A filter that sees a whole dataset at once.
pub trait BatchFilter: Filter {
    fn transform_batch(&self, data: &Dataset) -> Result<Dataset, FilterError>;
}

/// A filter that is fed one record at a time.
pub trait StreamFilter: Filter {
    fn transform_record(&self, record: &Record) -> Result<Record, FilterError>;
}

impl<F: Filter + ?Sized> Filter for Box<F> {
    fn global_info(&self) -> String {
        (**self).global_info()
    }

    fn capabilities(&self) -> Capabilities {
        (**self).capabilities()
    }

    fn determine_output_schema(&self, input: &Schema) -> Result<Schema, FilterError> {
        (**self).determine_output_schema(input)
    }
}

impl<F: BatchFilter + ?Sized> BatchFilter for Box<F> {
    fn transform_batch(&self, data: &Dataset) -> Result<Dataset, FilterError> {
        (**self).transform_batch(data)
    }
}

impl<F: StreamFilter + ?Sized> StreamFilter for Box<F> {
    fn transform_record(&self, record: &Record) -> Result<Record, FilterError> {
        (**self).transform_record(record)
    }
}
