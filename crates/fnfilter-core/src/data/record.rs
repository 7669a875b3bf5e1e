use super::Value;
use crate::error::{FilterError, FilterResult};
use arrow::datatypes::SchemaRef;

/// One row of a [`Dataset`](super::Dataset), holding a value per schema field.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    schema: SchemaRef,
    values: Vec<Value>,
}

impl Record {
    pub fn try_new(schema: SchemaRef, values: Vec<Value>) -> FilterResult<Record> {
        if schema.fields().len() != values.len() {
            return Err(FilterError::ArityMismatch {
                expected: schema.fields().len(),
                actual: values.len(),
            });
        }

        for (field, value) in schema.fields().iter().zip(values.iter()) {
            if !value.conforms_to(field.data_type()) {
                return Err(FilterError::TypeMismatch {
                    field: field.name().clone(),
                    expected: field.data_type().clone(),
                });
            }
        }

        Ok(Record { schema, values })
    }

    pub(crate) fn new_unchecked(schema: SchemaRef, values: Vec<Value>) -> Record {
        Record { schema, values }
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn value(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn get(&self, name: &str) -> FilterResult<&Value> {
        let index = self.index_of(name)?;
        Ok(&self.values[index])
    }

    pub fn set<V: Into<Value>>(&mut self, name: &str, value: V) -> FilterResult<()> {
        let index = self.index_of(name)?;
        let value = value.into();
        let field = self.schema.field(index);

        if !value.conforms_to(field.data_type()) {
            return Err(FilterError::TypeMismatch {
                field: field.name().clone(),
                expected: field.data_type().clone(),
            });
        }

        self.values[index] = value;
        Ok(())
    }

    pub fn with_value<V: Into<Value>>(mut self, name: &str, value: V) -> FilterResult<Record> {
        self.set(name, value)?;
        Ok(self)
    }

    fn index_of(&self, name: &str) -> FilterResult<usize> {
        self.schema
            .fields()
            .iter()
            .position(|field| field.name() == name)
            .ok_or_else(|| FilterError::UnknownField(name.to_string()))
    }
}
