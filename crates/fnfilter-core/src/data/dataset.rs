use super::{
    arrow::{value_at, values_to_array},
    Record, Value,
};
use crate::error::{FilterError, FilterResult};
use arrow::{
    array::{Array, ArrayRef},
    compute::kernels::concat::concat,
    datatypes::SchemaRef,
    record_batch::RecordBatch,
};

/// An ordered set of records sharing one schema, backed by an Arrow [`RecordBatch`].
///
/// The optional class index marks the label attribute used by supervised stages.
#[derive(Debug, Clone)]
pub struct Dataset {
    batch: RecordBatch,
    class_index: Option<usize>,
}

impl Dataset {
    pub fn try_new(schema: SchemaRef, columns: Vec<ArrayRef>) -> FilterResult<Dataset> {
        Ok(Dataset::from_batch(RecordBatch::try_new(schema, columns)?))
    }

    pub fn from_batch(batch: RecordBatch) -> Dataset {
        Dataset {
            batch,
            class_index: None,
        }
    }

    /// Assembles a dataset row by row. Every record must carry one value per
    /// schema field, typed as the field.
    pub fn from_records(schema: SchemaRef, records: &[Record]) -> FilterResult<Dataset> {
        let expected = schema.fields().len();
        if let Some(record) = records.iter().find(|record| record.len() != expected) {
            return Err(FilterError::ArityMismatch {
                expected,
                actual: record.len(),
            });
        }

        let columns = schema
            .fields()
            .iter()
            .enumerate()
            .map(|(index, field)| {
                let values: Vec<&Value> = records.iter().map(|record| &record.values()[index]).collect();
                values_to_array(field, &values)
            })
            .collect::<FilterResult<Vec<ArrayRef>>>()?;

        Dataset::try_new(schema, columns)
    }

    pub fn with_class_index(mut self, class_index: usize) -> FilterResult<Dataset> {
        if class_index >= self.batch.num_columns() {
            return Err(FilterError::InvalidClassIndex(class_index));
        }

        self.class_index = Some(class_index);
        Ok(self)
    }

    pub fn class_index(&self) -> Option<usize> {
        self.class_index
    }

    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn into_batch(self) -> RecordBatch {
        self.batch
    }

    pub fn num_records(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn is_empty(&self) -> bool {
        self.num_records() == 0
    }

    pub fn record(&self, index: usize) -> FilterResult<Record> {
        if index >= self.num_records() {
            return Err(FilterError::RecordOutOfBounds {
                index,
                len: self.num_records(),
            });
        }

        let values = self
            .batch
            .columns()
            .iter()
            .map(|column| value_at(column, index))
            .collect::<FilterResult<Vec<Value>>>()?;

        Ok(Record::new_unchecked(self.batch.schema(), values))
    }

    pub fn records(&self) -> Records<'_> {
        Records {
            dataset: self,
            position: 0,
        }
    }

    /// A window of `length` records starting at `offset`; the column buffers are shared.
    pub fn slice(&self, offset: usize, length: usize) -> FilterResult<Dataset> {
        let len = self.num_records();
        offset
            .checked_add(length)
            .filter(|end| *end <= len)
            .ok_or(FilterError::RecordOutOfBounds {
                index: offset.saturating_add(length),
                len,
            })?;

        let columns = self
            .batch
            .columns()
            .iter()
            .map(|column| column.slice(offset, length))
            .collect();

        Ok(Dataset {
            batch: RecordBatch::try_new(self.batch.schema(), columns)?,
            class_index: self.class_index,
        })
    }

    /// Removes the record at `index`, shifting later records down by one.
    pub fn delete(&mut self, index: usize) -> FilterResult<()> {
        let len = self.num_records();
        if index >= len {
            return Err(FilterError::RecordOutOfBounds { index, len });
        }

        let columns = self
            .batch
            .columns()
            .iter()
            .map(|column| {
                let head = column.slice(0, index);
                let tail = column.slice(index + 1, len - index - 1);
                concat(&[head.as_ref(), tail.as_ref()])
            })
            .collect::<Result<Vec<ArrayRef>, _>>()?;

        self.batch = RecordBatch::try_new(self.batch.schema(), columns)?;
        Ok(())
    }

    /// Forward cursor over the records that can remove the record it yielded last.
    pub fn cursor(&mut self) -> RecordCursor<'_> {
        RecordCursor {
            dataset: self,
            position: 0,
            last: None,
        }
    }
}

impl PartialEq for Dataset {
    fn eq(&self, other: &Self) -> bool {
        self.class_index == other.class_index
            && self.batch.schema() == other.batch.schema()
            && self.batch.num_columns() == other.batch.num_columns()
            && self
                .batch
                .columns()
                .iter()
                .zip(other.batch.columns().iter())
                .all(|(left, right)| left.data() == right.data())
    }
}

pub struct Records<'a> {
    dataset: &'a Dataset,
    position: usize,
}

impl<'a> Iterator for Records<'a> {
    type Item = FilterResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.dataset.num_records() {
            return None;
        }

        let record = self.dataset.record(self.position);
        self.position += 1;
        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.dataset.num_records() - self.position;
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for Records<'a> {}

impl<'a> IntoIterator for &'a Dataset {
    type Item = FilterResult<Record>;
    type IntoIter = Records<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.records()
    }
}

pub struct RecordCursor<'a> {
    dataset: &'a mut Dataset,
    position: usize,
    last: Option<usize>,
}

impl<'a> RecordCursor<'a> {
    /// Deletes the record returned by the previous call to `next`.
    pub fn remove(&mut self) -> FilterResult<()> {
        let index = self.last.take().ok_or(FilterError::NothingToRemove)?;
        self.dataset.delete(index)?;
        self.position = index;
        Ok(())
    }
}

impl<'a> Iterator for RecordCursor<'a> {
    type Item = FilterResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.dataset.num_records() {
            return None;
        }

        let record = self.dataset.record(self.position);
        self.last = Some(self.position);
        self.position += 1;
        Some(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::{
        array::{Int64Array, StringArray},
        datatypes::{DataType, Field, Schema},
    };
    use std::sync::Arc;

    fn dataset(values: &[i64]) -> Dataset {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("name", DataType::Utf8, true),
        ]));
        let names: Vec<String> = values.iter().map(|v| format!("n{}", v)).collect();

        Dataset::try_new(
            schema,
            vec![
                Arc::new(Int64Array::from(values.to_vec())),
                Arc::new(StringArray::from(
                    names.iter().map(|n| n.as_str()).collect::<Vec<&str>>(),
                )),
            ],
        )
        .unwrap()
    }

    fn ids(dataset: &Dataset) -> Vec<i64> {
        dataset
            .records()
            .map(|record| record.unwrap().value(0).unwrap().as_i64().unwrap())
            .collect()
    }

    #[test]
    fn test_iteration_yields_records_in_order() {
        let data = dataset(&[1, 2, 3, 4, 5]);
        let records: Vec<Record> = (&data).into_iter().collect::<Result<_, _>>().unwrap();

        assert_eq!(records.len(), 5);
        assert_eq!(ids(&data), vec![1, 2, 3, 4, 5]);
        assert_eq!(records[2].get("name").unwrap(), &Value::from("n3"));
    }

    #[test]
    fn test_cursor_remove_drops_yielded_record() {
        let mut data = dataset(&[1, 2, 3, 4]);

        let mut seen = vec![];
        let mut cursor = data.cursor();
        while let Some(record) = cursor.next() {
            let id = record.unwrap().value(0).unwrap().as_i64().unwrap();
            seen.push(id);
            if id % 2 == 0 {
                cursor.remove().unwrap();
            }
        }

        assert_eq!(seen, vec![1, 2, 3, 4]);
        assert_eq!(ids(&data), vec![1, 3]);
    }

    #[test]
    fn test_cursor_remove_requires_yielded_record() {
        let mut data = dataset(&[1, 2]);
        let mut cursor = data.cursor();

        assert!(matches!(cursor.remove(), Err(FilterError::NothingToRemove)));
        cursor.next();
        cursor.remove().unwrap();
        assert!(matches!(cursor.remove(), Err(FilterError::NothingToRemove)));
        assert_eq!(cursor.count(), 1);
    }

    #[test]
    fn test_delete_out_of_bounds() {
        let mut data = dataset(&[1]);
        assert!(matches!(
            data.delete(1),
            Err(FilterError::RecordOutOfBounds { index: 1, len: 1 })
        ));
    }

    #[test]
    fn test_slice_out_of_bounds() {
        let data = dataset(&[1, 2, 3]);

        assert!(matches!(
            data.slice(2, usize::MAX),
            Err(FilterError::RecordOutOfBounds { len: 3, .. })
        ));
        assert!(matches!(
            data.slice(2, 2),
            Err(FilterError::RecordOutOfBounds { index: 4, len: 3 })
        ));
        assert_eq!(data.slice(3, 0).unwrap().num_records(), 0);
    }

    #[test]
    fn test_slice_and_from_records() {
        let data = dataset(&[1, 2, 3]);
        let tail = data.slice(1, 2).unwrap();
        assert_eq!(ids(&tail), vec![2, 3]);

        let records: Vec<Record> = tail.records().collect::<Result<_, _>>().unwrap();
        let rebuilt = Dataset::from_records(data.schema(), &records).unwrap();
        assert_eq!(ids(&rebuilt), vec![2, 3]);
    }

    #[test]
    fn test_class_index_bounds() {
        assert!(dataset(&[1]).with_class_index(1).is_err());
        assert_eq!(
            dataset(&[1]).with_class_index(0).unwrap().class_index(),
            Some(0)
        );
    }
}
