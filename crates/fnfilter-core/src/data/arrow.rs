use super::Value;
use crate::error::{FilterError, FilterResult};
use arrow::array::{
    Array, ArrayRef, BooleanArray, Float64Array, Int32Array, Int64Array, LargeStringArray,
    StringArray,
};
use arrow::datatypes::{DataType, Field};
use std::sync::Arc;

fn downcast<'a, T: 'static>(array: &'a ArrayRef) -> FilterResult<&'a T> {
    array
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| FilterError::UnsupportedType(array.data_type().clone()))
}

macro_rules! array_value {
    ($array:expr, $index:expr, $Array:ty, $variant:ident) => {{
        let array = downcast::<$Array>($array)?;
        Value::$variant(array.value($index).into())
    }};
}

/// Reads the value at `index` of a column.
pub fn value_at(array: &ArrayRef, index: usize) -> FilterResult<Value> {
    if array.is_null(index) {
        return Ok(Value::Null);
    }

    let value = match array.data_type() {
        DataType::Boolean => array_value!(array, index, BooleanArray, Boolean),
        DataType::Int32 => array_value!(array, index, Int32Array, Int32),
        DataType::Int64 => array_value!(array, index, Int64Array, Int64),
        DataType::Float64 => array_value!(array, index, Float64Array, Float64),
        DataType::Utf8 => array_value!(array, index, StringArray, Utf8),
        DataType::LargeUtf8 => array_value!(array, index, LargeStringArray, Utf8),
        data_type => return Err(FilterError::UnsupportedType(data_type.clone())),
    };

    Ok(value)
}

macro_rules! collect_column {
    ($field:expr, $values:expr, $variant:ident) => {
        $values
            .iter()
            .map(|value| match value {
                Value::Null => Ok(None),
                Value::$variant(value) => Ok(Some(value.clone())),
                _ => Err(FilterError::TypeMismatch {
                    field: $field.name().clone(),
                    expected: $field.data_type().clone(),
                }),
            })
            .collect::<FilterResult<Vec<_>>>()
    };
}

/// Builds a column of the field's type from row values.
pub fn values_to_array(field: &Field, values: &[&Value]) -> FilterResult<ArrayRef> {
    let array: ArrayRef = match field.data_type() {
        DataType::Boolean => Arc::new(BooleanArray::from(collect_column!(field, values, Boolean)?)),
        DataType::Int32 => Arc::new(Int32Array::from(collect_column!(field, values, Int32)?)),
        DataType::Int64 => Arc::new(Int64Array::from(collect_column!(field, values, Int64)?)),
        DataType::Float64 => Arc::new(Float64Array::from(collect_column!(field, values, Float64)?)),
        DataType::Utf8 => {
            let strings: Vec<Option<String>> = collect_column!(field, values, Utf8)?;
            Arc::new(StringArray::from(
                strings
                    .iter()
                    .map(|s| s.as_deref())
                    .collect::<Vec<Option<&str>>>(),
            ))
        }
        DataType::LargeUtf8 => {
            let strings: Vec<Option<String>> = collect_column!(field, values, Utf8)?;
            Arc::new(LargeStringArray::from(
                strings
                    .iter()
                    .map(|s| s.as_deref())
                    .collect::<Vec<Option<&str>>>(),
            ))
        }
        data_type => return Err(FilterError::UnsupportedType(data_type.clone())),
    };

    Ok(array)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_at_reads_nulls() {
        let array: ArrayRef = Arc::new(Int64Array::from(vec![Some(1), None]));
        assert_eq!(value_at(&array, 0).unwrap(), Value::Int64(1));
        assert_eq!(value_at(&array, 1).unwrap(), Value::Null);
    }

    #[test]
    fn test_large_strings_read_as_utf8() {
        let array: ArrayRef = Arc::new(LargeStringArray::from(vec![Some("a"), Some("b")]));
        assert_eq!(value_at(&array, 1).unwrap(), Value::from("b"));
    }

    #[test]
    fn test_values_to_array_rejects_mismatched_values() {
        let field = Field::new("age", DataType::Int32, true);
        let text = Value::from("old");
        let result = values_to_array(&field, &[&Value::Int32(4), &text]);

        assert!(matches!(result, Err(FilterError::TypeMismatch { .. })));
    }

    #[test]
    fn test_values_to_array_unsupported_type() {
        let field = Field::new("when", DataType::Date32, true);
        let result = values_to_array(&field, &[]);

        assert!(matches!(
            result,
            Err(FilterError::UnsupportedType(DataType::Date32))
        ));
    }
}
