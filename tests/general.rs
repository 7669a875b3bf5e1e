use arrow::{
    array::Int64Array,
    datatypes::{DataType, Field, Schema},
};
use fnfilter::{
    load_config, BatchFilter, BatchTransformAdapter, Dataset, Filter, MemorySink, SinkKind, Value,
};
use std::{fs, sync::Arc};
use tempdir::TempDir;

fn numbers(count: i64) -> Dataset {
    let schema = Arc::new(Schema::new(vec![Field::new("n", DataType::Int64, false)]));
    Dataset::try_new(
        schema,
        vec![Arc::new(Int64Array::from((0..count).collect::<Vec<i64>>()))],
    )
    .unwrap()
}

fn values(data: &Dataset) -> Vec<Value> {
    data.records()
        .map(|record| record.unwrap().values()[0].clone())
        .collect()
}

#[test]
fn test_iteration_yields_every_record_in_order() {
    let data = numbers(6);
    let mut count = 0;

    for (position, record) in (&data).into_iter().enumerate() {
        assert_eq!(record.unwrap().get("n").unwrap(), &Value::Int64(position as i64));
        count += 1;
    }

    assert_eq!(count, 6);
}

#[test]
fn test_removal_shortens_remaining_iteration() {
    let mut data = numbers(5);

    {
        let mut cursor = data.cursor();
        cursor.next().unwrap().unwrap();
        cursor.next().unwrap().unwrap();
        cursor.remove().unwrap();

        let rest: Vec<Value> = cursor
            .map(|record| record.unwrap().get("n").unwrap().clone())
            .collect();
        assert_eq!(rest, vec![Value::Int64(2), Value::Int64(3), Value::Int64(4)]);
    }

    assert_eq!(data.num_records(), 4);
    assert_eq!(data.record(1).unwrap().get("n").unwrap(), &Value::Int64(2));
}

#[test]
fn test_functions_can_filter_with_cursor() {
    let adapter = BatchTransformAdapter::new(|data| {
        let mut kept = data.clone();
        let mut cursor = kept.cursor();
        while let Some(record) = cursor.next() {
            if record?.get("n")?.as_i64().unwrap_or_default() % 2 == 1 {
                cursor.remove()?;
            }
        }
        Ok(kept)
    });

    let output = adapter.transform_batch(&numbers(7)).unwrap();
    assert_eq!(
        values(&output),
        vec![
            Value::Int64(0),
            Value::Int64(2),
            Value::Int64(4),
            Value::Int64(6)
        ]
    );
}

#[test]
fn test_adapter_from_config_file() {
    let dir = TempDir::new("fnfilter").unwrap();
    let path = dir.path().join("adapter.toml");
    fs::write(
        &path,
        "description = \"drops nothing\"\ndiagnostics = \"stderr\"\n",
    )
    .unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.diagnostics, SinkKind::Stderr);

    let sink = MemorySink::new();
    let adapter = BatchTransformAdapter::new(|_| Err(anyhow::anyhow!("boom")))
        .with_config(config)
        .with_sink(Arc::new(sink.clone()));

    assert_eq!(adapter.global_info(), "drops nothing");
    assert!(adapter.transform_batch(&numbers(1)).is_err());
    assert_eq!(sink.diagnostics().len(), 1);
}
