use crate::error::{FilterError, FilterResult};
use arrow::datatypes::{DataType, Schema};
use itertools::Itertools;
use std::{collections::BTreeSet, fmt};

/// What kinds of data a filter is able to process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    NominalAttributes,
    NumericAttributes,
    StringAttributes,
    DateAttributes,
    RelationalAttributes,
    MissingValues,
    NominalClass,
    NumericClass,
    StringClass,
    DateClass,
    RelationalClass,
    MissingClassValues,
    /// The filter works without a class attribute being set.
    NoClass,
}

const ATTRIBUTES: [Capability; 5] = [
    Capability::NominalAttributes,
    Capability::NumericAttributes,
    Capability::StringAttributes,
    Capability::DateAttributes,
    Capability::RelationalAttributes,
];

const CLASSES: [Capability; 5] = [
    Capability::NominalClass,
    Capability::NumericClass,
    Capability::StringClass,
    Capability::DateClass,
    Capability::RelationalClass,
];

impl Capability {
    pub fn attribute_for(data_type: &DataType) -> Option<Capability> {
        match data_type {
            DataType::Boolean | DataType::Dictionary(_, _) => Some(Capability::NominalAttributes),
            DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float16
            | DataType::Float32
            | DataType::Float64
            | DataType::Decimal(_, _) => Some(Capability::NumericAttributes),
            DataType::Utf8 | DataType::LargeUtf8 => Some(Capability::StringAttributes),
            DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _) => {
                Some(Capability::DateAttributes)
            }
            DataType::List(_) | DataType::LargeList(_) | DataType::Struct(_) => {
                Some(Capability::RelationalAttributes)
            }
            _ => None,
        }
    }

    pub fn class_for(data_type: &DataType) -> Option<Capability> {
        Capability::attribute_for(data_type).map(|attribute| match attribute {
            Capability::NominalAttributes => Capability::NominalClass,
            Capability::NumericAttributes => Capability::NumericClass,
            Capability::StringAttributes => Capability::StringClass,
            Capability::DateAttributes => Capability::DateClass,
            _ => Capability::RelationalClass,
        })
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    enabled: BTreeSet<Capability>,
}

impl Capabilities {
    pub fn new() -> Capabilities {
        Capabilities::default()
    }

    pub fn enable(&mut self, capability: Capability) -> &mut Capabilities {
        self.enabled.insert(capability);
        self
    }

    pub fn disable(&mut self, capability: Capability) -> &mut Capabilities {
        self.enabled.remove(&capability);
        self
    }

    pub fn enable_all_attributes(&mut self) -> &mut Capabilities {
        self.enabled.extend(ATTRIBUTES.iter().copied());
        self.enabled.insert(Capability::MissingValues);
        self
    }

    pub fn enable_all_classes(&mut self) -> &mut Capabilities {
        self.enabled.extend(CLASSES.iter().copied());
        self.enabled.insert(Capability::MissingClassValues);
        self
    }

    pub fn handles(&self, capability: Capability) -> bool {
        self.enabled.contains(&capability)
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.enabled.iter().copied()
    }

    /// Checks that a schema, with an optional class attribute, can be processed.
    pub fn test(&self, schema: &Schema, class_index: Option<usize>) -> FilterResult<()> {
        let mut problems = vec![];

        for (index, field) in schema.fields().iter().enumerate() {
            if Some(index) == class_index {
                continue;
            }

            match Capability::attribute_for(field.data_type()) {
                Some(capability) if self.handles(capability) => {}
                Some(capability) => {
                    problems.push(format!("{} (field {})", capability, field.name()))
                }
                None => problems.push(format!(
                    "type {:?} (field {})",
                    field.data_type(),
                    field.name()
                )),
            }

            if field.is_nullable() && !self.handles(Capability::MissingValues) {
                problems.push(format!("{} (field {})", Capability::MissingValues, field.name()));
            }
        }

        match class_index {
            None if !self.handles(Capability::NoClass) => {
                problems.push(Capability::NoClass.to_string())
            }
            None => {}
            Some(index) => {
                if index >= schema.fields().len() {
                    return Err(FilterError::InvalidClassIndex(index));
                }

                let field = schema.field(index);
                match Capability::class_for(field.data_type()) {
                    Some(capability) if self.handles(capability) => {}
                    Some(capability) => {
                        problems.push(format!("{} (class {})", capability, field.name()))
                    }
                    None => problems.push(format!(
                        "class type {:?} (class {})",
                        field.data_type(),
                        field.name()
                    )),
                }

                if field.is_nullable() && !self.handles(Capability::MissingClassValues) {
                    problems.push(format!(
                        "{} (class {})",
                        Capability::MissingClassValues,
                        field.name()
                    ));
                }
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(FilterError::Capability(format!(
                "missing {}",
                problems.iter().join(", ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::Field;

    fn schema() -> Schema {
        Schema::new(vec![
            Field::new("age", DataType::Int32, false),
            Field::new("name", DataType::Utf8, true),
            Field::new("label", DataType::Boolean, false),
        ])
    }

    #[test]
    fn test_everything_enabled_passes() {
        let mut capabilities = Capabilities::new();
        capabilities
            .enable_all_attributes()
            .enable_all_classes()
            .enable(Capability::NoClass);

        assert!(capabilities.test(&schema(), None).is_ok());
        assert!(capabilities.test(&schema(), Some(2)).is_ok());
    }

    #[test]
    fn test_missing_capabilities_are_listed() {
        let mut capabilities = Capabilities::new();
        capabilities.enable(Capability::NumericAttributes);

        let message = match capabilities.test(&schema(), None) {
            Err(FilterError::Capability(message)) => message,
            other => panic!("unexpected result: {:?}", other),
        };

        assert!(message.contains("StringAttributes (field name)"));
        assert!(message.contains("MissingValues (field name)"));
        assert!(message.contains("NoClass"));
        assert!(!message.contains("(field age)"));
    }

    #[test]
    fn test_class_attribute_is_checked_as_class() {
        let mut capabilities = Capabilities::new();
        capabilities.enable_all_attributes();

        let message = match capabilities.test(&schema(), Some(2)) {
            Err(FilterError::Capability(message)) => message,
            other => panic!("unexpected result: {:?}", other),
        };

        assert_eq!(message, "missing NominalClass (class label)");
    }
}
