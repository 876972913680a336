use std::collections::HashMap;
use std::sync::Arc;

use arrow::datatypes::{Field, Schema as ArrowSchema, SchemaRef};

use super::columns::DEFAULT_PARTITION_COLUMNS;
use super::constants::FIELD_MMS_TYPE;
use super::error::SchemaError;
use super::table_kind::TableKind;
use super::types::{Column, ColumnType};

/// Resolved column layout of a raw table file.
///
/// A closed set: one variant per table kind with a fixed type mapping, plus
/// `Untyped` for everything else. Column order always matches the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schema {
    /// Bid-per-offer table with its fixed column types
    BidPerOffer {
        /// Header columns with their types
        columns: Vec<Column>,
    },
    /// Pass-through schema: every column is a string, no timestamp parsing
    Untyped {
        /// Header column names
        columns: Vec<String>,
    },
}

impl Schema {
    /// Resolve the schema of a table kind for the given header.
    ///
    /// Pure function of its inputs. Header columns the fixed mapping does not
    /// name are strings.
    pub fn resolve(kind: TableKind, header: &[String]) -> Self {
        match kind {
            TableKind::BidPerOffer => Schema::BidPerOffer {
                columns: header
                    .iter()
                    .map(|name| Column::new(name.clone(), kind.column_type(name)))
                    .collect(),
            },
            TableKind::Unrecognized => Schema::Untyped {
                columns: header.to_vec(),
            },
        }
    }

    /// Table kind this schema was resolved for
    pub fn kind(&self) -> TableKind {
        match self {
            Schema::BidPerOffer { .. } => TableKind::BidPerOffer,
            Schema::Untyped { .. } => TableKind::Unrecognized,
        }
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        match self {
            Schema::BidPerOffer { columns } => columns.len(),
            Schema::Untyped { columns } => columns.len(),
        }
    }

    /// Whether the header had no columns
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Name of the column at `index`
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn column_name(&self, index: usize) -> &str {
        match self {
            Schema::BidPerOffer { columns } => &columns[index].name,
            Schema::Untyped { columns } => &columns[index],
        }
    }

    /// Type of the column at `index`
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn column_type(&self, index: usize) -> ColumnType {
        match self {
            Schema::BidPerOffer { columns } => columns[index].column_type,
            Schema::Untyped { .. } => ColumnType::Utf8,
        }
    }

    /// Iterate `(name, type)` pairs in header order
    pub fn iter(&self) -> impl Iterator<Item = (&str, ColumnType)> + '_ {
        (0..self.len()).map(move |i| (self.column_name(i), self.column_type(i)))
    }

    /// Position of the first column called `name`
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.iter().position(|(column, _)| column == name)
    }

    /// Names of the timestamp-typed columns
    pub fn timestamp_columns(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, ty)| *ty == ColumnType::Timestamp)
            .map(|(name, _)| name)
            .collect()
    }

    /// Arrow schema of the batches produced under this schema.
    ///
    /// Every field is nullable; field metadata records the MMS column type.
    pub fn arrow_schema(&self) -> SchemaRef {
        let fields: Vec<Field> = self
            .iter()
            .map(|(name, ty)| {
                let mut metadata = HashMap::new();
                metadata.insert(FIELD_MMS_TYPE.to_string(), ty.as_str().to_string());
                Field::new(name, ty.arrow_type(), true).with_metadata(metadata)
            })
            .collect();
        Arc::new(ArrowSchema::new(fields))
    }

    /// Pick the partition column.
    ///
    /// A requested column must be present in the header. Without a request the
    /// first of `TRADINGDATE`, `SETTLEMENTDATE` present is used.
    pub fn partition_column(&self, requested: Option<&str>) -> Result<usize, SchemaError> {
        match requested {
            Some(name) => self
                .index_of(name)
                .ok_or_else(|| SchemaError::MissingPartitionColumn(name.to_string())),
            None => DEFAULT_PARTITION_COLUMNS
                .iter()
                .find_map(|name| self.index_of(name))
                .ok_or(SchemaError::NoDefaultPartitionColumn),
        }
    }
}
