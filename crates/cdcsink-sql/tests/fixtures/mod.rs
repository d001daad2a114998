//! Table descriptors shared by the synthesis integration tests
//!
//! Column names avoid SQL keywords so the generated statements can be fed
//! back through sqlparser.

use cdcsink_core::{Column, TableDescriptor, TypeCode};

/// Single-key table with one scaled NUMERIC column
pub fn orders() -> TableDescriptor {
    TableDescriptor::builder("ORDERS")
        .key(Column::new("ID", TypeCode::BigInt))
        .column(Column::new("AMOUNT", TypeCode::Numeric).with_scale(2))
        .build()
        .unwrap()
}

/// Composite key with two regular columns
pub fn order_lines() -> TableDescriptor {
    TableDescriptor::builder("ORDER_LINES")
        .key(Column::new("ORDER_ID", TypeCode::BigInt))
        .key(Column::new("LINE_NO", TypeCode::Integer))
        .column(Column::new("SKU", TypeCode::Varchar).not_null())
        .column(Column::new("QTY", TypeCode::Integer))
        .build()
        .unwrap()
}

/// Table whose only columns are the primary key
pub fn tags() -> TableDescriptor {
    TableDescriptor::builder("TAGS")
        .key(Column::new("TAG_ID", TypeCode::Integer))
        .key(Column::new("LABEL", TypeCode::Varchar))
        .build()
        .unwrap()
}

/// Table with one BLOB column
pub fn documents() -> TableDescriptor {
    TableDescriptor::builder("DOCUMENTS")
        .key(Column::new("DOC_ID", TypeCode::BigInt))
        .column(Column::new("TITLE", TypeCode::Varchar).not_null())
        .lob(Column::new("CONTENT", TypeCode::Blob))
        .build()
        .unwrap()
}

/// Composite key with a mix of scalar types, no LOBs
///
/// Every type here has a MySQL and PostgreSQL rendering sqlparser accepts.
pub fn shipments() -> TableDescriptor {
    TableDescriptor::builder("SHIPMENTS")
        .key(Column::new("WAREHOUSE_ID", TypeCode::SmallInt))
        .key(Column::new("SHIPMENT_ID", TypeCode::BigInt))
        .column(Column::new("CARRIER", TypeCode::Varchar).not_null())
        .column(Column::new("WEIGHT", TypeCode::Double))
        .column(Column::new("PRICE", TypeCode::Decimal).with_scale(4))
        .column(Column::new("URGENCY", TypeCode::TinyInt))
        .column(Column::new("SHIPPED_AT", TypeCode::Timestamp))
        .column(Column::new("PAYLOAD_HASH", TypeCode::Binary))
        .build()
        .unwrap()
}

pub fn all_tables() -> Vec<TableDescriptor> {
    vec![orders(), order_lines(), tags(), documents(), shipments()]
}
