//! Fixture table declaration (pure data).

use dynarepo_core::schema::{IndexSchema, KeyAttribute, TableSchema};

/// The table the dynarepo integration tests run against.
pub const ORDERS_TABLE: &str = "dynarepo-orders";

/// Returns the fixture table schema the integration tests expect: a
/// composite primary key plus one GSI for status lookups.
pub fn orders_table_schema(table_name: &str) -> TableSchema {
    TableSchema::builder(table_name)
        .partition_key(KeyAttribute::string("PK"))
        .sort_key(KeyAttribute::string("SK"))
        .index(
            IndexSchema::new("GSI1", KeyAttribute::string("GSI1PK"))
                .with_sort_key(KeyAttribute::string("GSI1SK")),
        )
        .build()
        .expect("fixture schema is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_schema_declares_the_gsi() {
        let schema = orders_table_schema(ORDERS_TABLE);

        assert_eq!(schema.table_name, ORDERS_TABLE);
        assert_eq!(schema.partition_key.name, "PK");
        assert_eq!(schema.sort_key.as_ref().unwrap().name, "SK");
        assert!(schema.index("GSI1").is_some());
    }
}
