use dynarepo_core::key::Record;
use dynarepo_core::repository::RepositoryError;

use super::item::Item;

/// A record that can be stored in DynamoDB.
///
/// Conversions are written explicitly, in both directions, the same way
/// the key mapping is declared: nothing about the record is discovered at
/// runtime. `to_item` must include the key attributes named by the
/// record's schema (and any index key attributes the record participates
/// in); `from_item` reads them back alongside the data attributes.
pub trait DynamoRecord: Record {
    /// Converts the record to a DynamoDB item, including key attributes.
    fn to_item(&self) -> Result<Item, RepositoryError>;

    /// Reads a record back from a DynamoDB item.
    fn from_item(item: &Item) -> Result<Self, RepositoryError>;
}
