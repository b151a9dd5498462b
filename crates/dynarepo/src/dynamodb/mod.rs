//! DynamoDB storage backend.
//!
//! Implements the repository contract from `dynarepo_core` over
//! `aws-sdk-dynamodb`.

mod config;
mod error;
mod expression;
mod item;
mod record;
mod repository;
mod stream;

pub use config::DynamoConfig;
pub use item::{
    get_bool, get_number, get_optional_number, get_optional_string, get_string, Item,
};
pub use record::DynamoRecord;
pub use repository::DynamoRepository;
