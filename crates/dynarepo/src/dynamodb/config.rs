//! Environment-driven client configuration.

use aws_sdk_dynamodb::Client;

/// Connection configuration for the DynamoDB backend.
#[derive(Debug, Clone)]
pub struct DynamoConfig {
    /// Custom endpoint URL (for local DynamoDB).
    pub endpoint_url: Option<String>,
    /// AWS region.
    pub region: String,
    /// Overrides the table name declared by the record schema.
    pub table_name: Option<String>,
}

impl Default for DynamoConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl DynamoConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `AWS_ENDPOINT_URL` - Use local DynamoDB (e.g., http://localhost:8000)
    /// - `AWS_REGION` - AWS region (defaults to us-east-1)
    /// - `DYNAMODB_TABLE_NAME` - Override the schema-declared table name
    pub fn from_env() -> Self {
        Self {
            endpoint_url: std::env::var("AWS_ENDPOINT_URL").ok(),
            region: std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            table_name: std::env::var("DYNAMODB_TABLE_NAME").ok(),
        }
    }

    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local DynamoDB ({})", url),
            None => format!("AWS DynamoDB (region: {})", self.region),
        }
    }

    /// Creates a DynamoDB client for this configuration, using the SDK's
    /// default credential chain.
    pub async fn connect(&self) -> Client {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(self.region.clone()));

        if let Some(endpoint) = &self.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        Client::new(&sdk_config)
    }
}
