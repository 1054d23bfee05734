//! Injected storage collaborators, shared across handlers.

use std::sync::Arc;

use crate::config::Config;
use crate::storage::dynamo::{DynamoDocumentStore, DynamoEmployeeStore, DynamoLeaveRequestStore};
use crate::storage::s3::S3BlobStore;
use crate::storage::{BlobStore, DocumentStore, EmployeeStore, LeaveRequestStore};

#[derive(Clone)]
pub struct Stores {
    pub employees: Arc<dyn EmployeeStore>,
    pub leaves: Arc<dyn LeaveRequestStore>,
    pub documents: Arc<dyn DocumentStore>,
    pub blobs: Arc<dyn BlobStore>,
}

impl Stores {
    /// Wire up the AWS collaborators: three DynamoDB tables and the
    /// document bucket, all from the ambient credential chain.
    pub async fn from_aws(config: &Config) -> Self {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let dynamo = aws_sdk_dynamodb::Client::new(&aws_config);
        let s3 = aws_sdk_s3::Client::new(&aws_config);

        Stores {
            employees: Arc::new(DynamoEmployeeStore::new(
                dynamo.clone(),
                config.employees_table.clone(),
            )),
            leaves: Arc::new(DynamoLeaveRequestStore::new(
                dynamo.clone(),
                config.leave_requests_table.clone(),
            )),
            documents: Arc::new(DynamoDocumentStore::new(
                dynamo,
                config.documents_table.clone(),
            )),
            blobs: Arc::new(S3BlobStore::new(s3, config.documents_bucket.clone())),
        }
    }
}
