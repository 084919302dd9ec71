//! `ObjectLister` over the AWS SDK, pointed at any S3-compatible endpoint.

use aws_sdk_s3::{
    config::{BehaviorVersion, Credentials, Region},
    Client,
};
use chrono::{DateTime, Utc};
use configs::StorageConfig;
use tracing::{debug, instrument};

use super::domain::StoredObject;
use super::lister::ObjectLister;
use crate::errors::ServiceError;

pub struct S3ObjectLister {
    client: Client,
    bucket: String,
}

impl S3ObjectLister {
    /// Build a client with static keys and path-style addressing.
    pub fn from_config(cfg: &StorageConfig) -> Self {
        let credentials = Credentials::new(&cfg.access_key, &cfg.secret_key, None, None, "portrait-site");
        let mut builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(cfg.region.clone()))
            .credentials_provider(credentials)
            .force_path_style(true);
        if let Some(endpoint) = &cfg.endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }
        Self { client: Client::from_conf(builder.build()), bucket: cfg.bucket.clone() }
    }
}

fn to_utc(ts: Option<&aws_sdk_s3::primitives::DateTime>) -> DateTime<Utc> {
    ts.and_then(|t| DateTime::from_timestamp(t.secs(), t.subsec_nanos()))
        .unwrap_or(DateTime::UNIX_EPOCH)
}

#[async_trait::async_trait]
impl ObjectLister for S3ObjectLister {
    #[instrument(skip(self), fields(bucket = %self.bucket))]
    async fn list_all(&self) -> Result<Vec<StoredObject>, ServiceError> {
        let mut objects = Vec::new();
        let mut token: Option<String> = None;
        loop {
            let page = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .set_continuation_token(token.take())
                .send()
                .await
                .map_err(|e| ServiceError::StorageUnavailable(e.to_string()))?;

            for o in page.contents() {
                if let Some(key) = o.key() {
                    objects.push(StoredObject { key: key.to_string(), last_modified: to_utc(o.last_modified()) });
                }
            }

            match (page.is_truncated(), page.next_continuation_token()) {
                (Some(true), Some(next)) => token = Some(next.to_string()),
                _ => break,
            }
        }
        debug!(count = objects.len(), "bucket listed");
        Ok(objects)
    }
}
