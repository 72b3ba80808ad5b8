use aws_config::{BehaviorVersion, Region, meta::region::RegionProviderChain};
use aws_sdk_s3::{
    Client,
    config::{Builder as S3ConfigBuilder, Credentials},
    error::DisplayErrorContext,
    operation::{
        create_bucket::CreateBucketError, get_object::GetObjectError,
        head_bucket::HeadBucketError,
    },
    primitives::ByteStream,
    types::{BucketLocationConstraint, CreateBucketConfiguration},
};
use std::error::Error as StdError;
use tracing::{debug, info, instrument};

use thumbgen_application::{
    error::{AppError, AppResult},
    infrastructure_config::S3Config,
    ports::outgoing::object_store::ObjectStorePort,
};

const DEFAULT_REGION: &str = "us-east-1";
const CREDENTIALS_PROVIDER: &str = "thumbgen-static";

/// S3 or any S3-compatible service (MinIO, Ceph, R2...).
pub struct S3ObjectStore {
    client: Client,
    region: String,
}

impl S3ObjectStore {
    /// Builds a client from the ambient AWS config chain, then applies the
    /// configured endpoint, addressing style and static keys on top.
    pub async fn connect(config: &S3Config) -> AppResult<Self> {
        if config.region.trim().is_empty() {
            return Err(AppError::ConfigError {
                message: "storage.s3.region must not be empty".to_string(),
            });
        }

        let region_provider = RegionProviderChain::first_try(Region::new(config.region.clone()));
        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .load()
            .await;

        let mut builder = S3ConfigBuilder::from(&shared).force_path_style(config.force_path_style);
        if let Some(endpoint) = config.endpoint.as_deref() {
            builder = builder.endpoint_url(endpoint);
        }
        if let Some((access_key_id, secret_access_key)) = config.static_credentials() {
            builder = builder.credentials_provider(Credentials::new(
                access_key_id,
                secret_access_key,
                None,
                None,
                CREDENTIALS_PROVIDER,
            ));
        }

        info!(
            region = %config.region,
            endpoint = ?config.redacted_endpoint(),
            force_path_style = config.force_path_style,
            static_credentials = config.static_credentials().is_some(),
            "S3 client configured"
        );

        Ok(Self {
            client: Client::from_conf(builder.build()),
            region: config.region.clone(),
        })
    }
}

/// `us-east-1` is the implicit location and must not be sent.
fn location_constraint(region: &str) -> Option<CreateBucketConfiguration> {
    if region == DEFAULT_REGION {
        return None;
    }
    Some(
        CreateBucketConfiguration::builder()
            .location_constraint(BucketLocationConstraint::from(region))
            .build(),
    )
}

fn storage_error(action: &str, bucket: &str, key: &str, error: impl StdError) -> AppError {
    AppError::StorageError {
        message: format!(
            "S3 {action} {bucket}/{key} failed: {}",
            DisplayErrorContext(error)
        ),
    }
}

#[async_trait::async_trait]
impl ObjectStorePort for S3ObjectStore {
    #[instrument(skip(self))]
    async fn get_object(&self, bucket: &str, key: &str) -> AppResult<Vec<u8>> {
        let response = match self.client.get_object().bucket(bucket).key(key).send().await {
            Ok(response) => response,
            Err(e)
                if e.as_service_error()
                    .is_some_and(GetObjectError::is_no_such_key) =>
            {
                return Err(AppError::NotFound {
                    message: format!("Object {bucket}/{key} not found"),
                });
            }
            Err(e) => return Err(storage_error("get", bucket, key, e)),
        };

        let body = response
            .body
            .collect()
            .await
            .map_err(|e| storage_error("read body of", bucket, key, e))?;
        let bytes = body.into_bytes().to_vec();

        debug!(size = bytes.len(), "Fetched object");
        Ok(bytes)
    }

    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> AppResult<()> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| storage_error("put", bucket, key, e))?;

        debug!("Stored object");
        Ok(())
    }

    async fn ensure_bucket(&self, bucket: &str) -> AppResult<()> {
        match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => return Ok(()),
            Err(e)
                if e.as_service_error()
                    .is_some_and(HeadBucketError::is_not_found) => {}
            Err(e) => {
                return Err(AppError::StorageError {
                    message: format!(
                        "S3 head bucket {bucket} failed: {}",
                        DisplayErrorContext(e)
                    ),
                });
            }
        }

        let request = self
            .client
            .create_bucket()
            .bucket(bucket)
            .set_create_bucket_configuration(location_constraint(&self.region));

        match request.send().await {
            Ok(_) => {
                info!(bucket, region = %self.region, "Created missing bucket");
                Ok(())
            }
            Err(e)
                if e.as_service_error()
                    .is_some_and(CreateBucketError::is_bucket_already_owned_by_you) =>
            {
                Ok(())
            }
            Err(e) => Err(AppError::StorageError {
                message: format!("S3 create bucket {bucket} failed: {}", DisplayErrorContext(e)),
            }),
        }
    }

    fn backend_name(&self) -> &'static str {
        "s3"
    }
}
