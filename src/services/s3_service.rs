use std::error::Error;

use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::Client;

use crate::config::Config;

#[derive(Clone)]
pub struct S3Service {
    config: Config,
    client: Client,
}

impl S3Service {
    pub async fn new(config: Config) -> Self {
        let credentials = Credentials::new(
            config.s3_access_key.clone(),
            config.s3_secret_key.clone(),
            None,
            None,
            "static",
        );

        let region = Region::new(config.s3_region.clone());

        let shared_config = aws_config::defaults(BehaviorVersion::latest())
            .region(region)
            .credentials_provider(credentials)
            .endpoint_url(config.s3_endpoint.clone())
            .load()
            .await;

        // Custom S3 endpoints (MinIO/Ceph/etc) usually require path style
        let s3_config_builder =
            aws_sdk_s3::config::Builder::from(&shared_config).force_path_style(true);

        let client = Client::from_conf(s3_config_builder.build());

        Self { config, client }
    }

    /// Public URL for a stored object: endpoint/bucket/key.
    pub fn public_url(&self, key: &str) -> String {
        let base = self.config.s3_endpoint.trim_end_matches('/');
        format!("{}/{}/{}", base, self.config.s3_bucket_name, key)
    }

    /// Inverse of `public_url`; `None` when the URL points outside our bucket.
    pub fn key_from_url(&self, url: &str) -> Option<String> {
        let prefix = format!(
            "{}/{}/",
            self.config.s3_endpoint.trim_end_matches('/'),
            self.config.s3_bucket_name
        );
        url.strip_prefix(&prefix)
            .filter(|k| !k.is_empty())
            .map(|k| k.to_string())
    }

    pub async fn upload_file(
        &self,
        file_data: Vec<u8>,
        key: String,
        content_type: String,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        let bucket = &self.config.s3_bucket_name;

        let result = self
            .client
            .put_object()
            .bucket(bucket)
            .key(&key)
            .body(file_data.into())
            .content_type(content_type)
            .send()
            .await;

        match result {
            Ok(_) => Ok(self.public_url(&key)),
            Err(e) => {
                let err_msg = e.into_service_error();
                tracing::error!("S3 upload error: {:?}", err_msg);
                Err(format!("S3 upload failed: {}", err_msg).into())
            }
        }
    }

    /// Server-side copy then delete; S3 has no native rename.
    pub async fn move_object(
        &self,
        from: &str,
        to: &str,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let bucket = &self.config.s3_bucket_name;
        let copy_source = format!("{}/{}", bucket, from);

        self.client
            .copy_object()
            .bucket(bucket)
            .copy_source(copy_source)
            .key(to)
            .send()
            .await
            .map_err(|e| format!("S3 copy failed: {}", e.into_service_error()))?;

        self.client
            .delete_object()
            .bucket(bucket)
            .key(from)
            .send()
            .await
            .map_err(|e| format!("S3 delete failed: {}", e.into_service_error()))?;

        Ok(())
    }

    pub async fn remove_object(&self, key: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.client
            .delete_object()
            .bucket(&self.config.s3_bucket_name)
            .key(key)
            .send()
            .await
            .map_err(|e| format!("S3 delete failed: {}", e.into_service_error()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            server_host: "127.0.0.1".to_string(),
            server_port: 0,
            database_url: String::new(),
            jwt_secret: String::new(),
            jwt_expires_in: 60,
            s3_endpoint: "http://minio.local:9000/".to_string(),
            s3_region: "us-east-1".to_string(),
            s3_access_key: "key".to_string(),
            s3_secret_key: "secret".to_string(),
            s3_bucket_name: "newshub".to_string(),
            site_base_url: "https://news.example".to_string(),
        }
    }

    #[tokio::test]
    async fn public_url_and_key_round_trip() {
        let svc = S3Service::new(test_config()).await;
        let url = svc.public_url("articles/abc/1-photo.jpg");
        assert_eq!(url, "http://minio.local:9000/newshub/articles/abc/1-photo.jpg");
        assert_eq!(
            svc.key_from_url(&url),
            Some("articles/abc/1-photo.jpg".to_string())
        );
    }

    #[tokio::test]
    async fn key_from_url_rejects_foreign_urls() {
        let svc = S3Service::new(test_config()).await;
        assert_eq!(svc.key_from_url("https://elsewhere.example/photo.jpg"), None);
    }
}
