/// Object storage configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Bucket uploads are written to.
    pub bucket: String,
    /// AWS region (ignored by most S3-compatible servers, still required
    /// by the SDK).
    pub region: String,
    /// Endpoint override for S3-compatible servers, e.g.
    /// `http://localhost:9000` for MinIO. `None` targets AWS.
    pub endpoint: Option<String>,
    /// Base URL images are publicly served from, without trailing slash.
    pub public_base_url: String,
}

impl StorageConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` when `S3_BUCKET` is unset, which disables uploads.
    ///
    /// | Env Var              | Default               |
    /// |----------------------|-----------------------|
    /// | `S3_BUCKET`          | (required)            |
    /// | `S3_REGION`          | `eu-central-1`        |
    /// | `S3_ENDPOINT`        | (none, targets AWS)   |
    /// | `S3_PUBLIC_BASE_URL` | derived from endpoint |
    pub fn from_env() -> Option<Self> {
        let bucket = std::env::var("S3_BUCKET").ok()?;

        let region = std::env::var("S3_REGION").unwrap_or_else(|_| "eu-central-1".into());

        let endpoint = std::env::var("S3_ENDPOINT").ok().filter(|s| !s.is_empty());

        let public_base_url = std::env::var("S3_PUBLIC_BASE_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| match &endpoint {
                Some(endpoint) => format!("{}/{}", endpoint.trim_end_matches('/'), bucket),
                None => format!("https://{bucket}.s3.{region}.amazonaws.com"),
            })
            .trim_end_matches('/')
            .to_string();

        Some(Self {
            bucket,
            region,
            endpoint,
            public_base_url,
        })
    }
}
