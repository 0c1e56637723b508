use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn file_exists(&self, path: &str) -> impl std::future::Future<Output = Result<bool>> + Send;
}

/// Extract/transform/load stages of one pipeline run. Each pipeline picks its
/// own intermediate types; `load` returns the path the output landed at.
#[async_trait]
pub trait Pipeline: Send + Sync {
    type Raw: Send + 'static;
    type Prepared: Send + 'static;

    async fn extract(&self) -> Result<Self::Raw>;
    async fn transform(&self, raw: Self::Raw) -> Result<Self::Prepared>;
    async fn load(&self, prepared: Self::Prepared) -> Result<String>;
}
