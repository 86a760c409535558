use crate::domain::model::{ExtractionResult, SourceFile};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &Path) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Files under `dir` (recursively) whose extension is in `extensions`,
    /// sorted. An empty filter accepts every file.
    fn list_files(
        &self,
        dir: &Path,
        extensions: &[String],
    ) -> impl std::future::Future<Output = Result<Vec<PathBuf>>> + Send;
    fn is_dir(&self, path: &Path) -> impl std::future::Future<Output = bool> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn sources(&self) -> &[String];
    fn extensions(&self) -> &[String];
    fn comment_prefixes(&self) -> &[String];
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn zip_enabled(&self) -> bool;
    fn fail_fast(&self) -> bool;
    /// Fragment names to keep; empty keeps all.
    fn only(&self) -> &[String];
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<SourceFile>>;
    async fn transform(&self, sources: Vec<SourceFile>) -> Result<ExtractionResult>;
    async fn load(&self, result: ExtractionResult) -> Result<String>;
}
