use crate::core::parser::{FragmentParser, MarkerSyntax};
use crate::core::{ConfigProvider, ExtractionResult, Pipeline, SourceFile, Storage};
use crate::domain::model::{ExtractedFile, Fragment};
use crate::utils::error::{FragmentError, Result};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use zip::write::{FileOptions, ZipWriter};

pub const ZIP_FILENAME: &str = "fragments.zip";

#[derive(Serialize)]
struct FragmentRow<'a> {
    source: String,
    name: &'a str,
    begin_line: usize,
    end_line: usize,
    text: &'a str,
}

pub struct FragmentPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    syntax: MarkerSyntax,
}

impl<S: Storage, C: ConfigProvider> FragmentPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let syntax = MarkerSyntax::new(config.comment_prefixes())?;
        Ok(Self {
            storage,
            config,
            syntax,
        })
    }

    async fn read_source(&self, path: PathBuf) -> Result<SourceFile> {
        let bytes = self
            .storage
            .read_file(&path)
            .await
            .map_err(|e| e.in_file(&path))?;
        let content = String::from_utf8(bytes).map_err(|e| {
            FragmentError::ProcessingError {
                message: format!("source is not valid UTF-8: {}", e),
            }
            .in_file(&path)
        })?;
        Ok(SourceFile { path, content })
    }

    fn extract_file(&self, source: &SourceFile) -> Result<ExtractedFile> {
        let parser = FragmentParser::with_syntax(&source.content, self.syntax.clone());
        let only = self.config.only();

        // later sections replace earlier ones with the same name
        let mut by_name: BTreeMap<String, Fragment> = BTreeMap::new();
        for (section, text) in parser.extract()? {
            if !only.is_empty() && !only.contains(&section.name) {
                continue;
            }
            by_name.insert(
                section.name.clone(),
                Fragment {
                    name: section.name.clone(),
                    text,
                    section,
                },
            );
        }

        Ok(ExtractedFile {
            path: source.path.clone(),
            fragments: by_name.into_values().collect(),
        })
    }

    fn output_filename(format: &str) -> String {
        format!("fragments.{}", format)
    }

    fn render(&self, format: &str, result: &ExtractionResult) -> Result<Vec<u8>> {
        match format {
            "json" => render_json(result),
            "csv" => render_delimited(result, b','),
            "tsv" => render_delimited(result, b'\t'),
            other => Err(FragmentError::InvalidConfigValueError {
                field: "output_formats".to_string(),
                value: other.to_string(),
                reason: "Unsupported format".to_string(),
            }),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for FragmentPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<SourceFile>> {
        let mut sources = Vec::new();
        let mut seen: HashSet<PathBuf> = HashSet::new();

        for source in self.config.sources() {
            let path = PathBuf::from(source);
            let candidates = if self.storage.is_dir(&path).await {
                let files = self
                    .storage
                    .list_files(&path, self.config.extensions())
                    .await
                    .map_err(|e| e.in_file(&path))?;
                tracing::debug!("Found {} files under {}", files.len(), path.display());
                files
            } else {
                vec![path]
            };

            for file in candidates {
                // a file listed on its own and inside a listed directory is read once
                if !seen.insert(source_key(&file)) {
                    tracing::debug!("Skipping repeated source {}", file.display());
                    continue;
                }
                sources.push(self.read_source(file).await?);
            }
        }

        Ok(sources)
    }

    async fn transform(&self, sources: Vec<SourceFile>) -> Result<ExtractionResult> {
        let mut files = Vec::new();
        let mut skipped = Vec::new();

        for source in &sources {
            match self.extract_file(source) {
                Ok(extracted) => {
                    tracing::debug!(
                        "{}: {} fragments",
                        source.path.display(),
                        extracted.fragments.len()
                    );
                    files.push(extracted);
                }
                Err(e) if e.is_syntax_error() && !self.config.fail_fast() => {
                    tracing::warn!("Skipping {}: {}", source.path.display(), e);
                    skipped.push(source.path.clone());
                }
                Err(e) => return Err(e.in_file(&source.path)),
            }
        }

        Ok(ExtractionResult {
            generated_at: chrono::Utc::now(),
            files,
            skipped,
        })
    }

    async fn load(&self, result: ExtractionResult) -> Result<String> {
        let formats = self.config.output_formats();
        let mut rendered = Vec::with_capacity(formats.len());
        for format in formats {
            rendered.push((Self::output_filename(format), self.render(format, &result)?));
        }

        if self.config.zip_enabled() {
            let zip_data = {
                let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

                for (name, data) in &rendered {
                    zip.start_file::<_, ()>(name.as_str(), FileOptions::default())?;
                    zip.write_all(data)?;
                }

                // one plain text entry per fragment
                for file in &result.files {
                    let dir = archive_dir(&file.path);
                    for fragment in &file.fragments {
                        let entry = format!("{}/{}.txt", dir, fragment.name);
                        zip.start_file::<_, ()>(entry, FileOptions::default())?;
                        zip.write_all(fragment.text.as_bytes())?;
                    }
                }

                let cursor = zip.finish()?;
                cursor.into_inner()
            };

            tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
            self.storage.write_file(ZIP_FILENAME, &zip_data).await?;
            return Ok(format!("{}/{}", self.config.output_path(), ZIP_FILENAME));
        }

        for (name, data) in &rendered {
            tracing::debug!("Writing {} ({} bytes)", name, data.len());
            self.storage.write_file(name, data).await?;
        }

        let primary = rendered
            .first()
            .map(|(name, _)| name.clone())
            .ok_or_else(|| FragmentError::MissingConfigError {
                field: "output_formats".to_string(),
            })?;
        Ok(format!("{}/{}", self.config.output_path(), primary))
    }
}

fn render_json(result: &ExtractionResult) -> Result<Vec<u8>> {
    let files: Vec<serde_json::Value> = result
        .files
        .iter()
        .map(|file| {
            serde_json::json!({
                "path": file.path.to_string_lossy(),
                "fragments": file.fragment_map(),
            })
        })
        .collect();

    let document = serde_json::json!({
        "generated_at": result.generated_at.to_rfc3339(),
        "files": files,
        "skipped": result
            .skipped
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect::<Vec<_>>(),
    });

    Ok(serde_json::to_vec_pretty(&document)?)
}

fn render_delimited(result: &ExtractionResult, delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    for file in &result.files {
        for fragment in &file.fragments {
            writer.serialize(FragmentRow {
                source: file.path.to_string_lossy().into_owned(),
                name: &fragment.name,
                begin_line: fragment.section.begin_line + 1,
                end_line: fragment.section.end_line + 1,
                text: &fragment.text,
            })?;
        }
    }

    if result.fragment_count() == 0 {
        writer.write_record(["source", "name", "begin_line", "end_line", "text"])?;
    }

    writer.into_inner().map_err(|e| FragmentError::ProcessingError {
        message: format!("failed to flush delimited output: {}", e),
    })
}

/// Identity of a source path for de-duplication; `.` components are ignored.
fn source_key(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Archive directory for a source path: normal components only.
fn archive_dir(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
