use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::app_config::Config;
use crate::file_utils::{FileManager, TEXT_EXTENSION};
use crate::gateways::{
    ConsoleChooser, DocumentHandle, Gateways, IdentityMorphology, InflectionTable, PageSink,
    PngDirectorySink, RasterRenderer, Thesaurus,
};
use crate::language_utils::{DEFAULT_LANGUAGE, get_language_name, resolve_language_or_default};
use crate::layout::Document;
use crate::lexicon::Lexicon;
use crate::translation::{DefinitionChoices, SessionSettings, TranslationSession};

// @module: Application controller for text translation

/// Everything a worker needs to translate one file
struct FileJob {
    input_file: PathBuf,
    output_dir: PathBuf,
    lexicon: Arc<Lexicon>,
    gateways: Gateways,
    settings: SessionSettings,
    choices: DefinitionChoices,
}

/// Outcome counts of a folder run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Main application controller for symbol translation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Shared, read-only lexicon
    lexicon: Arc<Lexicon>,
    // @field: Collaborators handed to every session
    gateways: Gateways,
    // @field: Sticky definition choices shared by all documents of the run
    choices: DefinitionChoices,
}

impl Controller {
    // @method: Create a controller from configuration, loading every resource it names
    pub fn with_config(config: Config) -> Result<Self> {
        let lexicon = Lexicon::load(&config.lexicon_path)
            .with_context(|| format!("Failed to load lexicon: {:?}", config.lexicon_path))?;
        let gateways = Self::build_gateways(&config)?;
        Ok(Self::new(config, lexicon, gateways))
    }

    /// Create a controller with explicit collaborators
    pub fn new(config: Config, lexicon: Lexicon, gateways: Gateways) -> Self {
        info!("Loaded lexicon with {} entries", lexicon.len());
        Self {
            config,
            lexicon: Arc::new(lexicon),
            gateways,
            choices: DefinitionChoices::new(),
        }
    }

    /// Collaborators described by the configuration
    pub fn build_gateways(config: &Config) -> Result<Gateways> {
        let mut gateways = Gateways::builtin(Arc::new(RasterRenderer::new(&config.symbol_dir)));

        // The built-in rules are English only
        let language = resolve_language_or_default(&config.language);
        if language != DEFAULT_LANGUAGE {
            info!(
                "No built-in morphology for {}, words are looked up as written",
                get_language_name(&language).unwrap_or(language.clone())
            );
            gateways = gateways.with_morphology(Arc::new(IdentityMorphology));
        }

        if let Some(path) = &config.thesaurus_path {
            let thesaurus = Thesaurus::load(path)
                .with_context(|| format!("Failed to load thesaurus: {:?}", path))?;
            gateways = gateways.with_synonyms(Arc::new(thesaurus));
        }
        if let Some(path) = &config.inflection_path {
            let table = InflectionTable::load(path)
                .with_context(|| format!("Failed to load inflection table: {:?}", path))?;
            gateways = gateways.with_morphology(Arc::new(table));
        }
        if config.translation.choose_definitions {
            gateways = gateways.with_chooser(Arc::new(ConsoleChooser));
        }
        Ok(gateways)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn choices(&self) -> &DefinitionChoices {
        &self.choices
    }

    /// A fresh session sharing this run's lexicon and definition choices
    pub fn session(&self) -> Result<TranslationSession> {
        let session = TranslationSession::new(
            Arc::clone(&self.lexicon),
            self.gateways.clone(),
            self.config.session_settings(),
        )?;
        Ok(session.with_choices(self.choices.clone()))
    }

    /// Translate a string into a document
    pub fn translate_text(&self, text: &str, title: Option<&str>) -> Result<Document> {
        Ok(self.session()?.translate(text, title))
    }

    fn job(&self, input_file: PathBuf) -> FileJob {
        let output_dir = FileManager::generate_output_dir(&input_file, &self.config.output.output_dir);
        FileJob {
            input_file,
            output_dir,
            lexicon: Arc::clone(&self.lexicon),
            gateways: self.gateways.clone(),
            settings: self.config.session_settings(),
            choices: self.choices.clone(),
        }
    }

    /// Whether `input_file` already has rendered pages
    fn is_translated(&self, input_file: &Path) -> bool {
        let output_dir = FileManager::generate_output_dir(input_file, &self.config.output.output_dir);
        PngDirectorySink::new(&output_dir, &FileManager::document_stem(input_file))
            .page_path(1)
            .exists()
    }

    /// Translate one text file; `None` when skipped because pages exist
    pub async fn run(&self, input_file: PathBuf, force_overwrite: bool) -> Result<Option<DocumentHandle>> {
        let start_time = std::time::Instant::now();

        if !FileManager::file_exists(&input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }
        if self.is_translated(&input_file) && !force_overwrite {
            warn!("Skipping file, pages already exist (use -f to force overwrite)");
            return Ok(None);
        }

        let job = self.job(input_file);
        let handle = tokio::task::spawn_blocking(move || translate_file(job))
            .await
            .context("Translation task panicked")??;

        info!(
            "Translation completed in {}.",
            Self::format_duration(start_time.elapsed())
        );
        Ok(Some(handle))
    }

    /// Translate every text file below `input_dir`.
    ///
    /// Files are translated concurrently, each with its own session. Files
    /// that already have pages are skipped unless `force_overwrite` is set.
    pub async fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<FolderSummary> {
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }
        let text_files = FileManager::find_files(&input_dir, TEXT_EXTENSION)?;
        if text_files.is_empty() {
            return Err(anyhow!("No text files found in directory: {:?}", input_dir));
        }

        let folder_pb = ProgressBar::new(text_files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));
        folder_pb.set_message("Translating files");

        // Console prompts from concurrent documents would interleave
        let workers = if self.config.translation.choose_definitions {
            1
        } else {
            std::thread::available_parallelism().map_or(4, |n| n.get())
        };
        let semaphore = Arc::new(Semaphore::new(workers));

        let mut summary = FolderSummary::default();
        let mut tasks = JoinSet::new();
        for text_file in text_files {
            if self.is_translated(&text_file) && !force_overwrite {
                warn!("Skipping {:?}, pages already exist (use -f to force overwrite)", text_file);
                summary.skipped += 1;
                folder_pb.inc(1);
                continue;
            }

            let permit = Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .context("Worker pool closed")?;
            let job = self.job(text_file);
            tasks.spawn_blocking(move || {
                let _permit = permit;
                let name = job.input_file.display().to_string();
                (name, translate_file(job))
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(handle))) => {
                    summary.processed += 1;
                    folder_pb.set_message(format!("Wrote {}", handle.location.display()));
                }
                Ok((name, Err(e))) => {
                    error!("Error processing file {}: {:#}", name, e);
                    summary.failed += 1;
                }
                Err(e) => {
                    error!("Translation task failed: {}", e);
                    summary.failed += 1;
                }
            }
            folder_pb.inc(1);
        }
        folder_pb.finish_with_message("Folder processing complete");

        info!(
            "Folder processing completed: {} processed, {} skipped, {} errors in {}",
            summary.processed,
            summary.skipped,
            summary.failed,
            Self::format_duration(start_time.elapsed())
        );
        Ok(summary)
    }

    /// Draw a legend of `words` and write it as a PNG
    pub fn write_alphabet(&self, words: &[String], columns: usize, output_file: &Path) -> Result<PathBuf> {
        if words.is_empty() {
            return Err(anyhow!("No words given for the alphabet"));
        }
        let sheet = self.session()?.draw_alphabet(words, columns);

        if let Some(parent) = output_file.parent().filter(|p| !p.as_os_str().is_empty()) {
            FileManager::ensure_dir(parent)?;
        }
        sheet
            .image()
            .save_with_format(output_file, image::ImageFormat::Png)
            .with_context(|| format!("Failed to write alphabet: {:?}", output_file))?;

        info!("Success: {}", output_file.display());
        Ok(output_file.to_path_buf())
    }

    // Format duration in a human-readable format
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}

/// Translate one file on the current thread and write its pages
fn translate_file(job: FileJob) -> Result<DocumentHandle> {
    let text = FileManager::read_text(&job.input_file)?;
    let mut session = TranslationSession::new(job.lexicon, job.gateways, job.settings)?
        .with_choices(job.choices);
    let document = session.translate(&text, None);

    let mut sink = PngDirectorySink::new(&job.output_dir, &FileManager::document_stem(&job.input_file));
    let handle = sink.emit(&document)?;
    info!("Success: {}", handle.location.display());
    Ok(handle)
}
