use crate::config::AcquireConfig;
use crate::error::AcquireError;
use crate::extract;
use crate::fetch::ImageFetcher;
use crate::http;
use crate::locate::ImageLocator;
use crate::normalize;
use crate::pacing::Pacer;
use crate::roster::RosterSource;
use crate::storage::ImageStore;
use anyhow::Result;
use reciter_model::{Outcome, PipelineRun, Reciter};
use std::path::PathBuf;

/// Acquire images for every reciter in the roster using `config`.
///
/// Provisions the images directory, fetches the roster, then searches,
/// downloads, and paces one reciter at a time. Reciters whose image file
/// already exists are skipped without any network traffic.
pub async fn acquire(config: &AcquireConfig) -> Result<PipelineRun> {
    let pipeline = Pipeline::from_config(config)?;
    pipeline.run().await
}

/// The acquisition orchestrator.
pub struct Pipeline {
    roster: RosterSource,
    locator: ImageLocator,
    fetcher: ImageFetcher,
    pacer: Pacer,
    qualifier: Option<String>,
    output_dir: PathBuf,
    limit: Option<usize>,
}

impl Pipeline {
    /// Wire up all components from configuration. Fails on invalid
    /// configuration only; nothing touches the network or filesystem here.
    pub fn from_config(config: &AcquireConfig) -> Result<Self, AcquireError> {
        config.validate()?;

        let client = http::build_client(&config.user_agent, config.timeout)?;
        let extractor = extract::build_extractor(config.extractor, &config.thumbnail_pattern)?;

        Ok(Self {
            roster: RosterSource::new(client.clone(), &config.roster_url, &config.language)?,
            locator: ImageLocator::new(client.clone(), &config.search_url, extractor)?,
            fetcher: ImageFetcher::new(client),
            pacer: Pacer::new(config.pause_min, config.pause_max)?,
            qualifier: config.effective_qualifier().map(str::to_string),
            output_dir: config.output_dir.clone(),
            limit: config.limit,
        })
    }

    pub fn roster(&self) -> &RosterSource {
        &self.roster
    }

    pub fn locator(&self) -> &ImageLocator {
        &self.locator
    }

    /// The search query used for a reciter name.
    pub fn query_for(&self, name: &str) -> String {
        normalize::build_query(self.qualifier.as_deref(), name)
    }

    /// Run the pipeline to the end of the roster.
    ///
    /// Only a failure to provision the images directory is an error; every
    /// remote failure becomes a per-reciter outcome.
    pub async fn run(&self) -> Result<PipelineRun> {
        let store = ImageStore::provision(&self.output_dir)?;
        tracing::info!(path = %store.dir().display(), "Saving images");

        let reciters = self.roster.fetch_reciters().await;
        tracing::info!(count = reciters.len(), "Found {} reciters", reciters.len());

        let mut run = PipelineRun::new(reciters.len());
        for reciter in &reciters {
            if let Some(limit) = self.limit {
                if run.searched() >= limit {
                    tracing::info!(limit, "Search limit reached, stopping");
                    break;
                }
            }

            let outcome = self.process(&store, reciter, &run).await;
            if outcome.found_candidate() {
                self.pacer.pause().await;
                run.record_pause();
            }
            run.record(&outcome);
        }

        tracing::info!(
            skipped = run.skipped,
            saved = run.saved,
            failed = run.save_failed,
            not_found = run.not_found,
            "Finished: {run}"
        );
        Ok(run)
    }

    /// Drive one reciter to a terminal outcome.
    async fn process(&self, store: &ImageStore, reciter: &Reciter, run: &PipelineRun) -> Outcome {
        if store.is_satisfied(reciter) {
            tracing::debug!(id = %reciter.id, "Image already exists, skipping");
            return Outcome::Skipped;
        }

        tracing::info!(
            id = %reciter.id,
            "[{}/{}] Searching for {} ({})",
            run.searched() + 1,
            run.roster_size,
            reciter.name,
            reciter.id
        );

        let query = self.query_for(&reciter.name);
        let Some(candidate) = self.locator.locate(&query).await else {
            tracing::info!(id = %reciter.id, "No image found for {}", reciter.name);
            return Outcome::NotFound;
        };

        let path = store.path_for(reciter);
        match self.fetcher.download(&candidate, &path).await {
            Ok(bytes) => {
                tracing::info!(id = %reciter.id, bytes, "Saved: {}", reciter.image_file_name());
                Outcome::Saved { bytes }
            }
            Err(e) => {
                tracing::warn!(id = %reciter.id, url = %candidate, "Failed to download image: {e}");
                Outcome::SaveFailed
            }
        }
    }
}
