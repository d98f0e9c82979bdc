use std::fmt;

/// Terminal state of one reciter within a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// An image file already existed; no requests were made.
    Skipped,
    /// A candidate was found and its bytes were written.
    Saved { bytes: u64 },
    /// A candidate was found but the download or write failed.
    SaveFailed,
    /// The search produced no candidate.
    NotFound,
}

impl Outcome {
    /// Whether the locator produced a candidate for this reciter.
    pub fn found_candidate(&self) -> bool {
        matches!(self, Outcome::Saved { .. } | Outcome::SaveFailed)
    }
}

/// Counters for a single invocation of the pipeline.
///
/// Never persisted; the images directory is the only durable state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineRun {
    /// Reciters in the roster.
    pub roster_size: usize,
    /// Reciters that reached a terminal outcome.
    pub considered: usize,
    pub skipped: usize,
    pub saved: usize,
    pub save_failed: usize,
    pub not_found: usize,
    /// Pacing pauses issued between searches.
    pub pauses: usize,
}

impl PipelineRun {
    pub fn new(roster_size: usize) -> Self {
        Self {
            roster_size,
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: &Outcome) {
        self.considered += 1;
        match outcome {
            Outcome::Skipped => self.skipped += 1,
            Outcome::Saved { .. } => self.saved += 1,
            Outcome::SaveFailed => self.save_failed += 1,
            Outcome::NotFound => self.not_found += 1,
        }
    }

    pub fn record_pause(&mut self) {
        self.pauses += 1;
    }

    /// Reciters for which a search was issued.
    pub fn searched(&self) -> usize {
        self.saved + self.save_failed + self.not_found
    }
}

impl fmt::Display for PipelineRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} reciters: {} skipped, {} saved, {} failed, {} not found",
            self.roster_size, self.skipped, self.saved, self.save_failed, self.not_found
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_each_outcome() {
        let mut run = PipelineRun::new(4);
        run.record(&Outcome::Skipped);
        run.record(&Outcome::Saved { bytes: 10 });
        run.record(&Outcome::SaveFailed);
        run.record(&Outcome::NotFound);

        assert_eq!(run.considered, 4);
        assert_eq!(run.skipped, 1);
        assert_eq!(run.saved, 1);
        assert_eq!(run.save_failed, 1);
        assert_eq!(run.not_found, 1);
        assert_eq!(run.searched(), 3);
        assert_eq!(run.pauses, 0);
    }

    #[test]
    fn test_found_candidate() {
        assert!(Outcome::Saved { bytes: 1 }.found_candidate());
        assert!(Outcome::SaveFailed.found_candidate());
        assert!(!Outcome::NotFound.found_candidate());
        assert!(!Outcome::Skipped.found_candidate());
    }

    #[test]
    fn test_summary_line() {
        let mut run = PipelineRun::new(2);
        run.record(&Outcome::Skipped);
        run.record(&Outcome::Saved { bytes: 3 });
        assert_eq!(
            run.to_string(),
            "2 reciters: 1 skipped, 1 saved, 0 failed, 0 not found"
        );
    }
}
