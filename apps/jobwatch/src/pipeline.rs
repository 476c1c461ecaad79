//! One run: fetch every enabled board, normalize, filter, dedup against the
//! store, record what is new, then notify once.

use chrono::NaiveDate;
use tracing::{debug, error, info, warn};

use crate::filter::{evaluate, normalize, MatchCriteria};
use crate::models::posting::{RawPosting, SeenPosting};
use crate::notify::Notifier;
use crate::resume::ResumeProfile;
use crate::sources::{fetch_all, FetchContext, JobSource};
use crate::store::{DedupStore, StoreError};

/// Per-run counters, logged at the end of the run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub fetched: usize,
    pub malformed: usize,
    pub rejected: usize,
    pub already_seen: usize,
    pub inserted: usize,
    /// Postings handed to a notifier that reported success.
    pub notified: usize,
}

pub struct Pipeline<'a> {
    pub profile: &'a ResumeProfile,
    pub criteria: &'a MatchCriteria,
    pub store: &'a DedupStore,
    pub notifier: &'a dyn Notifier,
}

impl Pipeline<'_> {
    pub async fn run(
        &self,
        sources: &[Box<dyn JobSource>],
        ctx: &FetchContext,
    ) -> Result<RunSummary, StoreError> {
        let raw = fetch_all(sources, ctx).await;
        self.process(raw, ctx.today()).await
    }

    /// Everything after fetching. Store errors other than a duplicate key abort the run;
    /// postings recorded before the error stay recorded and are not notified.
    pub async fn process(
        &self,
        raw: Vec<RawPosting>,
        today: NaiveDate,
    ) -> Result<RunSummary, StoreError> {
        let mut summary = RunSummary {
            fetched: raw.len(),
            ..RunSummary::default()
        };
        let mut new_postings: Vec<SeenPosting> = Vec::new();

        for posting in raw {
            let source = posting.source;
            let input = match normalize(posting, today) {
                Ok(input) => input,
                Err(e) => {
                    warn!("Skipping malformed posting from {source}: {e}");
                    summary.malformed += 1;
                    continue;
                }
            };

            let accepted = match evaluate(input, self.profile, self.criteria) {
                Ok(accepted) => accepted,
                Err(rejection) => {
                    debug!("Rejected posting from {source}: {rejection}");
                    summary.rejected += 1;
                    continue;
                }
            };

            if self
                .store
                .exists(accepted.source_name, &accepted.source_id)
                .await?
            {
                debug!(
                    "Already seen {}/{}",
                    accepted.source_name, accepted.source_id
                );
                summary.already_seen += 1;
                continue;
            }

            match self.store.insert(&accepted).await {
                Ok(seen) => {
                    summary.inserted += 1;
                    new_postings.push(seen);
                }
                // Same key twice in one batch.
                Err(StoreError::DuplicateKey { .. }) => summary.already_seen += 1,
                Err(e) => return Err(e),
            }
        }

        if new_postings.is_empty() {
            info!("No new postings to report");
        } else {
            match self.notifier.send(&new_postings).await {
                Ok(()) => summary.notified = new_postings.len(),
                Err(e) => error!(
                    "Failed to send notification for {} postings: {e}",
                    new_postings.len()
                ),
            }
        }

        info!(
            fetched = summary.fetched,
            malformed = summary.malformed,
            rejected = summary.rejected,
            already_seen = summary.already_seen,
            inserted = summary.inserted,
            notified = summary.notified,
            "Run complete"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::posting::SourceName;
    use crate::notify::NotifyError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingNotifier {
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl RecordingNotifier {
        fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, postings: &[SeenPosting]) -> Result<(), NotifyError> {
            self.calls.lock().unwrap().push(
                postings
                    .iter()
                    .map(|p| p.posting.source_id.clone())
                    .collect(),
            );
            Ok(())
        }
    }

    struct FailingNotifier;

    #[async_trait]
    impl Notifier for FailingNotifier {
        async fn send(&self, _postings: &[SeenPosting]) -> Result<(), NotifyError> {
            let address_err = "broken".parse::<lettre::Address>().unwrap_err();
            Err(NotifyError::Address(address_err))
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn profile() -> ResumeProfile {
        ResumeProfile::from_keywords(["python", "remote", "ngo"])
    }

    fn save_the_children(source_id: &str) -> RawPosting {
        RawPosting {
            source_id: Some(source_id.to_string()),
            title: Some("Remote Python Developer at Save The Children".to_string()),
            company: Some("Save The Children".to_string()),
            location: Some("Remote".to_string()),
            description: Some("ngo work, python required".to_string()),
            ..RawPosting::new(SourceName::UnJobs)
        }
    }

    fn criteria(minimum_match_count: u32) -> MatchCriteria {
        MatchCriteria {
            minimum_match_count,
            ..MatchCriteria::default()
        }
    }

    #[tokio::test]
    async fn test_accepted_posting_is_recorded_and_notified() {
        let store = DedupStore::in_memory().await.unwrap();
        let notifier = RecordingNotifier::default();
        let (profile, criteria) = (profile(), criteria(2));
        let pipeline = Pipeline {
            profile: &profile,
            criteria: &criteria,
            store: &store,
            notifier: &notifier,
        };

        let summary = pipeline
            .process(vec![save_the_children("v-1")], today())
            .await
            .unwrap();

        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.notified, 1);
        assert_eq!(notifier.calls(), vec![vec!["v-1".to_string()]]);
        assert!(store.exists(SourceName::UnJobs, "v-1").await.unwrap());
    }

    #[tokio::test]
    async fn test_second_run_sends_nothing() {
        let store = DedupStore::in_memory().await.unwrap();
        let notifier = RecordingNotifier::default();
        let (profile, criteria) = (profile(), criteria(2));
        let pipeline = Pipeline {
            profile: &profile,
            criteria: &criteria,
            store: &store,
            notifier: &notifier,
        };
        let batch = || vec![save_the_children("v-1"), save_the_children("v-2")];

        pipeline.process(batch(), today()).await.unwrap();
        let second = pipeline.process(batch(), today()).await.unwrap();

        assert_eq!(second.inserted, 0);
        assert_eq!(second.already_seen, 2);
        assert_eq!(notifier.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_stored_posting_is_never_notified() {
        let store = DedupStore::in_memory().await.unwrap();
        let notifier = RecordingNotifier::default();
        let (profile, criteria) = (profile(), criteria(2));
        let pipeline = Pipeline {
            profile: &profile,
            criteria: &criteria,
            store: &store,
            notifier: &notifier,
        };
        pipeline
            .process(vec![save_the_children("old")], today())
            .await
            .unwrap();

        pipeline
            .process(
                vec![save_the_children("old"), save_the_children("new")],
                today(),
            )
            .await
            .unwrap();

        let calls = notifier.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1], vec!["new".to_string()]);
    }

    #[tokio::test]
    async fn test_duplicate_within_one_batch_is_recorded_once() {
        let store = DedupStore::in_memory().await.unwrap();
        let notifier = RecordingNotifier::default();
        let (profile, criteria) = (profile(), criteria(2));
        let pipeline = Pipeline {
            profile: &profile,
            criteria: &criteria,
            store: &store,
            notifier: &notifier,
        };

        let summary = pipeline
            .process(
                vec![save_the_children("same"), save_the_children("same")],
                today(),
            )
            .await
            .unwrap();

        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.already_seen, 1);
        assert_eq!(notifier.calls(), vec![vec!["same".to_string()]]);
    }

    #[tokio::test]
    async fn test_below_minimum_is_neither_recorded_nor_notified() {
        let store = DedupStore::in_memory().await.unwrap();
        let notifier = RecordingNotifier::default();
        let (profile, criteria) = (profile(), criteria(4));
        let pipeline = Pipeline {
            profile: &profile,
            criteria: &criteria,
            store: &store,
            notifier: &notifier,
        };

        let summary = pipeline
            .process(vec![save_the_children("v-1")], today())
            .await
            .unwrap();

        assert_eq!(summary.rejected, 1);
        assert_eq!(store.count().await.unwrap(), 0);
        assert!(notifier.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_title_and_description_are_skipped() {
        let store = DedupStore::in_memory().await.unwrap();
        let notifier = RecordingNotifier::default();
        let (profile, criteria) = (profile(), criteria(2));
        let pipeline = Pipeline {
            profile: &profile,
            criteria: &criteria,
            store: &store,
            notifier: &notifier,
        };
        let empty = RawPosting {
            source_id: Some("blank".to_string()),
            title: Some("   ".to_string()),
            description: Some(String::new()),
            ..RawPosting::new(SourceName::Wellfound)
        };

        let summary = pipeline.process(vec![empty], today()).await.unwrap();

        assert_eq!(summary.malformed, 1);
        assert_eq!(store.count().await.unwrap(), 0);
        assert!(notifier.calls().is_empty());
    }

    #[tokio::test]
    async fn test_send_failure_keeps_postings_recorded() {
        let store = DedupStore::in_memory().await.unwrap();
        let (profile, criteria) = (profile(), criteria(2));
        let pipeline = Pipeline {
            profile: &profile,
            criteria: &criteria,
            store: &store,
            notifier: &FailingNotifier,
        };

        let summary = pipeline
            .process(vec![save_the_children("v-1")], today())
            .await
            .unwrap();

        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.notified, 0);
        assert!(store.exists(SourceName::UnJobs, "v-1").await.unwrap());
    }
}
