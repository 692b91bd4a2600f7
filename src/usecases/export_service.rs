//! Export use case: render a prediction card to an image file for download.

use crate::domain::share::export_file_name;
use crate::domain::view_state::ExportState;
use crate::domain::{DomainError, Prediction};
use crate::ports::{CardExportPort, Notice, NotifierPort};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::fs;
use tracing::{error, info};

/// Clears the generating flag when dropped, including when the export
/// future is dropped mid-flight.
struct GeneratingGuard<'a>(&'a AtomicBool);

impl Drop for GeneratingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct ExportService {
    exporter: Arc<dyn CardExportPort>,
    notifier: Arc<dyn NotifierPort>,
    export_dir: PathBuf,
    generating: AtomicBool,
}

impl ExportService {
    pub fn new(
        exporter: Arc<dyn CardExportPort>,
        notifier: Arc<dyn NotifierPort>,
        export_dir: PathBuf,
    ) -> Self {
        Self {
            exporter,
            notifier,
            export_dir,
            generating: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> ExportState {
        ExportState {
            generating: self.generating.load(Ordering::SeqCst),
        }
    }

    /// Export the share card for `prediction`. Returns the written file.
    /// A second request while one is running is rejected.
    pub async fn export(&self, prediction: &Prediction) -> Result<PathBuf, DomainError> {
        if self.generating.swap(true, Ordering::SeqCst) {
            return Err(DomainError::Export("export already in progress".into()));
        }
        let guard = GeneratingGuard(&self.generating);
        let result = self.export_inner(prediction).await;
        drop(guard);

        match &result {
            Ok(path) => {
                info!(prediction_id = %prediction.id, path = %path.display(), "card exported");
                self.notifier.notify(Notice::success("Image downloaded!"));
            }
            Err(e) => {
                error!(prediction_id = %prediction.id, error = %e, "card export failed");
                self.notifier.notify(Notice::error("Could not create image"));
            }
        }
        result
    }

    async fn export_inner(&self, prediction: &Prediction) -> Result<PathBuf, DomainError> {
        fs::create_dir_all(&self.export_dir)
            .await
            .map_err(|e| DomainError::Export(format!("create export dir: {}", e)))?;
        let dest = self.export_dir.join(export_file_name(prediction, "png"));
        self.exporter.export_card(prediction, &dest).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PredictionStatus;
    use crate::domain::testing::{expert, prediction, topic};
    use crate::ports::NoticeLevel;
    use crate::usecases::share_service::tests::RecordingNotifier;
    use std::path::Path;

    struct FakeExporter {
        fail: bool,
    }

    /// Never finishes.
    struct StalledExporter;

    #[async_trait::async_trait]
    impl CardExportPort for StalledExporter {
        async fn export_card(
            &self,
            _prediction: &Prediction,
            _dest: &Path,
        ) -> Result<PathBuf, DomainError> {
            std::future::pending::<()>().await;
            Err(DomainError::Export("unreachable".into()))
        }
    }

    #[async_trait::async_trait]
    impl CardExportPort for FakeExporter {
        async fn export_card(
            &self,
            _prediction: &Prediction,
            dest: &Path,
        ) -> Result<PathBuf, DomainError> {
            if self.fail {
                return Err(DomainError::Export("out of memory".into()));
            }
            fs::write(dest, b"png")
                .await
                .map_err(|e| DomainError::Export(e.to_string()))?;
            Ok(dest.to_path_buf())
        }
    }

    fn sample() -> Prediction {
        prediction(
            "p7",
            &expert("e1", "Anna"),
            &topic("t1", "Economy"),
            PredictionStatus::Fulfilled,
        )
    }

    #[tokio::test]
    async fn test_export_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let notifier = Arc::new(RecordingNotifier::default());
        let svc = ExportService::new(
            Arc::new(FakeExporter { fail: false }),
            notifier.clone(),
            dir.path().join("cards"),
        );

        let path = svc.export(&sample()).await.unwrap();
        assert_eq!(path, dir.path().join("cards").join("prediction-p7.png"));
        assert!(path.exists());
        assert_eq!(notifier.levels(), vec![NoticeLevel::Success]);
        assert!(!svc.state().generating);
    }

    #[tokio::test]
    async fn test_export_failure_notifies_and_resets_flag() {
        let dir = tempfile::tempdir().unwrap();
        let notifier = Arc::new(RecordingNotifier::default());
        let svc = ExportService::new(
            Arc::new(FakeExporter { fail: true }),
            notifier.clone(),
            dir.path().to_path_buf(),
        );

        assert!(matches!(
            svc.export(&sample()).await,
            Err(DomainError::Export(_))
        ));
        assert_eq!(notifier.levels(), vec![NoticeLevel::Error]);
        assert!(!svc.state().generating);

        // Re-triggering after a failure works.
        assert!(svc.export(&sample()).await.is_err());
        assert_eq!(notifier.levels().len(), 2);
    }

    #[tokio::test]
    async fn test_dropped_export_clears_flag() {
        let dir = tempfile::tempdir().unwrap();
        let notifier = Arc::new(RecordingNotifier::default());
        let svc = ExportService::new(
            Arc::new(StalledExporter),
            notifier.clone(),
            dir.path().to_path_buf(),
        );

        let p = sample();
        let timed_out =
            tokio::time::timeout(std::time::Duration::from_millis(50), svc.export(&p)).await;
        assert!(timed_out.is_err());
        assert!(!svc.state().generating);
        assert!(notifier.levels().is_empty());
    }
}
