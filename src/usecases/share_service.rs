//! Share use case: native share when available, clipboard otherwise.
//!
//! - User cancel is silent (no notice)
//! - Any other failure becomes an error notice; nothing is retried

use crate::domain::{DomainError, Prediction, ShareContent, ShareDelivery, ShareOutcome};
use crate::ports::{ClipboardPort, Notice, NotifierPort, SharePort};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct ShareService {
    native: Option<Arc<dyn SharePort>>,
    clipboard: Arc<dyn ClipboardPort>,
    notifier: Arc<dyn NotifierPort>,
    origin: String,
}

impl ShareService {
    /// `native` is `None` when the platform has no share capability.
    pub fn new(
        native: Option<Arc<dyn SharePort>>,
        clipboard: Arc<dyn ClipboardPort>,
        notifier: Arc<dyn NotifierPort>,
        origin: impl Into<String>,
    ) -> Self {
        Self {
            native,
            clipboard,
            notifier,
            origin: origin.into(),
        }
    }

    pub fn content_for(&self, prediction: &Prediction) -> ShareContent {
        ShareContent::for_prediction(prediction, &self.origin)
    }

    /// Share `prediction`. Failures are reported through the notifier and
    /// returned so the caller can keep its state unchanged.
    pub async fn share(&self, prediction: &Prediction) -> Result<ShareDelivery, DomainError> {
        let content = self.content_for(prediction);

        let Some(native) = &self.native else {
            return self.copy_to_clipboard(&content).await;
        };

        match native.share(&content).await {
            Ok(ShareOutcome::Shared) => {
                info!(prediction_id = %prediction.id, "shared via native share");
                Ok(ShareDelivery::Native)
            }
            Ok(ShareOutcome::Cancelled) => {
                debug!(prediction_id = %prediction.id, "share cancelled by user");
                Ok(ShareDelivery::Cancelled)
            }
            Err(e) => {
                warn!(prediction_id = %prediction.id, error = %e, "native share failed");
                self.notifier.notify(Notice::error("Could not share"));
                Err(e)
            }
        }
    }

    async fn copy_to_clipboard(&self, content: &ShareContent) -> Result<ShareDelivery, DomainError> {
        match self.clipboard.copy_text(&content.clipboard_text()).await {
            Ok(()) => {
                self.notifier
                    .notify(Notice::success("Link copied to clipboard"));
                Ok(ShareDelivery::Clipboard)
            }
            Err(e) => {
                warn!(error = %e, "clipboard fallback failed");
                self.notifier.notify(Notice::error("Could not share"));
                Err(e)
            }
        }
    }
}
