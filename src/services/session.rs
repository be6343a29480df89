use crate::core::{
    DetailOutcome, FilterField, ListOutcome, ListRequest, PageSizes, SortKey, ViewController,
    ViewSnapshot,
};
use crate::services::backend::DataSource;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Runs view intents against a data source
///
/// The controller lock is only held to issue a request or to apply its
/// result, never across a fetch. Intents therefore interleave freely, and
/// the controller's generation check drops whichever results were
/// overtaken by a newer request.
pub struct ViewSession {
    controller: Mutex<ViewController>,
    source: Arc<dyn DataSource>,
}

impl ViewSession {
    pub fn new(source: Arc<dyn DataSource>, sizes: PageSizes) -> Self {
        Self {
            controller: Mutex::new(ViewController::new(sizes)),
            source,
        }
    }

    pub async fn snapshot(&self) -> ViewSnapshot {
        self.controller.lock().await.snapshot()
    }

    /// Reload the current page
    pub async fn refresh(&self) -> Option<ListOutcome> {
        let request = self.controller.lock().await.refresh();
        self.run_list(Some(request)).await
    }

    pub async fn go_to_page(&self, n: u64) -> Option<ListOutcome> {
        let request = self.controller.lock().await.go_to_page(n);
        self.run_list(request).await
    }

    pub async fn go_to_page_input(&self, input: &str) -> Option<ListOutcome> {
        let request = self.controller.lock().await.go_to_page_input(input);
        self.run_list(request).await
    }

    pub async fn next(&self) -> Option<ListOutcome> {
        let request = self.controller.lock().await.next();
        self.run_list(request).await
    }

    pub async fn prev(&self) -> Option<ListOutcome> {
        let request = self.controller.lock().await.prev();
        self.run_list(request).await
    }

    pub async fn toggle_all_mode(&self) -> Option<ListOutcome> {
        let request = self.controller.lock().await.toggle_all_mode();
        self.run_list(Some(request)).await
    }

    pub async fn set_filter(&self, field: FilterField, value: String) {
        self.controller.lock().await.set_filter(field, value);
    }

    pub async fn clear_filters(&self) {
        self.controller.lock().await.clear_filters();
    }

    pub async fn sort_by(&self, key: SortKey) {
        self.controller.lock().await.sort_by(key);
    }

    pub async fn select_user(&self, user_id: &str) -> DetailOutcome {
        let request = self.controller.lock().await.select_user(user_id);

        let result = self.source.fetch_user_detail(&request.user_id).await;

        self.controller
            .lock()
            .await
            .apply_detail_result(&request, result)
    }

    pub async fn go_back(&self) -> bool {
        self.controller.lock().await.go_back()
    }

    /// Fetch and apply list requests until no follow-up is needed
    async fn run_list(&self, request: Option<ListRequest>) -> Option<ListOutcome> {
        let mut pending = request;
        let mut last = None;

        while let Some(request) = pending.take() {
            tracing::debug!(
                "Fetching page {} (size {}, generation {})",
                request.page,
                request.page_size,
                request.generation
            );

            let result = self.source.fetch_page(request.page, request.page_size).await;
            let outcome = self
                .controller
                .lock()
                .await
                .apply_list_result(request, result);

            if let ListOutcome::Applied { refetch } = outcome {
                pending = refetch;
            }
            last = Some(outcome);
        }

        last
    }
}
