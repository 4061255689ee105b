//! The product form store: single source of truth for the draft and its
//! derived UI state, plus submission orchestration.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use skuforge_products::{
    CreatedProduct, FormState, ProductSubmission, ValidationErrors, validate_draft,
};

use crate::config::{DEFAULT_PRICE_UNIT, SubmitterConfig};
use crate::events::{Notifier, StoreEvent, Subscription};
use crate::preview::{ObjectUrlResolver, PreviewResolver};
use crate::submit::{HttpSubmitter, ProductSubmitter, SubmitError};

pub const SUCCESS_MESSAGE: &str = "Product created successfully!";
pub const FAILURE_MESSAGE: &str = "Failed to create product. Please try again.";

/// A state transition: a full replacement or a function of the previous draft.
///
/// The function runs while the store is locked. It must not call back into
/// the store.
pub enum Update<'a> {
    Replace(FormState),
    With(Box<dyn FnOnce(&FormState) -> FormState + 'a>),
}

impl<'a> Update<'a> {
    pub fn with(f: impl FnOnce(&FormState) -> FormState + 'a) -> Self {
        Update::With(Box::new(f))
    }

    fn apply(self, prev: &FormState) -> FormState {
        match self {
            Update::Replace(next) => next,
            Update::With(f) => f(prev),
        }
    }
}

impl From<FormState> for Update<'_> {
    fn from(value: FormState) -> Self {
        Update::Replace(value)
    }
}

/// Submission status shown next to the form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormStatus {
    pub is_loading: bool,
    pub error: Option<String>,
    pub success_message: Option<String>,
}

/// Result of [`FormStore::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The draft failed validation; nothing was sent.
    Invalid(ValidationErrors),
    /// A submission is already in flight; nothing was sent.
    Busy,
    /// The endpoint created the product and the draft was reset.
    Created(CreatedProduct),
    /// The endpoint call failed; the draft is unchanged.
    Failed(SubmitError),
}

#[derive(Debug, Default)]
struct StoreState {
    draft: FormState,
    validation_errors: ValidationErrors,
    status: FormStatus,
}

/// Observable container for a product draft.
///
/// Every change goes through [`FormStore::update_state`] (the editing
/// helpers in `editor.rs` are thin wrappers over it). Reads return
/// snapshots. Share the store with `Arc`.
pub struct FormStore<S> {
    state: Mutex<StoreState>,
    submitter: S,
    preview: Arc<dyn PreviewResolver>,
    price_unit: String,
    notifier: Notifier<StoreEvent>,
}

impl<S> FormStore<S> {
    /// Empty draft, default preview resolver and price unit.
    pub fn new(submitter: S) -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            submitter,
            preview: Arc::new(ObjectUrlResolver::default()),
            price_unit: DEFAULT_PRICE_UNIT.to_string(),
            notifier: Notifier::default(),
        }
    }

    pub fn with_preview_resolver(mut self, resolver: Arc<dyn PreviewResolver>) -> Self {
        self.preview = resolver;
        self
    }

    pub fn with_price_unit(mut self, price_unit: impl Into<String>) -> Self {
        self.price_unit = price_unit.into();
        self
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        // Every critical section leaves the state whole, so a panic elsewhere
        // does not make it unreadable.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn preview_resolver(&self) -> &dyn PreviewResolver {
        self.preview.as_ref()
    }

    pub fn subscribe(&self) -> Subscription<StoreEvent> {
        self.notifier.subscribe()
    }

    /// Snapshot of the current draft.
    pub fn state(&self) -> FormState {
        self.lock().draft.clone()
    }

    /// Apply `update` atomically and notify subscribers.
    pub fn update_state<'a>(&self, update: impl Into<Update<'a>>) {
        let update = update.into();
        {
            let mut st = self.lock();
            let next = update.apply(&st.draft);
            st.draft = next;
        }
        self.notifier.publish(StoreEvent::StateChanged);
    }

    /// Edit a copy of the draft in place; shorthand for an [`Update::With`].
    pub fn modify(&self, f: impl FnOnce(&mut FormState)) {
        self.update_state(Update::with(|prev: &FormState| {
            let mut next = prev.clone();
            f(&mut next);
            next
        }));
    }

    /// Recompute, store and return the validation errors for the draft.
    pub fn validate(&self) -> ValidationErrors {
        let errors = {
            let mut st = self.lock();
            let errors = validate_draft(&st.draft);
            st.validation_errors = errors.clone();
            errors
        };
        self.notifier.publish(StoreEvent::ValidationChanged);
        errors
    }

    pub fn validation_errors(&self) -> ValidationErrors {
        self.lock().validation_errors.clone()
    }

    pub fn set_validation_errors(&self, errors: ValidationErrors) {
        self.lock().validation_errors = errors;
        self.notifier.publish(StoreEvent::ValidationChanged);
    }

    pub fn status(&self) -> FormStatus {
        self.lock().status.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().status.is_loading
    }

    pub fn error(&self) -> Option<String> {
        self.lock().status.error.clone()
    }

    pub fn success_message(&self) -> Option<String> {
        self.lock().status.success_message.clone()
    }

    pub fn set_loading(&self, is_loading: bool) {
        self.update_status(|s| s.is_loading = is_loading);
    }

    pub fn set_error(&self, error: Option<String>) {
        self.update_status(|s| s.error = error);
    }

    pub fn set_success_message(&self, message: Option<String>) {
        self.update_status(|s| s.success_message = message);
    }

    fn update_status(&self, f: impl FnOnce(&mut FormStatus)) {
        f(&mut self.lock().status);
        self.notifier.publish(StoreEvent::StatusChanged);
    }
}

impl FormStore<HttpSubmitter> {
    /// Store that submits over HTTP with the endpoint, timeout and price
    /// unit taken from `config`.
    pub fn from_config(config: &SubmitterConfig) -> Result<Self, SubmitError> {
        let submitter = HttpSubmitter::new(config)?;
        Ok(Self::new(submitter).with_price_unit(config.price_unit.clone()))
    }
}

impl<S: ProductSubmitter> FormStore<S> {
    /// Validate and, if the draft is submittable, send it.
    ///
    /// On success the draft is reset and the success message set; on failure
    /// the draft is kept for a retry and the error message set. The loading
    /// flag is cleared either way, including when this future is dropped
    /// before the endpoint answers.
    pub async fn submit(&self) -> SubmitOutcome {
        let payload = {
            let mut st = self.lock();
            let errors = validate_draft(&st.draft);
            st.validation_errors = errors.clone();

            if !errors.is_empty() {
                drop(st);
                tracing::debug!(
                    fields = ?errors.fields().map(|f| f.as_str()).collect::<Vec<_>>(),
                    "draft failed validation; not submitting"
                );
                self.notifier.publish(StoreEvent::ValidationChanged);
                return SubmitOutcome::Invalid(errors);
            }

            if st.status.is_loading {
                drop(st);
                tracing::debug!("submission already in flight");
                self.notifier.publish(StoreEvent::ValidationChanged);
                return SubmitOutcome::Busy;
            }

            st.status = FormStatus {
                is_loading: true,
                error: None,
                success_message: None,
            };
            ProductSubmission::from_draft(&st.draft, &self.price_unit)
        };
        self.notifier.publish(StoreEvent::ValidationChanged);
        self.notifier.publish(StoreEvent::StatusChanged);

        tracing::info!(
            title = %payload.title,
            media = payload.media.len(),
            skus = payload.sku.len(),
            "submitting product"
        );

        let guard = LoadingGuard { store: self };
        let result = self.submitter.submit(&payload).await;

        let outcome = {
            let mut st = self.lock();
            st.status.is_loading = false;
            match result {
                Ok(created) => {
                    tracing::info!(product_id = %created.id, "product created");
                    st.status.success_message = Some(SUCCESS_MESSAGE.to_string());
                    st.draft = FormState::default();
                    SubmitOutcome::Created(created)
                }
                Err(err) => {
                    tracing::warn!(error = %err, "product submission failed");
                    st.status.error = Some(FAILURE_MESSAGE.to_string());
                    SubmitOutcome::Failed(err)
                }
            }
        };
        guard.disarm();

        if matches!(outcome, SubmitOutcome::Created(_)) {
            self.notifier.publish(StoreEvent::StateChanged);
        }
        self.notifier.publish(StoreEvent::StatusChanged);
        outcome
    }
}

/// Clears the loading flag if a submission future is dropped mid-flight.
struct LoadingGuard<'a, S> {
    store: &'a FormStore<S>,
}

impl<S> LoadingGuard<'_, S> {
    fn disarm(self) {
        std::mem::forget(self);
    }
}

impl<S> Drop for LoadingGuard<'_, S> {
    fn drop(&mut self) {
        tracing::warn!("submission abandoned before the endpoint answered");
        self.store.set_loading(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::Utc;
    use skuforge_core::ProductId;
    use skuforge_products::{
        FormField, ImageFile, ProductImage, ShippingMethod, Variant, generate_combinations,
    };
    use tokio::sync::Notify;

    /// Records payloads; succeeds or fails as configured.
    #[derive(Default)]
    struct FakeSubmitter {
        calls: AtomicUsize,
        payloads: Mutex<Vec<ProductSubmission>>,
        fail_with: Option<SubmitError>,
        gate: Option<Arc<Notify>>,
    }

    impl FakeSubmitter {
        fn failing(err: SubmitError) -> Self {
            Self {
                fail_with: Some(err),
                ..Self::default()
            }
        }

        fn gated(gate: Arc<Notify>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::default()
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ProductSubmitter for FakeSubmitter {
        async fn submit(&self, payload: &ProductSubmission) -> Result<CreatedProduct, SubmitError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.payloads.lock().unwrap().push(payload.clone());
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            match &self.fail_with {
                Some(err) => Err(err.clone()),
                None => Ok(CreatedProduct::new(ProductId::new(), payload.clone(), Utc::now())),
            }
        }
    }

    fn complete_draft() -> FormState {
        let variants = vec![
            Variant::with_properties("Size", ["S", "M"]),
            Variant::with_properties("Color", ["Red"]),
        ];
        FormState {
            title: "Linen Shirt".to_string(),
            description: "Breathable summer shirt".to_string(),
            collection: "642ecc12db889ecd88d81dda".to_string(),
            shipping_method: Some(ShippingMethod::Warehouse),
            images: vec![ProductImage::new(
                ImageFile::new("front.jpg", None, vec![1u8, 2, 3]),
                "blob:front",
            )],
            variant_combinations: generate_combinations(&variants),
            variants,
        }
    }

    #[test]
    fn starts_empty() {
        let store = FormStore::new(FakeSubmitter::default());
        assert_eq!(store.state(), FormState::default());
        assert!(store.validation_errors().is_empty());
        assert_eq!(store.status(), FormStatus::default());
    }

    #[test]
    fn update_state_accepts_replacement_and_function() {
        let store = FormStore::new(FakeSubmitter::default());

        store.update_state(complete_draft());
        assert_eq!(store.state(), complete_draft());

        store.update_state(Update::with(|prev: &FormState| FormState {
            title: format!("{} v2", prev.title),
            ..prev.clone()
        }));
        assert_eq!(store.state().title, "Linen Shirt v2");
        assert_eq!(store.state().description, "Breathable summer shirt");
    }

    #[test]
    fn update_state_notifies_subscribers() {
        let store = FormStore::new(FakeSubmitter::default());
        let sub = store.subscribe();

        store.modify(|d| d.title = "Hat".to_string());
        store.validate();

        assert_eq!(
            sub.drain(),
            vec![StoreEvent::StateChanged, StoreEvent::ValidationChanged]
        );
    }

    #[test]
    fn snapshots_are_detached_from_the_store() {
        let store = FormStore::new(FakeSubmitter::default());
        let mut snapshot = store.state();
        snapshot.title = "changed locally".to_string();
        assert_eq!(store.state().title, "");
    }

    #[test]
    fn validate_replaces_previous_errors() {
        let store = FormStore::new(FakeSubmitter::default());
        assert_eq!(store.validate().len(), 6);

        store.update_state(complete_draft());
        assert!(store.validate().is_empty());
        assert!(store.validation_errors().is_empty());
    }

    #[tokio::test]
    async fn invalid_draft_is_never_sent() {
        let submitter = Arc::new(FakeSubmitter::default());
        let store = FormStore::new(submitter.clone());
        store.set_error(Some("old error".to_string()));
        store.set_success_message(Some("old success".to_string()));

        let mut draft = complete_draft();
        draft.collection.clear();
        store.update_state(draft);

        let outcome = store.submit().await;

        let SubmitOutcome::Invalid(errors) = outcome else {
            panic!("expected Invalid, got {outcome:?}");
        };
        assert_eq!(errors.get(FormField::Collection), Some("Collection is required"));
        assert_eq!(errors.len(), 1);
        assert_eq!(store.validation_errors(), errors);
        assert_eq!(submitter.calls(), 0);
        assert_eq!(store.error().as_deref(), Some("old error"));
        assert_eq!(store.success_message().as_deref(), Some("old success"));
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn successful_submit_resets_draft() {
        let submitter = Arc::new(FakeSubmitter::default());
        let store = FormStore::new(submitter.clone()).with_price_unit("EUR");
        store.update_state(complete_draft());
        store.set_error(Some("previous failure".to_string()));

        let outcome = store.submit().await;

        let SubmitOutcome::Created(created) = outcome else {
            panic!("expected Created, got {outcome:?}");
        };
        assert_eq!(created.submission.title, "Linen Shirt");
        assert_eq!(created.submission.price_unit, "EUR");
        assert_eq!(created.submission.sku.len(), 2);
        assert_eq!(store.state(), FormState::default());
        assert_eq!(store.success_message().as_deref(), Some(SUCCESS_MESSAGE));
        assert_eq!(store.error(), None);
        assert!(!store.is_loading());
        assert_eq!(submitter.calls(), 1);
        assert_eq!(
            submitter.payloads.lock().unwrap()[0].shipping_type,
            "warehouse"
        );
    }

    #[tokio::test]
    async fn failed_submit_keeps_draft() {
        let submitter = Arc::new(FakeSubmitter::failing(SubmitError::Rejected {
            status: 400,
            message: "Invalid SKU data".to_string(),
        }));
        let store = FormStore::new(submitter.clone());
        store.update_state(complete_draft());
        store.set_success_message(Some("earlier success".to_string()));

        let outcome = store.submit().await;

        assert!(matches!(
            outcome,
            SubmitOutcome::Failed(SubmitError::Rejected { status: 400, .. })
        ));
        assert_eq!(store.state(), complete_draft());
        assert_eq!(store.error().as_deref(), Some(FAILURE_MESSAGE));
        assert_eq!(store.success_message(), None);
        assert!(!store.is_loading());

        // Retry sends the same draft again.
        store.submit().await;
        assert_eq!(submitter.calls(), 2);
    }

    #[tokio::test]
    async fn loading_flag_spans_the_endpoint_call() {
        let gate = Arc::new(Notify::new());
        let store = Arc::new(FormStore::new(FakeSubmitter::gated(gate.clone())));
        store.update_state(complete_draft());
        let sub = store.subscribe();

        assert!(!store.is_loading());
        let task = tokio::spawn({
            let store = store.clone();
            async move { store.submit().await }
        });

        // Wait until the submitter has been entered.
        while store.submitter.calls() == 0 {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        assert!(store.is_loading());
        assert_eq!(store.status().error, None);

        // A second submit while in flight is refused.
        assert_eq!(store.submit().await, SubmitOutcome::Busy);
        assert_eq!(store.submitter.calls(), 1);

        gate.notify_one();
        let outcome = task.await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Created(_)));
        assert!(!store.is_loading());

        let events = sub.drain();
        assert!(events.contains(&StoreEvent::StatusChanged));
        assert_eq!(events.last(), Some(&StoreEvent::StatusChanged));
    }

    #[tokio::test]
    async fn dropped_submission_clears_loading() {
        let gate = Arc::new(Notify::new());
        let store = FormStore::new(FakeSubmitter::gated(gate));
        store.update_state(complete_draft());

        let timed_out = tokio::time::timeout(Duration::from_millis(20), store.submit()).await;

        assert!(timed_out.is_err());
        assert!(!store.is_loading());
        assert_eq!(store.state(), complete_draft());
    }
}
