use crate::error::{IngredientError, RecipeError};
use crate::providers::RecipeGenerator;
use crate::session::{RequestOutcome, Session};
use crate::view::SessionView;
use log::{debug, error, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex, Notify};

/// Owns a [`Session`] and runs its recipe requests against a
/// [`RecipeGenerator`].
///
/// Cheap to clone; clones share the same session. A fresh [`SessionView`]
/// is published to subscribers after every operation.
#[derive(Clone)]
pub struct RecipeController {
    session: Arc<Mutex<Session>>,
    generator: Arc<dyn RecipeGenerator>,
    timeout: Duration,
    updates: Arc<watch::Sender<SessionView>>,
    cancel: Arc<Notify>,
}

impl RecipeController {
    pub fn new(session: Session, generator: Arc<dyn RecipeGenerator>, timeout: Duration) -> Self {
        let (updates, _) = watch::channel(session.view());
        RecipeController {
            session: Arc::new(Mutex::new(session)),
            generator,
            timeout,
            updates: Arc::new(updates),
            cancel: Arc::new(Notify::new()),
        }
    }

    /// Receive a snapshot after every change
    pub fn subscribe(&self) -> watch::Receiver<SessionView> {
        self.updates.subscribe()
    }

    pub async fn view(&self) -> SessionView {
        self.session.lock().await.view()
    }

    pub fn provider_name(&self) -> &str {
        self.generator.provider_name()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn set_draft(&self, text: impl Into<String>) {
        let mut session = self.session.lock().await;
        session.set_draft(text);
        self.publish(&session);
    }

    pub async fn submit_draft(&self) -> Result<(), IngredientError> {
        let mut session = self.session.lock().await;
        let result = session.submit_draft();
        self.publish(&session);
        result
    }

    pub async fn add_ingredient(&self, raw: &str) -> Result<(), IngredientError> {
        let mut session = self.session.lock().await;
        let result = session.add_ingredient(raw);
        self.publish(&session);
        result
    }

    pub async fn remove_ingredient(&self, name: &str) -> bool {
        let mut session = self.session.lock().await;
        let removed = session.remove_ingredient(name);
        self.publish(&session);
        removed
    }

    pub async fn clear_ingredients(&self) {
        let mut session = self.session.lock().await;
        session.clear_ingredients();
        self.publish(&session);
    }

    /// Ask the generator for a recipe built from the current list.
    ///
    /// A call made while another is running returns
    /// [`RequestOutcome::AlreadyLoading`] without touching anything. Failures
    /// of the generator are not errors here: they end in
    /// [`RequestOutcome::Failed`] with the generic message on screen.
    pub async fn request_recipe(&self) -> Result<RequestOutcome, RecipeError> {
        let cancelled = self.cancel.notified();
        tokio::pin!(cancelled);

        let ticket = {
            let mut session = self.session.lock().await;
            let begun = session.begin_request();
            self.publish(&session);
            match begun? {
                Some(ticket) => {
                    // Armed under the lock: an earlier cancel cannot reach
                    // this waiter, a later one must take the lock first.
                    cancelled.as_mut().enable();
                    ticket
                }
                None => return Ok(RequestOutcome::AlreadyLoading),
            }
        };

        let call = tokio::time::timeout(
            self.timeout,
            self.generator.generate_recipe(ticket.ingredients()),
        );
        tokio::pin!(call);

        let outcome = loop {
            tokio::select! {
                result = &mut call => break match result {
                    Ok(Ok(recipe)) => Ok(recipe),
                    Ok(Err(e)) => {
                        error!(
                            "Error fetching recipe from {}: {}",
                            self.generator.provider_name(),
                            e
                        );
                        Err(RecipeError::RequestFailed(e.to_string()))
                    }
                    Err(_) => {
                        error!(
                            "Recipe request to {} timed out after {:?}",
                            self.generator.provider_name(),
                            self.timeout
                        );
                        Err(RecipeError::Timeout(self.timeout))
                    }
                },
                _ = &mut cancelled => {
                    // Re-arm before checking so a cancel in between is kept.
                    cancelled.set(self.cancel.notified());
                    cancelled.as_mut().enable();
                    if !self.session.lock().await.is_live(&ticket) {
                        info!("Recipe request {} dropped by cancel", ticket.id());
                        return Ok(RequestOutcome::Cancelled);
                    }
                    debug!("Request {} woken by a cancel for another request", ticket.id());
                }
            }
        };

        let mut session = self.session.lock().await;
        let finished = session.finish_request(&ticket, outcome);
        self.publish(&session);
        Ok(finished)
    }

    /// Abandon the running request, if any.
    pub async fn cancel_request(&self) -> bool {
        let mut session = self.session.lock().await;
        let cancelled = session.cancel_request();
        self.publish(&session);
        if cancelled {
            self.cancel.notify_waiters();
        }
        cancelled
    }

    fn publish(&self, session: &Session) {
        self.updates.send_replace(session.view());
    }
}
