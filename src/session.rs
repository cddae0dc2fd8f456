//! Synchronous session state: the ingredient list, the input draft, the
//! request lifecycle and the on-screen messages.
//!
//! Every method here is a plain state transition. The async side lives in
//! [`crate::controller`], which splits a recipe request into
//! [`Session::begin_request`] and [`Session::finish_request`] around the
//! collaborator call.

use crate::config::KitchenConfig;
use crate::error::{ChefError, IngredientError, RecipeError};
use crate::ingredients::IngredientList;
use crate::state::{Notices, RequestState};
use crate::view::SessionView;
use log::{debug, info};

/// Captured when a request starts; handed back on completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeTicket {
    id: u64,
    revision: u64,
    ingredients: Vec<String>,
}

impl RecipeTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The ingredient list as it was when the request started
    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }
}

/// How a request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The recipe is now on screen
    Succeeded,
    /// The failure message is now on screen
    Failed,
    /// The list changed while the request ran; result dropped
    Discarded,
    /// Cancelled by the user, or superseded; result dropped
    Cancelled,
    /// A request was already running, nothing was started
    AlreadyLoading,
}

#[derive(Debug, Clone)]
pub struct Session {
    ingredients: IngredientList,
    draft: String,
    state: RequestState,
    notices: Notices,
    min_ingredients: usize,
    /// Bumped on every list mutation
    revision: u64,
    next_request_id: u64,
    in_flight: Option<u64>,
}

impl Session {
    /// Start a session from `config`, seeding the list.
    ///
    /// Fails when `max_ingredients` is zero or below `min_ingredients`.
    pub fn new(config: &KitchenConfig) -> Result<Self, ChefError> {
        if config.max_ingredients == 0 {
            return Err(ChefError::InvalidLimits(
                "max_ingredients must be at least 1".to_string(),
            ));
        }
        if config.min_ingredients > config.max_ingredients {
            return Err(ChefError::InvalidLimits(format!(
                "min_ingredients ({}) cannot exceed max_ingredients ({})",
                config.min_ingredients, config.max_ingredients
            )));
        }
        Ok(Session::seeded(config))
    }

    fn seeded(config: &KitchenConfig) -> Self {
        Session {
            ingredients: IngredientList::with_seed(
                config.max_ingredients,
                &config.seed_ingredients,
            ),
            draft: String::new(),
            state: RequestState::Idle,
            notices: Notices::default(),
            min_ingredients: config.min_ingredients,
            revision: 0,
            next_request_id: 1,
            in_flight: None,
        }
    }

    pub fn ingredients(&self) -> &IngredientList {
        &self.ingredients
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn min_ingredients(&self) -> usize {
        self.min_ingredients
    }

    /// Ingredients still needed before a recipe can be requested
    pub fn missing(&self) -> usize {
        self.min_ingredients.saturating_sub(self.ingredients.len())
    }

    pub fn can_generate(&self) -> bool {
        !self.state.is_loading() && !self.ingredients.is_empty() && self.missing() == 0
    }

    pub fn view(&self) -> SessionView {
        SessionView::from(self)
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Add whatever is in the draft.
    pub fn submit_draft(&mut self) -> Result<(), IngredientError> {
        let draft = std::mem::take(&mut self.draft);
        let result = self.add_ingredient(&draft);
        if result.is_err() {
            self.draft = draft;
        }
        result
    }

    /// Validate and append `raw`.
    ///
    /// Prior messages are cleared first. A rejection lands in the error or
    /// warning slot; a success clears the draft and drops any recipe shown.
    pub fn add_ingredient(&mut self, raw: &str) -> Result<(), IngredientError> {
        self.notices.clear();

        match self.ingredients.add(raw) {
            Ok(name) => {
                debug!("Added ingredient {:?}", name);
                self.draft.clear();
                self.list_changed();
                Ok(())
            }
            Err(e) => {
                debug!("Rejected ingredient {:?}: {:?}", raw, e);
                self.notices.report(&e);
                Err(e)
            }
        }
    }

    /// Remove the exact match of `name`. Always resets the request state
    /// (unless a request is running) and clears messages.
    pub fn remove_ingredient(&mut self, name: &str) -> bool {
        self.notices.clear();
        let removed = self.ingredients.remove(name);
        if removed {
            debug!("Removed ingredient {:?}", name);
            self.revision += 1;
        }
        self.reset_result();
        removed
    }

    pub fn clear_ingredients(&mut self) {
        self.notices.clear();
        self.ingredients.clear();
        self.revision += 1;
        self.reset_result();
    }

    /// Start a request.
    ///
    /// `Ok(None)` means a request is already running and nothing changed.
    /// Precondition failures put their message in the error slot.
    pub fn begin_request(&mut self) -> Result<Option<RecipeTicket>, RecipeError> {
        let Some(loading) = self.state.begin() else {
            debug!("Recipe request ignored, one is already in flight");
            return Ok(None);
        };

        self.notices.clear();

        let precondition = if self.ingredients.is_empty() {
            Some(RecipeError::NoIngredients)
        } else if self.missing() > 0 {
            Some(RecipeError::TooFewIngredients {
                missing: self.missing(),
            })
        } else {
            None
        };
        if let Some(err) = precondition {
            self.notices.set_error(err.to_string());
            return Err(err);
        }

        let ticket = RecipeTicket {
            id: self.next_request_id,
            revision: self.revision,
            ingredients: self.ingredients.to_vec(),
        };
        self.next_request_id += 1;
        self.in_flight = Some(ticket.id);
        self.state = loading;

        info!(
            "Recipe request {} started with {} ingredients",
            ticket.id,
            ticket.ingredients.len()
        );
        Ok(Some(ticket))
    }

    /// Apply the collaborator's answer for `ticket`.
    ///
    /// Leaves `Loading` on every path where the ticket is still the live one.
    pub fn finish_request(
        &mut self,
        ticket: &RecipeTicket,
        outcome: Result<String, RecipeError>,
    ) -> RequestOutcome {
        if self.in_flight != Some(ticket.id) {
            debug!("Ignoring result of request {}, no longer live", ticket.id);
            return RequestOutcome::Cancelled;
        }
        self.in_flight = None;

        if self.revision != ticket.revision {
            info!(
                "Discarding result of request {}, ingredient list changed",
                ticket.id
            );
            self.state = RequestState::Idle;
            return RequestOutcome::Discarded;
        }

        let failed = outcome.is_err();
        self.state = RequestState::resolve(outcome);
        if failed {
            if let Some(message) = self.state.failure() {
                self.notices.error = Some(message.to_string());
            }
            RequestOutcome::Failed
        } else {
            RequestOutcome::Succeeded
        }
    }

    /// Whether `ticket` is still the request that owns `Loading`
    pub fn is_live(&self, ticket: &RecipeTicket) -> bool {
        self.in_flight == Some(ticket.id)
    }

    /// Drop the running request. Returns whether there was one.
    pub fn cancel_request(&mut self) -> bool {
        match self.in_flight.take() {
            Some(id) => {
                info!("Recipe request {} cancelled", id);
                self.state = RequestState::Idle;
                true
            }
            None => false,
        }
    }

    fn list_changed(&mut self) {
        self.revision += 1;
        self.reset_result();
    }

    /// Back to `Idle`, except while a request runs: that one keeps its
    /// `Loading` state and is discarded when it resolves.
    fn reset_result(&mut self) {
        if !self.state.is_loading() {
            self.state = RequestState::Idle;
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::seeded(&KitchenConfig::default())
    }
}
