//! Token request dispatch.
//!
//! The [`TokenEndpoint`] is the entry point hosts invoke once per
//! incoming token request: it determines the grant type, resolves the
//! responsible handler from an immutable registry supplied at
//! construction, and delegates.

use log::debug;

use crate::data::{DataAccessError, DataHandler};
use crate::error::{InvalidRequestSnafu, UnsupportedGrantTypeSnafu};
use crate::grant::{GrantHandlerRegistry, GrantOutcome};
use crate::outcome::OutcomeSender;

/// Dispatches token requests to the registered grant handlers.
#[derive(Clone)]
pub struct TokenEndpoint {
    registry: GrantHandlerRegistry,
}

impl TokenEndpoint {
    /// Creates an endpoint serving the handlers in `registry`.
    #[must_use]
    pub fn new(registry: GrantHandlerRegistry) -> Self {
        Self { registry }
    }

    /// Evaluates one token request.
    ///
    /// A missing `grant_type` parameter or an unregistered grant type is
    /// reported as a protocol error in the [`GrantOutcome`]; the handler
    /// then runs its validation pipeline as defined for its grant type.
    ///
    /// # Errors
    ///
    /// Returns [`DataAccessError`] when the data port reports an
    /// infrastructure failure.
    pub async fn handle_request(
        &self,
        data_handler: &dyn DataHandler,
    ) -> Result<GrantOutcome, DataAccessError> {
        let Some(grant_type) = data_handler.request().parameter("grant_type") else {
            return Ok(Err(InvalidRequestSnafu {
                description: "'grant_type' not found",
            }
            .build()));
        };
        let Some(handler) = self.registry.get(grant_type) else {
            return Ok(Err(UnsupportedGrantTypeSnafu {
                description: format!("unsupported grant type: '{grant_type}'"),
            }
            .build()));
        };
        debug!("dispatching '{grant_type}' token request");
        handler.handle_request(data_handler).await
    }

    /// Evaluates one token request and delivers the outcome on `sender`.
    ///
    /// The outcome is delivered exactly once. When an infrastructure
    /// failure escapes instead, `sender` is dropped undelivered and the
    /// receiving side observes closure.
    ///
    /// # Errors
    ///
    /// Returns [`DataAccessError`] when the data port reports an
    /// infrastructure failure.
    pub async fn handle_request_with(
        &self,
        data_handler: &dyn DataHandler,
        sender: OutcomeSender,
    ) -> Result<(), DataAccessError> {
        let outcome = self.handle_request(data_handler).await?;
        if sender.deliver(outcome).is_err() {
            debug!("token request outcome discarded: receiver dropped");
        }
        Ok(())
    }
}
