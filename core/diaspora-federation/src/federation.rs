use std::sync::Arc;

use crate::callbacks::{CallbackEvent, Callbacks};
use crate::config::{validate_config, FederationConfig};
use crate::error::{CallbackError, ConfigurationError, HandlerError};

/// Collects configuration and handlers, then validates them once.
#[derive(Debug)]
pub struct FederationBuilder {
    config: FederationConfig,
    callbacks: Callbacks,
}

impl FederationBuilder {
    /// Starts a builder that expects a handler for every federation event.
    pub fn new(config: FederationConfig) -> Self {
        Self {
            config,
            callbacks: Callbacks::federation(),
        }
    }

    /// Registers the handler for `E`.
    pub fn on<E, F>(mut self, handler: F) -> Result<Self, CallbackError>
    where
        E: CallbackEvent,
        F: Fn(E::Args) -> Result<E::Output, HandlerError> + Send + Sync + 'static,
    {
        self.callbacks.on::<E, F>(handler)?;
        Ok(self)
    }

    pub fn callbacks_mut(&mut self) -> &mut Callbacks {
        &mut self.callbacks
    }

    pub fn config(&self) -> &FederationConfig {
        &self.config
    }

    /// Validates configuration and handler completeness.
    pub fn build(self) -> Result<Federation, ConfigurationError> {
        validate_config(&self.config, &self.callbacks)?;
        Ok(Federation {
            config: Arc::new(self.config),
            callbacks: Arc::new(self.callbacks),
        })
    }
}

/// A configured federation library. Cheap to clone and share.
#[derive(Debug, Clone)]
pub struct Federation {
    config: Arc<FederationConfig>,
    callbacks: Arc<Callbacks>,
}

impl Federation {
    pub fn config(&self) -> &FederationConfig {
        &self.config
    }

    pub fn callbacks(&self) -> &Callbacks {
        &self.callbacks
    }

    pub(crate) fn trigger<E: CallbackEvent>(&self, args: E::Args) -> Result<E::Output, CallbackError> {
        self.callbacks.trigger::<E>(args)
    }
}
