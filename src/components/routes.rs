//! # RouteRegistry: named input/output channels for router-style components.
//!
//! Components that route messages keep registries of named input and output
//! channels. Registration is internally synchronized so the duplicate check is
//! atomic with the insert; a duplicate fails fast with a named error and
//! leaves existing state unchanged.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::ComponentError;

/// Internally synchronized registry of named input/output channels.
///
/// `In`/`Out` are whatever channel handles the component routes through
/// (senders, connection handles, ...).
pub struct RouteRegistry<In, Out> {
    inputs: Mutex<HashMap<String, In>>,
    outputs: Mutex<HashMap<String, Out>>,
}

impl<In, Out> Default for RouteRegistry<In, Out> {
    fn default() -> Self {
        Self {
            inputs: Mutex::new(HashMap::new()),
            outputs: Mutex::new(HashMap::new()),
        }
    }
}

impl<In, Out> RouteRegistry<In, Out> {
    /// Creates an empty route registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an input channel; duplicate names fail fast.
    pub fn register_input(
        &self,
        channel: impl Into<String>,
        input: In,
    ) -> Result<(), ComponentError> {
        let channel = channel.into();
        let mut inputs = self.inputs.lock().expect("route registry poisoned");
        if inputs.contains_key(&channel) {
            return Err(ComponentError::DuplicateRoute { channel });
        }
        inputs.insert(channel, input);
        Ok(())
    }

    /// Registers an output channel; duplicate names fail fast.
    pub fn register_output(
        &self,
        channel: impl Into<String>,
        output: Out,
    ) -> Result<(), ComponentError> {
        let channel = channel.into();
        let mut outputs = self.outputs.lock().expect("route registry poisoned");
        if outputs.contains_key(&channel) {
            return Err(ComponentError::DuplicateRoute { channel });
        }
        outputs.insert(channel, output);
        Ok(())
    }

    /// Sorted names of registered input channels.
    pub fn input_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .inputs
            .lock()
            .expect("route registry poisoned")
            .keys()
            .cloned()
            .collect();
        names.sort_unstable();
        names
    }

    /// Sorted names of registered output channels.
    pub fn output_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .outputs
            .lock()
            .expect("route registry poisoned")
            .keys()
            .cloned()
            .collect();
        names.sort_unstable();
        names
    }

    /// Drops all registered channels; called on component shutdown.
    pub fn clear(&self) {
        self.inputs.lock().expect("route registry poisoned").clear();
        self.outputs.lock().expect("route registry poisoned").clear();
    }
}

impl<In, Out: Clone> RouteRegistry<In, Out> {
    /// Looks up an output channel by name.
    pub fn output(&self, channel: &str) -> Option<Out> {
        self.outputs
            .lock()
            .expect("route registry poisoned")
            .get(channel)
            .cloned()
    }
}

impl<In: Clone, Out> RouteRegistry<In, Out> {
    /// Looks up an input channel by name.
    pub fn input(&self, channel: &str) -> Option<In> {
        self.inputs
            .lock()
            .expect("route registry poisoned")
            .get(channel)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_registration_leaves_first_intact() {
        let routes: RouteRegistry<u32, u32> = RouteRegistry::new();
        routes.register_output("events", 1).unwrap();

        let err = routes.register_output("events", 2).unwrap_err();
        assert_eq!(err.as_label(), "component_duplicate_route");
        assert_eq!(routes.output("events"), Some(1));
    }

    #[test]
    fn inputs_and_outputs_are_independent_namespaces() {
        let routes: RouteRegistry<u32, u32> = RouteRegistry::new();
        routes.register_input("events", 1).unwrap();
        routes.register_output("events", 2).unwrap();

        assert_eq!(routes.input_names(), vec!["events"]);
        assert_eq!(routes.output_names(), vec!["events"]);

        routes.clear();
        assert!(routes.input("events").is_none());
        assert!(routes.output_names().is_empty());
    }
}
