//! Generic operations
//!
//! Every command follows the same three phases regardless of the resource
//! kind it targets:
//!
//! 1. `complete` - derive whatever input was not supplied (may prompt or
//!    query the cluster)
//! 2. `validate` - check the now-complete input
//! 3. `run` - perform the remote effect
//!
//! [`GenericOperation`] drives the phases through an [`OperationDelegate`]
//! and never looks inside it. Constructive operations implement
//! [`CreateDelegate`] and are adapted by [`CreateOperation`].
//!
//! # Module Structure
//!
//! - [`create`] - Build-then-submit adapter for constructive delegates
//! - [`delete`] - Deletion delegate
//! - [`env`] - `name=value` pair parsing shared by several delegates

pub mod create;
pub mod delete;
pub mod env;

pub use create::{CreateDelegate, CreateOperation};
pub use delete::DeleteOperation;

use crate::error::{HalError, HalResult};
use crate::resource::{HalkyonEntity, ResourceType};
use async_trait::async_trait;

/// Per-operation behavior plugged into [`GenericOperation`]
#[async_trait]
pub trait OperationDelegate: Send {
    /// Gather or derive missing inputs; `name` is empty when none was given
    async fn complete(&mut self, name: &str) -> HalResult<()>;

    fn validate(&self) -> HalResult<()>;

    /// Perform the operation on the resource called `name`
    async fn run(&mut self, name: &str, client: &dyn HalkyonEntity) -> HalResult<()>;

    /// Name to use when none was given, known once `complete` has run
    fn generate_name(&self, _resource_type: ResourceType) -> Option<String> {
        None
    }
}

/// An operation on one named resource of one kind
pub struct GenericOperation<'a> {
    pub resource_type: ResourceType,
    pub name: String,
    pub client: &'a dyn HalkyonEntity,
    operation_name: &'static str,
    delegate: Box<dyn OperationDelegate + 'a>,
}

impl<'a> GenericOperation<'a> {
    pub fn new(
        operation_name: &'static str,
        client: &'a dyn HalkyonEntity,
        name: Option<String>,
        delegate: Box<dyn OperationDelegate + 'a>,
    ) -> Self {
        Self {
            resource_type: client.resource_type(),
            name: name.unwrap_or_default(),
            client,
            operation_name,
            delegate,
        }
    }

    pub fn operation_name(&self) -> &'static str {
        self.operation_name
    }

    /// One-line description, e.g. "Create the named link"
    pub fn short(&self) -> String {
        let mut chars = self.operation_name.chars();
        let title = match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        };
        format!("{} the named {}", title, self.resource_type)
    }

    /// Run complete, validate and run in order, stopping at the first error
    pub async fn execute(&mut self) -> HalResult<()> {
        tracing::debug!("{} {}: complete", self.operation_name, self.resource_type);
        self.delegate.complete(&self.name).await?;

        if self.name.is_empty() {
            self.name = self
                .delegate
                .generate_name(self.resource_type)
                .filter(|n| !n.is_empty())
                .ok_or_else(|| {
                    HalError::InvalidInput(format!(
                        "a name is required to {} a {}",
                        self.operation_name, self.resource_type
                    ))
                })?;
            tracing::debug!("Using generated name '{}'", self.name);
        }

        tracing::debug!("{} {} '{}': validate", self.operation_name, self.resource_type, self.name);
        self.delegate.validate()?;

        tracing::info!("{} {} '{}'", self.operation_name, self.resource_type, self.name);
        self.delegate.run(&self.name, self.client).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{DeleteOptions, Manifest};
    use serde_json::Value;
    use std::sync::{Arc, Mutex};

    struct NullEntity;

    #[async_trait]
    impl HalkyonEntity for NullEntity {
        fn resource_type(&self) -> ResourceType {
            ResourceType::Component
        }
        async fn get(&self, _name: &str) -> HalResult<Option<Value>> {
            Ok(None)
        }
        async fn create(&self, _manifest: &Manifest) -> HalResult<()> {
            Ok(())
        }
        async fn delete(&self, _name: &str, _options: &DeleteOptions) -> HalResult<()> {
            Ok(())
        }
        async fn list(&self) -> HalResult<Vec<String>> {
            Ok(vec![])
        }
        fn namespace(&self) -> &str {
            "test"
        }
    }

    /// Records the phases it goes through
    struct Recorder {
        calls: Arc<Mutex<Vec<String>>>,
        fail_validate: bool,
        generated: Option<String>,
    }

    #[async_trait]
    impl OperationDelegate for Recorder {
        async fn complete(&mut self, name: &str) -> HalResult<()> {
            self.calls.lock().unwrap().push(format!("complete:{}", name));
            Ok(())
        }
        fn validate(&self) -> HalResult<()> {
            self.calls.lock().unwrap().push("validate".to_string());
            if self.fail_validate {
                return Err(HalError::Validation("bad".to_string()));
            }
            Ok(())
        }
        async fn run(&mut self, name: &str, _client: &dyn HalkyonEntity) -> HalResult<()> {
            self.calls.lock().unwrap().push(format!("run:{}", name));
            Ok(())
        }
        fn generate_name(&self, resource_type: ResourceType) -> Option<String> {
            self.generated
                .as_ref()
                .map(|prefix| format!("{}-{}", prefix, resource_type))
        }
    }

    #[tokio::test]
    async fn test_phases_run_in_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let entity = NullEntity;
        let mut op = GenericOperation::new(
            "create",
            &entity,
            Some("foo".to_string()),
            Box::new(Recorder {
                calls: calls.clone(),
                fail_validate: false,
                generated: None,
            }),
        );
        op.execute().await.unwrap();
        assert_eq!(
            *calls.lock().unwrap(),
            vec!["complete:foo", "validate", "run:foo"]
        );
    }

    #[tokio::test]
    async fn test_validation_failure_stops_before_run() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let entity = NullEntity;
        let mut op = GenericOperation::new(
            "create",
            &entity,
            Some("foo".to_string()),
            Box::new(Recorder {
                calls: calls.clone(),
                fail_validate: true,
                generated: None,
            }),
        );
        assert!(matches!(op.execute().await, Err(HalError::Validation(_))));
        assert_eq!(*calls.lock().unwrap(), vec!["complete:foo", "validate"]);
    }

    #[tokio::test]
    async fn test_missing_name_is_generated() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let entity = NullEntity;
        let mut op = GenericOperation::new(
            "create",
            &entity,
            None,
            Box::new(Recorder {
                calls: calls.clone(),
                fail_validate: false,
                generated: Some("backend".to_string()),
            }),
        );
        op.execute().await.unwrap();
        assert_eq!(op.name, "backend-component");
        assert_eq!(calls.lock().unwrap().last().unwrap(), "run:backend-component");
    }

    #[tokio::test]
    async fn test_missing_name_without_generator_is_invalid() {
        let entity = NullEntity;
        let mut op = GenericOperation::new(
            "delete",
            &entity,
            None,
            Box::new(Recorder {
                calls: Arc::new(Mutex::new(Vec::new())),
                fail_validate: false,
                generated: None,
            }),
        );
        assert!(matches!(op.execute().await, Err(HalError::InvalidInput(_))));
    }

    #[test]
    fn test_short_description() {
        let entity = NullEntity;
        let op = GenericOperation::new(
            "delete",
            &entity,
            None,
            Box::new(Recorder {
                calls: Arc::new(Mutex::new(Vec::new())),
                fail_validate: false,
                generated: None,
            }),
        );
        assert_eq!(op.short(), "Delete the named component");
        assert_eq!(op.operation_name(), "delete");
    }
}
