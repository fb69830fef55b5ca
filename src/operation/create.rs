//! Create operations
//!
//! Constructive delegates only describe how to complete, validate and build
//! a manifest; [`CreateOperation`] turns that into a submission.

use super::OperationDelegate;
use crate::error::{HalError, HalResult};
use crate::resource::{resource_type_for, HalkyonEntity, Manifest, Object, ResourceType};
use async_trait::async_trait;

/// Delegate of a create operation
#[async_trait]
pub trait CreateDelegate: Send {
    async fn complete(&mut self, name: &str) -> HalResult<()>;

    fn validate(&self) -> HalResult<()>;

    /// Build the object to submit. Calling it again without a new
    /// `complete` yields the same object.
    fn build(&mut self, name: &str, namespace: &str) -> HalResult<Manifest>;

    /// Prefix of the generated name when none was given
    fn generate_prefix(&self) -> Option<String>;
}

/// Adapts a [`CreateDelegate`] to the generic operation driver
pub struct CreateOperation<D> {
    delegate: D,
    dry_run: bool,
}

impl<D: CreateDelegate> CreateOperation<D> {
    pub fn new(delegate: D) -> Self {
        Self {
            delegate,
            dry_run: false,
        }
    }

    /// Print the manifest instead of submitting it
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn delegate(&self) -> &D {
        &self.delegate
    }
}

#[async_trait]
impl<D: CreateDelegate> OperationDelegate for CreateOperation<D> {
    async fn complete(&mut self, name: &str) -> HalResult<()> {
        self.delegate.complete(name).await
    }

    fn validate(&self) -> HalResult<()> {
        self.delegate.validate()
    }

    async fn run(&mut self, name: &str, client: &dyn HalkyonEntity) -> HalResult<()> {
        let resource_type = client.resource_type();
        if client.get(name).await?.is_some() {
            return Err(HalError::Validation(format!(
                "{} '{}' already exists in namespace '{}'",
                resource_type,
                name,
                client.namespace()
            )));
        }

        let manifest = self.delegate.build(name, client.namespace())?;
        let built_type = resource_type_for(Some(&manifest as &dyn Object))?;
        if built_type != resource_type {
            return Err(HalError::Validation(format!(
                "cannot create a {} through the {} client",
                built_type, resource_type
            )));
        }

        if self.dry_run {
            print!("{}", manifest.to_yaml()?);
            return Ok(());
        }

        client.create(&manifest).await
    }

    fn generate_name(&self, resource_type: ResourceType) -> Option<String> {
        self.delegate
            .generate_prefix()
            .filter(|p| !p.is_empty())
            .map(|prefix| format!("{}-{}", prefix, resource_type))
    }
}
