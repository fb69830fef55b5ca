//! Delete operation

use super::OperationDelegate;
use crate::error::{HalError, HalResult};
use crate::resource::{DeleteOptions, HalkyonEntity, ResourceType};
use crate::ui::Prompter;
use async_trait::async_trait;

/// Deletes a named resource, offering a choice among the existing ones when
/// no name was given
pub struct DeleteOperation<'a> {
    client: &'a dyn HalkyonEntity,
    prompt: &'a dyn Prompter,
    options: DeleteOptions,
    selected: Option<String>,
}

impl<'a> DeleteOperation<'a> {
    pub fn new(client: &'a dyn HalkyonEntity, prompt: &'a dyn Prompter) -> Self {
        Self {
            client,
            prompt,
            options: DeleteOptions::default(),
            selected: None,
        }
    }

    pub fn with_options(mut self, options: DeleteOptions) -> Self {
        self.options = options;
        self
    }
}

#[async_trait]
impl OperationDelegate for DeleteOperation<'_> {
    async fn complete(&mut self, name: &str) -> HalResult<()> {
        if !name.is_empty() {
            self.selected = Some(name.to_string());
            return Ok(());
        }

        let resource_type = self.client.resource_type();
        let known = self.client.list().await?;
        if known.is_empty() {
            return Err(HalError::NoTargetsAvailable(
                resource_type.definition().display_name.to_lowercase(),
            ));
        }
        let label = format!("{} to delete", resource_type.definition().kind);
        self.selected = Some(self.prompt.select(&label, &known)?);
        Ok(())
    }

    fn validate(&self) -> HalResult<()> {
        match self.selected.as_deref() {
            Some(name) if !name.is_empty() => Ok(()),
            _ => Err(HalError::Validation("no resource selected for deletion".to_string())),
        }
    }

    async fn run(&mut self, name: &str, client: &dyn HalkyonEntity) -> HalResult<()> {
        client.delete(name, &self.options).await
    }

    fn generate_name(&self, _resource_type: ResourceType) -> Option<String> {
        self.selected.clone()
    }
}
