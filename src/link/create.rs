//! Link creation
//!
//! Completing a link resolves its target, decides between a secret
//! reference and a list of environment variables, and checks the chosen
//! secret against the cluster before anything is built.

use super::targets::{extract_target_name, resolve_secrets, resolve_targets};
use crate::cluster::{SecretCatalog, OPAQUE_SECRET_TYPE};
use crate::error::{HalError, HalResult};
use crate::operation::env::parse_env_pairs;
use crate::operation::CreateDelegate;
use crate::resource::{HalkyonEntity, Link, LinkMechanism, Manifest};
use crate::ui::{select_from_other_error_message, Prompter};
use async_trait::async_trait;

/// Inputs a user may supply up front
#[derive(Debug, Clone, Default)]
pub struct LinkCreateOptions {
    /// Capability or component to link to
    pub target_name: String,
    /// Secret to reference
    pub secret: String,
    /// Raw `name=value` pairs
    pub env_pairs: Vec<String>,
}

/// Create delegate for links
pub struct LinkCreate<'a> {
    capabilities: &'a dyn HalkyonEntity,
    components: &'a dyn HalkyonEntity,
    secrets: &'a dyn SecretCatalog,
    prompt: &'a dyn Prompter,
    target_name: String,
    secret: String,
    env_pairs: Vec<String>,
    mechanism: Option<LinkMechanism>,
    target: Option<Link>,
}

impl<'a> LinkCreate<'a> {
    pub fn new(
        capabilities: &'a dyn HalkyonEntity,
        components: &'a dyn HalkyonEntity,
        secrets: &'a dyn SecretCatalog,
        prompt: &'a dyn Prompter,
        options: LinkCreateOptions,
    ) -> Self {
        Self {
            capabilities,
            components,
            secrets,
            prompt,
            target_name: options.target_name,
            secret: options.secret,
            env_pairs: options.env_pairs,
            mechanism: None,
            target: None,
        }
    }

    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    pub fn mechanism(&self) -> Option<&LinkMechanism> {
        self.mechanism.as_ref()
    }

    async fn complete_secret(&mut self) -> HalResult<LinkMechanism> {
        let resolution = resolve_secrets(self.secrets, OPAQUE_SECRET_TYPE, &self.secret).await?;
        if !resolution.is_valid {
            let message = if self.secret.is_empty() {
                "Secret (only potential matches shown)".to_string()
            } else {
                select_from_other_error_message("Unknown secret", &self.secret)
            };
            self.secret = self.prompt.select(&message, &resolution.secrets)?;
        }
        self.prompt.announce_selection("Selected secret", &self.secret);

        Ok(LinkMechanism::Secret {
            secret_ref: self.secret.clone(),
        })
    }
}

#[async_trait]
impl CreateDelegate for LinkCreate<'_> {
    async fn complete(&mut self, _name: &str) -> HalResult<()> {
        let mut use_secret = !self.secret.is_empty();
        let use_env = !self.env_pairs.is_empty();
        if use_secret && use_env {
            return Err(HalError::Validation(
                "invalid parameter combination: either pass a secret name or environment variables, not both"
                    .to_string(),
            ));
        }

        self.mechanism = None;
        self.target = None;

        let targets = resolve_targets(self.capabilities, self.components, &self.target_name).await?;
        if !targets.is_valid {
            let chosen = self.prompt.select("Target", &targets.rendered())?;
            self.target_name = extract_target_name(&chosen).to_string();
        }
        self.prompt.announce_selection("Selected target", &self.target_name);

        if !use_secret && !use_env {
            use_secret = self.prompt.confirm("Use Secret")?;
        }

        let mechanism = if use_secret {
            self.prompt.announce_selection("Selected link type", "Secret");
            self.complete_secret().await?
        } else {
            self.prompt.announce_selection("Selected link type", "Env");
            LinkMechanism::Env {
                envs: parse_env_pairs(&self.env_pairs)?,
            }
        };
        tracing::debug!(
            "Link to '{}' uses {} mechanism",
            self.target_name,
            mechanism.type_name()
        );
        self.mechanism = Some(mechanism);

        Ok(())
    }

    fn validate(&self) -> HalResult<()> {
        if self.target_name.is_empty() {
            return Err(HalError::Validation("a link target is required".to_string()));
        }
        match &self.mechanism {
            None => Err(HalError::Validation(
                "link type has not been determined".to_string(),
            )),
            Some(LinkMechanism::Secret { secret_ref }) if secret_ref.is_empty() => Err(
                HalError::Validation("a Secret link needs a secret name".to_string()),
            ),
            Some(LinkMechanism::Env { envs }) if envs.is_empty() => Err(HalError::Validation(
                "an Env link needs at least one environment variable, pass them with --env name=value"
                    .to_string(),
            )),
            Some(_) => Ok(()),
        }
    }

    fn build(&mut self, name: &str, namespace: &str) -> HalResult<Manifest> {
        if let Some(link) = &self.target {
            return Ok(Manifest::Link(link.clone()));
        }

        let mechanism = self
            .mechanism
            .clone()
            .ok_or_else(|| HalError::Validation("link type has not been determined".to_string()))?;
        let link = Link::new(name, namespace, &self.target_name, mechanism);
        self.target = Some(link.clone());
        Ok(Manifest::Link(link))
    }

    fn generate_prefix(&self) -> Option<String> {
        Some(self.target_name.clone()).filter(|t| !t.is_empty())
    }
}
