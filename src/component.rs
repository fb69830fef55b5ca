//! Component creation

use crate::error::{HalError, HalResult};
use crate::operation::env::parse_env_pairs;
use crate::operation::CreateDelegate;
use crate::resource::{Component, ComponentSpec, DeploymentMode, EnvVar, Manifest};
use crate::ui::{select_from_other_error_message, Prompter};
use async_trait::async_trait;

/// Runtime a component can be built on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeDef {
    pub name: &'static str,
    pub default_version: &'static str,
}

/// Runtimes supported by the operator
pub const RUNTIMES: &[RuntimeDef] = &[
    RuntimeDef {
        name: "spring-boot",
        default_version: "2.1.6.RELEASE",
    },
    RuntimeDef {
        name: "vert.x",
        default_version: "3.7.0",
    },
    RuntimeDef {
        name: "thorntail",
        default_version: "2.5.0.Final",
    },
    RuntimeDef {
        name: "quarkus",
        default_version: "0.19.1",
    },
    RuntimeDef {
        name: "node.js",
        default_version: "12",
    },
];

pub fn find_runtime(name: &str) -> Option<&'static RuntimeDef> {
    RUNTIMES.iter().find(|r| r.name == name)
}

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct ComponentCreateOptions {
    pub runtime: String,
    pub version: String,
    pub port: u16,
    pub expose: bool,
    /// Deploy from a built image instead of pushed sources
    pub build_mode: bool,
    pub env_pairs: Vec<String>,
}

impl Default for ComponentCreateOptions {
    fn default() -> Self {
        Self {
            runtime: String::new(),
            version: String::new(),
            port: DEFAULT_PORT,
            expose: false,
            build_mode: false,
            env_pairs: Vec::new(),
        }
    }
}

/// Create delegate for components
pub struct ComponentCreate<'a> {
    prompt: &'a dyn Prompter,
    options: ComponentCreateOptions,
    envs: Vec<EnvVar>,
    target: Option<Component>,
}

impl<'a> ComponentCreate<'a> {
    pub fn new(prompt: &'a dyn Prompter, options: ComponentCreateOptions) -> Self {
        Self {
            prompt,
            options,
            envs: Vec::new(),
            target: None,
        }
    }
}

#[async_trait]
impl CreateDelegate for ComponentCreate<'_> {
    async fn complete(&mut self, _name: &str) -> HalResult<()> {
        self.target = None;

        if find_runtime(&self.options.runtime).is_none() {
            let message = if self.options.runtime.is_empty() {
                "Runtime".to_string()
            } else {
                select_from_other_error_message("Unknown runtime", &self.options.runtime)
            };
            let names: Vec<String> = RUNTIMES.iter().map(|r| r.name.to_string()).collect();
            self.options.runtime = self.prompt.select(&message, &names)?;
        }
        self.prompt
            .announce_selection("Selected runtime", &self.options.runtime);

        if self.options.version.is_empty() {
            if let Some(runtime) = find_runtime(&self.options.runtime) {
                self.options.version = runtime.default_version.to_string();
            }
        }
        self.prompt
            .announce_selection("Selected version", &self.options.version);

        self.envs = parse_env_pairs(&self.options.env_pairs)?;
        Ok(())
    }

    fn validate(&self) -> HalResult<()> {
        if find_runtime(&self.options.runtime).is_none() {
            return Err(HalError::Validation(format!(
                "unsupported runtime '{}'",
                self.options.runtime
            )));
        }
        if self.options.version.is_empty() {
            return Err(HalError::Validation("a runtime version is required".to_string()));
        }
        if self.options.port == 0 {
            return Err(HalError::Validation("port must be between 1 and 65535".to_string()));
        }
        Ok(())
    }

    fn build(&mut self, name: &str, namespace: &str) -> HalResult<Manifest> {
        if let Some(component) = &self.target {
            return Ok(Manifest::Component(component.clone()));
        }

        let deployment_mode = if self.options.build_mode {
            DeploymentMode::Build
        } else {
            DeploymentMode::Dev
        };
        let component = Component::new(
            name,
            namespace,
            ComponentSpec {
                deployment_mode,
                runtime: self.options.runtime.clone(),
                version: self.options.version.clone(),
                port: self.options.port,
                expose_service: self.options.expose,
                envs: self.envs.clone(),
            },
        );
        self.target = Some(component.clone());
        Ok(Manifest::Component(component))
    }

    fn generate_prefix(&self) -> Option<String> {
        Some(self.options.runtime.clone()).filter(|r| !r.is_empty())
    }
}
