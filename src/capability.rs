//! Capability creation

use crate::error::{HalError, HalResult};
use crate::operation::env::parse_parameters;
use crate::operation::CreateDelegate;
use crate::resource::{Capability, CapabilitySpec, Manifest, Parameter};
use crate::ui::Prompter;
use async_trait::async_trait;

/// A kind of capability and the versions the operator can provision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityKindDef {
    pub category: &'static str,
    pub kind: &'static str,
    pub versions: &'static [&'static str],
}

pub const CAPABILITY_KINDS: &[CapabilityKindDef] = &[
    CapabilityKindDef {
        category: "database",
        kind: "postgres",
        versions: &["10", "11", "12"],
    },
    CapabilityKindDef {
        category: "database",
        kind: "mysql",
        versions: &["5.7", "8.0"],
    },
];

/// Known categories, first-seen order
pub fn categories() -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for def in CAPABILITY_KINDS {
        if !categories.iter().any(|c| c == def.category) {
            categories.push(def.category.to_string());
        }
    }
    categories
}

pub fn kinds_of(category: &str) -> Vec<String> {
    CAPABILITY_KINDS
        .iter()
        .filter(|d| d.category == category)
        .map(|d| d.kind.to_string())
        .collect()
}

pub fn find_kind(category: &str, kind: &str) -> Option<&'static CapabilityKindDef> {
    CAPABILITY_KINDS
        .iter()
        .find(|d| d.category == category && d.kind == kind)
}

#[derive(Debug, Clone, Default)]
pub struct CapabilityCreateOptions {
    pub category: String,
    pub kind: String,
    pub version: String,
    /// Raw `name=value` parameter pairs
    pub params: Vec<String>,
}

/// Create delegate for capabilities
pub struct CapabilityCreate<'a> {
    prompt: &'a dyn Prompter,
    options: CapabilityCreateOptions,
    parameters: Vec<Parameter>,
    target: Option<Capability>,
}

impl<'a> CapabilityCreate<'a> {
    pub fn new(prompt: &'a dyn Prompter, options: CapabilityCreateOptions) -> Self {
        Self {
            prompt,
            options,
            parameters: Vec::new(),
            target: None,
        }
    }

    /// Use `given` if it is among `known`, prompt when it is empty
    fn choose(&self, label: &str, given: &str, known: &[String]) -> HalResult<String> {
        if given.is_empty() {
            let chosen = self.prompt.select(label, known)?;
            self.prompt
                .announce_selection(&format!("Selected {}", label.to_lowercase()), &chosen);
            return Ok(chosen);
        }
        if known.iter().any(|k| k == given) {
            return Ok(given.to_string());
        }
        Err(HalError::InvalidInput(format!(
            "unknown {} '{}', expected one of: {}",
            label.to_lowercase(),
            given,
            known.join(", ")
        )))
    }
}

#[async_trait]
impl CreateDelegate for CapabilityCreate<'_> {
    async fn complete(&mut self, _name: &str) -> HalResult<()> {
        self.target = None;

        self.options.category = self.choose("Category", &self.options.category, &categories())?;
        let kinds = kinds_of(&self.options.category);
        self.options.kind = self.choose("Type", &self.options.kind, &kinds)?;

        let versions: Vec<String> = find_kind(&self.options.category, &self.options.kind)
            .map(|d| d.versions.iter().map(|v| v.to_string()).collect())
            .unwrap_or_default();
        self.options.version = self.choose("Version", &self.options.version, &versions)?;

        self.parameters = parse_parameters(&self.options.params)?;
        Ok(())
    }

    fn validate(&self) -> HalResult<()> {
        let Some(def) = find_kind(&self.options.category, &self.options.kind) else {
            return Err(HalError::Validation(format!(
                "unsupported capability '{}/{}'",
                self.options.category, self.options.kind
            )));
        };
        if !def.versions.contains(&self.options.version.as_str()) {
            return Err(HalError::Validation(format!(
                "unsupported {} version '{}'",
                def.kind, self.options.version
            )));
        }
        Ok(())
    }

    fn build(&mut self, name: &str, namespace: &str) -> HalResult<Manifest> {
        if let Some(capability) = &self.target {
            return Ok(Manifest::Capability(capability.clone()));
        }

        let capability = Capability::new(
            name,
            namespace,
            CapabilitySpec {
                category: self.options.category.clone(),
                kind: self.options.kind.clone(),
                version: self.options.version.clone(),
                parameters: self.parameters.clone(),
            },
        );
        self.target = Some(capability.clone());
        Ok(Manifest::Capability(capability))
    }

    fn generate_prefix(&self) -> Option<String> {
        Some(self.options.kind.clone()).filter(|k| !k.is_empty())
    }
}
