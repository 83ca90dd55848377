//! Defines the configuration for a [`crate::processor::MediaTypeProcessor`]: media type
//! aliases, disabled inference rules and the inference round limit.

use anyhow::Result;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{BufReader, Write};
use std::path::Path;

fn default_aliases() -> BTreeMap<String, String> {
    [
        ("application/x-turtle", "text/turtle"),
        ("text/rdf+n3", "text/n3"),
        ("application/json", "application/ld+json"),
    ]
    .into_iter()
    .map(|(alias, target)| (alias.to_string(), target.to_string()))
    .collect()
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Builder)]
#[builder(setter(into))]
pub struct ProcessorConfig {
    /// Extra media types served by the parser already registered for the mapped type.
    #[serde(default = "default_aliases")]
    #[builder(default = "default_aliases()")]
    pub media_type_aliases: BTreeMap<String, String>,
    /// Names of inference rules that should not run.
    #[serde(default)]
    #[builder(default)]
    pub disabled_inferences: Vec<String>,
    /// Cap on full inference passes; unset runs to a fixpoint.
    #[serde(default)]
    #[builder(default)]
    pub max_inference_rounds: Option<usize>,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            media_type_aliases: default_aliases(),
            disabled_inferences: vec![],
            max_inference_rounds: None,
        }
    }
}

impl ProcessorConfig {
    pub fn builder() -> ProcessorConfigBuilder {
        ProcessorConfigBuilder::default()
    }

    pub fn save_to_file(&self, file: &Path) -> Result<()> {
        let config_str = serde_json::to_string_pretty(&self)?;
        let mut file = std::fs::File::create(file)?;
        file.write_all(config_str.as_bytes())?;
        Ok(())
    }

    pub fn from_file(file: &Path) -> Result<Self> {
        let file = std::fs::File::open(file)?;
        let reader = BufReader::new(file);
        let config: ProcessorConfig = serde_json::from_reader(reader)?;
        Ok(config)
    }

    /// Prints out the current config in a readable way for command line output.
    pub fn print(&self) {
        println!("Configuration:");
        if !self.media_type_aliases.is_empty() {
            println!("  Media Type Aliases:");
            for (alias, target) in &self.media_type_aliases {
                println!("    - {} -> {}", alias, target);
            }
        }
        if !self.disabled_inferences.is_empty() {
            println!("  Disabled Inferences:");
            for name in &self.disabled_inferences {
                println!("    - {}", name);
            }
        }
        if let Some(rounds) = self.max_inference_rounds {
            println!("  Max Inference Rounds: {}", rounds);
        }
    }
}
