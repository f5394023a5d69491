//! Model client configuration: validation and presets.
//!
//! The configuration is YAML text owned by the agent runtime. The library does
//! not parse it; a candidate is accepted when every required client section
//! key appears in the text.

use crate::error::{CoreError, Result};

/// Client sections every model configuration must define.
pub const REQUIRED_CLIENTS: [&str; 4] = [
    "orchestrator_client",
    "coder_client",
    "web_surfer_client",
    "file_surfer_client",
];

/// Whether `text` mentions every key in [`REQUIRED_CLIENTS`].
pub fn validate_model_config(text: &str) -> bool {
    REQUIRED_CLIENTS.iter().all(|client| text.contains(client))
}

/// Like [`validate_model_config`], but reports which keys are missing.
pub fn check_model_config(text: &str) -> Result<()> {
    let missing: Vec<String> = REQUIRED_CLIENTS
        .iter()
        .filter(|client| !text.contains(*client))
        .map(|client| client.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CoreError::ModelConfig { missing })
    }
}

const CLIENT_ALIASES: &str = "orchestrator_client: *client
coder_client: *client
web_surfer_client: *client
file_surfer_client: *client
action_guard_client: *client
";

const AZURE_AI_FOUNDRY_CLIENT: &str = r#"model_config: &client
  provider: AzureOpenAIChatCompletionClient
  config:
    model: gpt-4o
    azure_endpoint: "<YOUR ENDPOINT>"
    azure_deployment: "<YOUR DEPLOYMENT>"
    api_version: "2024-10-21"
    azure_ad_token_provider:
      provider: autogen_ext.auth.azure.AzureTokenProvider
      config:
        provider_kind: DefaultAzureCredential
        scopes:
          - https://cognitiveservices.azure.com/.default
    max_retries: 10
"#;

const OPENROUTER_CLIENT: &str = r#"model_config: &client
  provider: OpenAIChatCompletionClient
  config:
    model: "MODEL_NAME"
    base_url: "https://openrouter.ai/api/v1"
    api_key: "KEY"
    model_info: # change per model
       vision: true
       function_calling: true # required true for file_surfer
       json_output: false
       family: unknown
       structured_output: false
  max_retries: 5
"#;

const OLLAMA_CLIENT: &str = r#"model_config: &client
  provider: autogen_ext.models.ollama.OllamaChatCompletionClient
  config:
    model: "qwen2.5vl:32b" # change to your desired Ollama model
    host: "http://localhost:11434" # change to your ollama host
    model_info: # change per model you use
      vision: true
      function_calling: true
      json_output: false
      family: unknown
      structured_output: false
  max_retries: 5
"#;

/// A ready-made model configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelPreset {
    AzureAiFoundry,
    OpenRouter,
    Ollama,
    /// OpenAI client for the named model
    OpenAi(String),
}

impl ModelPreset {
    /// Named templates (`azure-ai-foundry`, `openrouter`, `ollama`) map to
    /// their preset; any other name is taken as an OpenAI model.
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "azure-ai-foundry" => ModelPreset::AzureAiFoundry,
            "openrouter" => ModelPreset::OpenRouter,
            "ollama" => ModelPreset::Ollama,
            model => ModelPreset::OpenAi(model.to_string()),
        }
    }

    pub fn label(&self) -> String {
        match self {
            ModelPreset::AzureAiFoundry => "Azure AI Foundry".to_string(),
            ModelPreset::OpenRouter => "OpenRouter".to_string(),
            ModelPreset::Ollama => "Ollama".to_string(),
            ModelPreset::OpenAi(model) => format!("OpenAI {model}"),
        }
    }

    /// The YAML text of the preset.
    pub fn yaml(&self) -> String {
        match self {
            ModelPreset::AzureAiFoundry => format!("{AZURE_AI_FOUNDRY_CLIENT}\n{CLIENT_ALIASES}"),
            ModelPreset::OpenRouter => format!("{OPENROUTER_CLIENT}\n{CLIENT_ALIASES}"),
            ModelPreset::Ollama => format!("{OLLAMA_CLIENT}\n{CLIENT_ALIASES}"),
            ModelPreset::OpenAi(model) => generate_openai_model_config(model),
        }
    }
}

/// Configuration that routes every client to one OpenAI model.
pub fn generate_openai_model_config(model: &str) -> String {
    format!(
        "model_config: &client
  provider: OpenAIChatCompletionClient
  config:
    model: {model}
  max_retries: 10

{CLIENT_ALIASES}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = "orchestrator_client: *c\ncoder_client: *c\nweb_surfer_client: *c\nfile_surfer_client: *c\n";

    #[test]
    fn test_all_tokens_present_is_valid() {
        assert!(validate_model_config(FULL));
        assert!(check_model_config(FULL).is_ok());
    }

    #[test]
    fn test_removing_any_token_invalidates() {
        for client in REQUIRED_CLIENTS {
            let text = FULL.replace(client, "removed");
            assert!(!validate_model_config(&text), "{client} not required");
            match check_model_config(&text) {
                Err(CoreError::ModelConfig { missing }) => assert_eq!(missing, vec![client]),
                other => panic!("unexpected result: {other:?}"),
            }
        }
    }

    #[test]
    fn test_containment_is_textual() {
        // Keys inside comments still count; no YAML parsing is done.
        let text = "# orchestrator_client coder_client web_surfer_client file_surfer_client";
        assert!(validate_model_config(text));
        assert!(!validate_model_config(""));
    }

    #[test]
    fn test_every_preset_is_valid() {
        for name in ["azure-ai-foundry", "openrouter", "ollama", "gpt-4o-2024-08-06"] {
            let preset = ModelPreset::from_name(name);
            assert!(validate_model_config(&preset.yaml()), "{name} preset invalid");
        }
    }

    #[test]
    fn test_openai_preset_names_model() {
        let preset = ModelPreset::from_name("o4-mini-2025-04-16");
        assert_eq!(preset, ModelPreset::OpenAi("o4-mini-2025-04-16".into()));
        assert!(preset.yaml().contains("model: o4-mini-2025-04-16"));
    }
}
