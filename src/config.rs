//! Session configuration: provider selection, credentials, and the
//! companion persona.
//!
//! A [`SessionConfig`] is fixed at connect time and immutable for the
//! lifetime of a connection; changing provider or key requires an explicit
//! reconnect.

/// The companion persona sent as the system instruction on every request.
///
/// The crisis-resource disclosure (988 lifeline) is a content contract
/// carried by this prompt, not something the orchestration code enforces.
pub const SYSTEM_PROMPT: &str = "You are Solace, a warm and empathetic mental health companion. Your role is to:
- Listen deeply and reflect back what you hear with genuine compassion
- Validate emotions without judgment
- Ask thoughtful, open-ended questions to help the user explore their feelings
- Offer gentle, evidence-based coping strategies when appropriate (breathing exercises, grounding techniques, journaling prompts)
- Recognize when someone may need professional help and gently encourage it
- Never diagnose or prescribe
- Keep responses concise (2-4 sentences usually), warm, and conversational
- Use simple, accessible language
- If someone expresses suicidal ideation or self-harm, ALWAYS provide crisis resources: 988 Suicide & Crisis Lifeline (call/text 988 in the US)

Always respond with warmth, patience, and genuine care.";

/// Conversation starters offered by the front-end.
pub const QUICK_PROMPTS: [&str; 6] = [
    "I'm feeling overwhelmed",
    "I can't sleep",
    "I need to talk",
    "I feel lonely",
    "I'm anxious",
    "Help me breathe",
];

/// Default reply length ceiling, in tokens.
pub const DEFAULT_MAX_TOKENS: u32 = 150;

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Which chat-completion backend to talk to.
///
/// Both backends expose the same OpenAI-style surface; the variant only
/// selects endpoint URL, default model, and display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    OpenRouter,
}

impl ProviderKind {
    /// Base URL for this provider's API.
    pub fn base_url(self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "https://api.openai.com/v1",
            ProviderKind::OpenRouter => "https://openrouter.ai/api/v1",
        }
    }

    /// Default model identifier for this provider.
    pub fn default_model(self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "gpt-3.5-turbo",
            ProviderKind::OpenRouter => "anthropic/claude-3-haiku",
        }
    }

    /// Human-readable provider name.
    pub fn label(self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OpenAI",
            ProviderKind::OpenRouter => "OpenRouter",
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn key_env_var(self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::OpenRouter => "OPENROUTER_API_KEY",
        }
    }

    /// Parse a provider name as entered by the user or from the
    /// `SOLACE_PROVIDER` environment variable.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "openai" => Some(ProviderKind::OpenAi),
            "openrouter" => Some(ProviderKind::OpenRouter),
            _ => None,
        }
    }
}

/// Configuration fixed for the lifetime of one connection.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Which backend to use
    pub provider: ProviderKind,
    /// User-supplied API credential
    pub api_key: String,
    /// System instruction prepended to every request
    pub system_prompt: String,
    /// Model identifier sent with completion requests
    pub model: String,
    /// Reply length ceiling
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl SessionConfig {
    /// Create a config with the provider's defaults and the Solace persona.
    pub fn new(provider: ProviderKind, api_key: String) -> Self {
        Self {
            provider,
            api_key,
            system_prompt: SYSTEM_PROMPT.to_string(),
            model: provider.default_model().to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Override the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }
}

/// Pick a provider and credential from the environment, if any.
///
/// `SOLACE_PROVIDER` forces a provider (its key must also be set);
/// otherwise OpenRouter is preferred when both keys are present, matching
/// the front-end's default provider selection.
pub fn provider_from_env() -> Option<(ProviderKind, String)> {
    let key_for = |kind: ProviderKind| {
        std::env::var(kind.key_env_var())
            .ok()
            .filter(|k| !k.trim().is_empty())
            .map(|k| (kind, k))
    };

    if let Ok(name) = std::env::var("SOLACE_PROVIDER") {
        if let Some(kind) = ProviderKind::parse(&name) {
            return key_for(kind);
        }
        tracing::warn!("unrecognized SOLACE_PROVIDER value: {name:?}");
        return None;
    }

    key_for(ProviderKind::OpenRouter).or_else(|| key_for(ProviderKind::OpenAi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_defaults() {
        assert_eq!(ProviderKind::OpenAi.default_model(), "gpt-3.5-turbo");
        assert_eq!(
            ProviderKind::OpenRouter.default_model(),
            "anthropic/claude-3-haiku"
        );
        assert!(ProviderKind::OpenAi.base_url().starts_with("https://api.openai.com"));
        assert!(ProviderKind::OpenRouter.base_url().starts_with("https://openrouter.ai"));
    }

    #[test]
    fn test_provider_parse() {
        assert_eq!(ProviderKind::parse("openai"), Some(ProviderKind::OpenAi));
        assert_eq!(ProviderKind::parse("OpenRouter"), Some(ProviderKind::OpenRouter));
        assert_eq!(ProviderKind::parse("  openrouter "), Some(ProviderKind::OpenRouter));
        assert_eq!(ProviderKind::parse("anthropic"), None);
    }

    #[test]
    fn test_session_config_defaults() {
        let config = SessionConfig::new(ProviderKind::OpenRouter, "sk-test".to_string());
        assert_eq!(config.model, "anthropic/claude-3-haiku");
        assert_eq!(config.max_tokens, 150);
        assert!((config.temperature - 0.7).abs() < f32::EPSILON);
        assert!(config.system_prompt.contains("988"));
    }

    #[test]
    fn test_session_config_builders() {
        let config = SessionConfig::new(ProviderKind::OpenAi, "sk-test".to_string())
            .with_model("gpt-4o-mini")
            .with_system_prompt("be brief");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.system_prompt, "be brief");
    }
}
