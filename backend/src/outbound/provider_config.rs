//! Provider credentials read from the process environment.
//!
//! Release builds insist on every credential. Debug builds log a warning
//! for anything missing and leave that slot empty so the server can wire a
//! fixture or unconfigured adapter in its place.

use mockable::Env;
use reqwest::Url;
use tracing::warn;
use zeroize::Zeroizing;

pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const OPENAI_BASE_URL_ENV: &str = "OPENAI_BASE_URL";
pub const SUPABASE_URL_ENV: &str = "SUPABASE_URL";
pub const SUPABASE_ANON_KEY_ENV: &str = "SUPABASE_ANON_KEY";
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Build mode for provider configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Missing credentials degrade to fixtures with a warning.
    Debug,
    /// Missing or invalid credentials abort startup.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Chat-completion provider credentials.
#[derive(Clone)]
pub struct OpenAiSettings {
    pub api_key: Zeroizing<String>,
    pub base_url: Url,
}

/// Identity provider project coordinates.
#[derive(Clone)]
pub struct SupabaseSettings {
    pub project_url: Url,
    pub anon_key: Zeroizing<String>,
}

/// Resolved provider settings. `None` marks a slot debug mode left empty.
#[derive(Clone, Default)]
pub struct ProviderSettings {
    pub openai: Option<OpenAiSettings>,
    pub supabase: Option<SupabaseSettings>,
    pub database_url: Option<Zeroizing<String>>,
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field(
                "openai_base_url",
                &self.openai.as_ref().map(|openai| openai.base_url.as_str()),
            )
            .field(
                "supabase_url",
                &self
                    .supabase
                    .as_ref()
                    .map(|supabase| supabase.project_url.as_str()),
            )
            .field("database_configured", &self.database_url.is_some())
            .finish()
    }
}

/// Errors raised while validating provider configuration.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ProviderConfigError {
    /// A required environment variable is missing or blank.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A URL variable does not parse.
    #[error("invalid URL in {name}='{value}': {reason}")]
    InvalidUrl {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Read provider settings from `env`.
///
/// # Examples
///
/// ```rust
/// use homework_backend::outbound::provider_config::{
///     BuildMode, provider_settings_from_env,
/// };
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|_| None);
///
/// let settings = provider_settings_from_env(&env, BuildMode::Debug)
///     .expect("debug builds tolerate missing credentials");
/// assert!(settings.openai.is_none());
/// ```
///
/// # Errors
///
/// In [`BuildMode::Release`], returns [`ProviderConfigError`] for the first
/// missing credential or unparsable URL.
pub fn provider_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<ProviderSettings, ProviderConfigError> {
    Ok(ProviderSettings {
        openai: openai_from_env(env, mode)?,
        supabase: supabase_from_env(env, mode)?,
        database_url: database_url_from_env(env, mode)?,
    })
}

fn openai_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<Option<OpenAiSettings>, ProviderConfigError> {
    let Some(api_key) = secret(env, OPENAI_API_KEY_ENV) else {
        return missing(
            mode,
            OPENAI_API_KEY_ENV,
            "OPENAI_API_KEY not set; solve requests will fail with a configuration error",
        );
    };
    let base_url = match non_blank(env, OPENAI_BASE_URL_ENV) {
        None => parse_url(OPENAI_BASE_URL_ENV, DEFAULT_OPENAI_BASE_URL)?,
        Some(value) => match parse_url(OPENAI_BASE_URL_ENV, &value) {
            Ok(url) => url,
            Err(error) if mode.is_debug() => {
                warn!(%error, "invalid OPENAI_BASE_URL; using default");
                parse_url(OPENAI_BASE_URL_ENV, DEFAULT_OPENAI_BASE_URL)?
            }
            Err(error) => return Err(error),
        },
    };
    Ok(Some(OpenAiSettings { api_key, base_url }))
}

fn supabase_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<Option<SupabaseSettings>, ProviderConfigError> {
    const FALLBACK: &str = "identity provider not configured; accepting fixture tokens only";

    let Some(raw_url) = non_blank(env, SUPABASE_URL_ENV) else {
        return missing(mode, SUPABASE_URL_ENV, FALLBACK);
    };
    let Some(anon_key) = secret(env, SUPABASE_ANON_KEY_ENV) else {
        return missing(mode, SUPABASE_ANON_KEY_ENV, FALLBACK);
    };
    match parse_url(SUPABASE_URL_ENV, &raw_url) {
        Ok(project_url) => Ok(Some(SupabaseSettings {
            project_url,
            anon_key,
        })),
        Err(error) if mode.is_debug() => {
            warn!(%error, "{FALLBACK}");
            Ok(None)
        }
        Err(error) => Err(error),
    }
}

fn database_url_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<Option<Zeroizing<String>>, ProviderConfigError> {
    match secret(env, DATABASE_URL_ENV) {
        Some(url) => Ok(Some(url)),
        None => missing(
            mode,
            DATABASE_URL_ENV,
            "DATABASE_URL not set; homework sessions will not be stored",
        ),
    }
}

fn missing<T>(
    mode: BuildMode,
    name: &'static str,
    warning: &str,
) -> Result<Option<T>, ProviderConfigError> {
    if mode.is_debug() {
        warn!(variable = name, "{warning}");
        Ok(None)
    } else {
        Err(ProviderConfigError::MissingEnv { name })
    }
}

fn non_blank<E: Env>(env: &E, name: &str) -> Option<String> {
    env.string(name).filter(|value| !value.trim().is_empty())
}

fn secret<E: Env>(env: &E, name: &str) -> Option<Zeroizing<String>> {
    non_blank(env, name).map(Zeroizing::new)
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, ProviderConfigError> {
    Url::parse(value).map_err(|error| ProviderConfigError::InvalidUrl {
        name,
        value: value.to_owned(),
        reason: error.to_string(),
    })
}
