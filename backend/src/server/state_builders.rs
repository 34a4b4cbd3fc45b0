//! Builders choosing real or fixture adapters for each driven port.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use homework_backend::domain::SolveHomeworkService;
use homework_backend::domain::ports::{
    CompletionProvider, FixtureHomeworkSessionRepository, FixtureIdentityProvider,
    HomeworkSessionRepository, IdentityProvider, UnconfiguredCompletionProvider,
};
use homework_backend::inbound::http::state::HttpState;
use homework_backend::outbound::openai::OpenAiCompletionSource;
use homework_backend::outbound::persistence::DieselHomeworkSessionRepository;
use homework_backend::outbound::supabase::SupabaseIdentityProvider;

use super::ServerConfig;

/// Use the Supabase adapter when credentials are present, otherwise the
/// fixture provider that accepts only the fixture token.
fn build_identity_provider(config: &ServerConfig) -> std::io::Result<Arc<dyn IdentityProvider>> {
    match &config.providers.supabase {
        Some(supabase) => {
            let provider = SupabaseIdentityProvider::new(
                &supabase.project_url,
                supabase.anon_key.clone(),
                config.upstream_timeout,
            )
            .map_err(|err| std::io::Error::other(format!("identity provider: {err}")))?;
            info!(provider = "supabase", "identity provider wired");
            Ok(Arc::new(provider))
        }
        None => {
            info!(provider = "fixture", "identity provider wired");
            Ok(Arc::new(FixtureIdentityProvider))
        }
    }
}

fn build_completion_provider(
    config: &ServerConfig,
) -> std::io::Result<Arc<dyn CompletionProvider>> {
    match &config.providers.openai {
        Some(openai) => {
            let source = OpenAiCompletionSource::new(
                &openai.base_url,
                openai.api_key.clone(),
                config.upstream_timeout,
            )
            .map_err(|err| std::io::Error::other(format!("completion provider: {err}")))?;
            info!(endpoint = %source.endpoint(), "completion provider wired");
            Ok(Arc::new(source))
        }
        None => Ok(Arc::new(UnconfiguredCompletionProvider)),
    }
}

fn build_session_repository(config: &ServerConfig) -> Arc<dyn HomeworkSessionRepository> {
    match &config.db_pool {
        Some(pool) => Arc::new(DieselHomeworkSessionRepository::new(pool.clone())),
        None => Arc::new(FixtureHomeworkSessionRepository::default()),
    }
}

/// Assemble the solve service and wrap it in handler state.
///
/// # Errors
///
/// Returns [`std::io::Error`] when an outbound HTTP client cannot be built.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let service = SolveHomeworkService::new(
        build_identity_provider(config)?,
        build_completion_provider(config)?,
        build_session_repository(config),
    );
    let state = HttpState::new(Arc::new(service)).with_error_policy(config.error_policy);
    Ok(web::Data::new(state))
}
