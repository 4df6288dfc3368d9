//! Log output for the onboarding backend.
//!
//! Events from the service crates get a detailed line (timestamp, file:line,
//! span durations). Everything else (tower-http, hyper, reqwest) gets a plain
//! line so request traces stay readable.

use std::io::{self, IsTerminal};
use std::str::FromStr;

use tracing::{Level, Metadata};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer, filter, fmt};

/// Module-path roots of the crates that make up the backend.
pub const SERVICE_TARGETS: &[&str] = &[
    "onboarding_assistant",
    "api",
    "assistant",
    "context_store",
    "ai_llm_service",
];

#[derive(Clone, Debug, Default)]
pub struct ChronoRfc3339Utc;

impl FormatTime for ChronoRfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now();
        w.write_str(&now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
    }
}

/// True when `target` is one of [`SERVICE_TARGETS`] or a module inside one.
/// `api` matches `api::routes` but not `apiary`.
pub fn is_service_target(target: &str) -> bool {
    SERVICE_TARGETS.iter().any(|root| {
        target
            .strip_prefix(root)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
    })
}

fn from_service(meta: &Metadata<'_>) -> bool {
    is_service_target(meta.target())
}

/// Detailed layer for the service crates only.
pub fn service_layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_ansi(io::stdout().is_terminal())
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .event_format(
            fmt::format()
                .compact()
                .with_timer(ChronoRfc3339Utc)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with_filter(filter::filter_fn(from_service))
}

/// Plain layer for dependencies.
pub fn dependency_layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_ansi(io::stdout().is_terminal())
        .with_timer(ChronoRfc3339Utc)
        .with_target(true)
        .with_filter(filter::filter_fn(|meta| !from_service(meta)))
}

/// One `<target>=<level>` directive per service crate.
pub fn service_directives(level: Level) -> Vec<Directive> {
    let level = level.as_str().to_lowercase();
    SERVICE_TARGETS
        .iter()
        .filter_map(|root| Directive::from_str(&format!("{root}={level}")).ok())
        .collect()
}

/// `RUST_LOG` (or `default`) with the service crates set to `level`.
pub fn env_filter_with_level(default: &str, level: Level) -> EnvFilter {
    let base = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    service_directives(level)
        .into_iter()
        .fold(base, |f, d| f.add_directive(d))
}

/// Installs the global subscriber. Fails if one is already set.
pub fn init(default: &str, level: Level) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter_with_level(default, level))
        .with(service_layer())
        .with(dependency_layer())
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_targets_match_on_module_boundaries() {
        assert!(is_service_target("api"));
        assert!(is_service_target("api::routes::ask::ask_question_route"));
        assert!(is_service_target("context_store::supabase"));
        assert!(is_service_target("ai_llm_service::services::gemini_service"));
        assert!(!is_service_target("apiary"));
        assert!(!is_service_target("assistant_client::repl"));
        assert!(!is_service_target("tower_http::trace::on_response"));
    }

    #[test]
    fn one_directive_per_service_crate() {
        let ds: Vec<String> = service_directives(Level::DEBUG)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            ds,
            [
                "onboarding_assistant=debug",
                "api=debug",
                "assistant=debug",
                "context_store=debug",
                "ai_llm_service=debug"
            ]
        );
    }

    #[test]
    fn second_init_is_an_error() {
        // Either this call installs the subscriber or another test already did.
        let _ = init("warn", Level::INFO);
        assert!(init("warn", Level::INFO).is_err());
    }
}
