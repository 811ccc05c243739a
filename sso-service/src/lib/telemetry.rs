use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::RunEnvironment;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the environment's default directives.
/// Local runs log human-readable lines, deployed environments log JSON.
pub fn init(environment: RunEnvironment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directives(environment).into());

    let registry = tracing_subscriber::registry().with(filter);

    match environment {
        RunEnvironment::Local => registry.with(fmt::layer()).init(),
        RunEnvironment::Dev | RunEnvironment::Prod => {
            registry.with(fmt::layer().json().with_current_span(true)).init()
        }
    }
}

fn default_directives(environment: RunEnvironment) -> &'static str {
    match environment {
        RunEnvironment::Local | RunEnvironment::Dev => "sso_service=debug,auth=debug,info",
        RunEnvironment::Prod => "info",
    }
}
