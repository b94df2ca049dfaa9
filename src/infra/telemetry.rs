use std::sync::Once;

use metrics::{Unit, describe_counter, describe_histogram};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::application::admin::posts::{
    METRIC_EDITOR_LOAD_MS, METRIC_UPDATE_FAILED_TOTAL, METRIC_UPDATE_TOTAL,
    METRIC_VALIDATION_FAILED_TOTAL,
};
use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Install a global tracing subscriber using the provided logging settings.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    describe_metrics();

    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
        LogFormat::Compact => fmt::layer().compact().with_target(true).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })
}

fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_histogram!(
            METRIC_EDITOR_LOAD_MS,
            Unit::Milliseconds,
            "Time spent fetching the post and category list for the editor."
        );
        describe_counter!(
            METRIC_UPDATE_TOTAL,
            Unit::Count,
            "Total number of dispatched post updates, labelled by status."
        );
        describe_counter!(
            METRIC_UPDATE_FAILED_TOTAL,
            Unit::Count,
            "Total number of post updates rejected by the store."
        );
        describe_counter!(
            METRIC_VALIDATION_FAILED_TOTAL,
            Unit::Count,
            "Total number of submissions stopped by field validation."
        );
    });
}
