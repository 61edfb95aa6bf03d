//! Structured logging helpers
//!
//! Filter directive construction for `tracing-subscriber` and the request ID
//! middleware that correlates a dashboard request with the gateway call it
//! triggers.

pub mod middleware;

pub use middleware::{generate_request_id, propagate_request_id, RequestId, REQUEST_ID_HEADER};

/// Build filter directives string from LoggingConfig
///
/// The base level comes first, followed by one `ario_admin::<module>=<level>`
/// directive per configured component.
///
/// # Examples
///
/// ```
/// use ario_admin::config::{LogFormat, LoggingConfig};
/// use ario_admin::logging::build_filter_directives;
/// use std::collections::HashMap;
///
/// let mut component_levels = HashMap::new();
/// component_levels.insert("locator".to_string(), "debug".to_string());
///
/// let config = LoggingConfig {
///     level: "info".to_string(),
///     format: LogFormat::Pretty,
///     component_levels: Some(component_levels),
/// };
///
/// assert_eq!(build_filter_directives(&config), "info,ario_admin::locator=debug");
/// ```
pub fn build_filter_directives(config: &crate::config::LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    if let Some(component_levels) = &config.component_levels {
        let mut components: Vec<_> = component_levels.iter().collect();
        components.sort();
        for (component, level) in components {
            filter_str.push_str(&format!(",ario_admin::{}={}", component, level));
        }
    }

    filter_str
}
