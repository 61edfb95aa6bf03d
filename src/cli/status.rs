//! Status command implementation

use crate::cli::output::{format_status_json, format_status_table, ServiceStatusView};
use crate::cli::StatusArgs;
use crate::config::ServicesConfig;
use crate::locator::{LocatorError, ServiceLocator, ServiceLocators};

async fn probe(locator: &ServiceLocator) -> ServiceStatusView {
    let candidates = locator.candidates().to_vec();
    match locator.locate().await {
        Ok(located) => ServiceStatusView {
            service: locator.service().to_string(),
            reachable: true,
            endpoint: Some(located.endpoint),
            attempt: Some(located.index + 1),
            candidates,
            error: None,
        },
        Err(e) => {
            let error = match e {
                LocatorError::AllFailed { last_error, .. } => last_error.to_string(),
                other => other.to_string(),
            };
            ServiceStatusView {
                service: locator.service().to_string(),
                reachable: false,
                endpoint: None,
                attempt: None,
                candidates,
                error: Some(error),
            }
        }
    }
}

/// Probe every service once.
pub async fn collect_status(
    services: &ServicesConfig,
) -> Result<Vec<ServiceStatusView>, reqwest::Error> {
    let client = reqwest::Client::builder().build()?;
    let locators = ServiceLocators::from_config(services, client);

    let (gateway, bundler, ao_cu, observer) = tokio::join!(
        probe(&locators.gateway),
        probe(&locators.bundler),
        probe(&locators.ao_cu),
        probe(&locators.observer),
    );
    Ok(vec![gateway, bundler, ao_cu, observer])
}

/// Handle `ario-admin status` command
pub async fn handle_status(
    args: &StatusArgs,
    services: &ServicesConfig,
) -> Result<String, Box<dyn std::error::Error>> {
    let statuses = collect_status(services).await?;

    if args.json {
        Ok(format_status_json(&statuses)?)
    } else {
        Ok(format_status_table(&statuses))
    }
}
