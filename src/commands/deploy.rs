// ABOUTME: Deploy command implementation.
// ABOUTME: Wires config into the orchestrator and reports the outcome.

use shipyard::certs::PlatformProvisioner;
use shipyard::config::Config;
use shipyard::deploy::{CreateOutcome, Orchestrator, cancel_pair};
use shipyard::error::{Error, Result};
use shipyard::output::Output;

/// Create one deployment from the configuration.
pub async fn deploy(config: Config, target: Option<String>, mut output: Output) -> Result<()> {
    output.start_timer();

    let request = config.creation_request(target.as_deref())?;
    let routing = config.routing();
    let client = config.platform_client()?;
    let provisioner =
        PlatformProvisioner::new(client.clone()).with_wildcard(config.platform.wildcard_certs);
    let orchestrator =
        Orchestrator::new(client, provisioner).with_policy(config.repair_policy());

    let (handle, signal) = cancel_pair();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, cancelling deployment");
            handle.cancel();
        }
    });

    output.progress(&format!(
        "Creating deployment of {} path(s) under {}...",
        request.paths().len(),
        routing.context
    ));

    let result = orchestrator
        .create_deployment(&request, &routing, &signal)
        .await;
    interrupt.abort();
    let report = result?;

    if report.repair_cycles > 0 {
        output.progress(&format!(
            "  → Provisioned missing certificate ({} repair cycle(s))",
            report.repair_cycles
        ));
    }

    match report.outcome {
        CreateOutcome::Created(record) => {
            let location = record
                .url
                .clone()
                .unwrap_or_else(|| record.id.to_string());
            output.success(&format!("Deployment ready: {location}"));
            Ok(())
        }
        CreateOutcome::Rejected(err) => Err(Error::Rejected(err)),
    }
}
