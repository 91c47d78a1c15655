// ABOUTME: Test support utilities.
// ABOUTME: Scripted platform and provisioner doubles plus request/record builders.

use std::sync::Once;

// Each test binary only uses some of these modules, so allow dead_code.
#[allow(dead_code)]
pub mod fake_platform;
#[allow(dead_code)]
pub mod scripted;

use nonempty::NonEmpty;
use shipyard::platform::{Certificate, CreateArgs, CreationRequest, DeploymentRecord, Routing};
use shipyard::types::ContextName;
use std::path::PathBuf;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter =
            EnvFilter::from_default_env().add_directive("shipyard=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

#[allow(dead_code)]
pub fn context() -> ContextName {
    ContextName::new("team-x").unwrap()
}

#[allow(dead_code)]
pub fn routing() -> Routing {
    Routing::new(context())
}

#[allow(dead_code)]
pub fn request() -> CreationRequest {
    let mut args = CreateArgs {
        name: Some("my-app".to_string()),
        target: Some("production".to_string()),
        ..Default::default()
    };
    args.env
        .insert("NODE_ENV".to_string(), "production".to_string());
    args.build_env.insert("CI".to_string(), "1".to_string());
    let paths = NonEmpty::from_vec(vec![
        PathBuf::from("/srv/app"),
        PathBuf::from("/srv/shared"),
    ])
    .unwrap();
    CreationRequest::new(paths, args)
}

#[allow(dead_code)]
pub fn record(id: &str) -> DeploymentRecord {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "url": format!("{id}.example.dev"),
        "readyState": "QUEUED",
        "createdAt": 1_700_000_000_000_i64,
        "regions": ["sfo1"],
    }))
    .unwrap()
}

#[allow(dead_code)]
pub fn certificate(domain: &str) -> Certificate {
    serde_json::from_value(serde_json::json!({
        "id": "cert_1",
        "cns": [domain],
    }))
    .unwrap()
}
