use serde::{Deserialize, Serialize};

/// Process-wide naming inputs supplied by the instrumentation layer.
/// Read-only once the agent is running.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NamingConfig {
    /// Name of the instrumented framework, e.g. `Expressjs` or `Fastify`.
    pub framework_name: String,

    /// HTTP method of the GraphQL endpoint.
    #[serde(default = "http_method_default")]
    pub http_method: String,
}

impl NamingConfig {
    pub fn new(framework_name: impl Into<String>) -> Self {
        Self {
            framework_name: framework_name.into(),
            http_method: http_method_default(),
        }
    }
}

fn http_method_default() -> String {
    "POST".to_string()
}
