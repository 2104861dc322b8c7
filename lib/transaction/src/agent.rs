use std::sync::Arc;

use tracing::trace;

use trace_agent_naming::config::NamingConfig;

use crate::context::TransactionContext;
use crate::listener::TransactionListener;
use crate::transaction::FinishedTransaction;

#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("Framework name is missing. Provide it via 'framework_name' on the builder.")]
    MissingFrameworkName,
}

struct AgentInner {
    config: NamingConfig,
    listeners: Vec<Arc<dyn TransactionListener>>,
}

/// Process-wide entry point of the naming core. Holds the naming
/// configuration and the registered listeners; both are frozen once
/// `build` returns, so transactions share the agent without any locking.
/// Cloning is cheap and hands out another handle to the same state.
#[derive(Clone)]
pub struct TraceAgent {
    inner: Arc<AgentInner>,
}

impl TraceAgent {
    pub fn builder() -> TraceAgentBuilder {
        TraceAgentBuilder::default()
    }

    pub fn config(&self) -> &NamingConfig {
        &self.inner.config
    }

    /// Starts a transaction for one incoming request. The returned context
    /// is owned by that request's continuation chain.
    pub fn begin_transaction(&self) -> TransactionContext {
        TransactionContext::new(self.clone())
    }

    pub(crate) fn emit_finished(&self, finished: &FinishedTransaction) {
        trace!(
            "Publishing finished transaction {} (name={:?}, force_ignore={})",
            finished.id,
            finished.name,
            finished.force_ignore
        );

        for listener in &self.inner.listeners {
            listener.on_finished(finished);
        }
    }
}

pub struct TraceAgentBuilder {
    framework_name: Option<String>,
    http_method: String,
    listeners: Vec<Arc<dyn TransactionListener>>,
}

impl Default for TraceAgentBuilder {
    fn default() -> Self {
        Self {
            framework_name: None,
            http_method: "POST".to_string(),
            listeners: Vec::new(),
        }
    }
}

impl TraceAgentBuilder {
    /// Name of the instrumented framework, e.g. `Expressjs`.
    pub fn framework_name(mut self, framework_name: String) -> Self {
        if !framework_name.is_empty() {
            self.framework_name = Some(framework_name);
        }
        self
    }

    /// HTTP method of the GraphQL endpoint.
    /// Default: `POST`
    pub fn http_method(mut self, http_method: String) -> Self {
        if !http_method.is_empty() {
            self.http_method = http_method;
        }
        self
    }

    /// Starts from an existing [`NamingConfig`] instead of individual
    /// fields.
    pub fn config(mut self, config: NamingConfig) -> Self {
        self.framework_name = Some(config.framework_name);
        self.http_method = config.http_method;
        self
    }

    /// Registers a finished-transaction listener. Registration is only
    /// possible before `build`; the listener list is read-only afterwards.
    pub fn listener(mut self, listener: Arc<dyn TransactionListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    pub fn build(self) -> Result<TraceAgent, AgentError> {
        let framework_name = self
            .framework_name
            .ok_or(AgentError::MissingFrameworkName)?;

        Ok(TraceAgent {
            inner: Arc::new(AgentInner {
                config: NamingConfig {
                    framework_name,
                    http_method: self.http_method,
                },
                listeners: self.listeners,
            }),
        })
    }
}
