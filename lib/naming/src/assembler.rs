use tracing::trace;

use crate::config::NamingConfig;

/// Leading segment shared by every web transaction name.
pub const WEB_TRANSACTION_SEGMENT: &str = "WebTransaction";

/// The full transaction name:
/// `WebTransaction/<framework>/<method>//<operationPart>`.
///
/// The doubled separator is intentional. It stands for the empty route-path
/// segment of the naming convention: GraphQL requests share a single
/// endpoint, so there is no per-route URL template to interpolate where
/// REST-style names would carry one.
pub fn assemble_transaction_name(config: &NamingConfig, operation_part: &str) -> String {
    let name = format!(
        "{}/{}/{}//{}",
        WEB_TRANSACTION_SEGMENT, config.framework_name, config.http_method, operation_part
    );

    trace!("Assembled transaction name: {}", name);

    name
}
