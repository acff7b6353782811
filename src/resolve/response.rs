use super::{CallerParams, CHECKSUM_MODE_ENABLED};
use crate::checksum::{ChecksumAlgorithm, ChecksumRegistry};
use crate::config::{ChecksumConfig, ResponseChecksumValidation};
use crate::context::RequestContext;
use crate::model::OperationModel;

/// Stores the algorithms the response may be validated with: the operation's
/// declared list, in order, narrowed to what `registry` supports. Only runs
/// when the caller set the operation's validation-mode parameter.
pub fn resolve_response_checksum(
    context: &mut RequestContext,
    operation: &OperationModel,
    params: &CallerParams,
    registry: &ChecksumRegistry,
) {
    let Some(mode_member) = operation.request_validation_mode_member() else {
        return;
    };
    if operation.response_algorithms().is_empty() || !params.contains_key(mode_member) {
        return;
    }

    let algorithms: Vec<ChecksumAlgorithm> = operation
        .response_algorithms()
        .iter()
        .filter_map(|name| name.parse::<ChecksumAlgorithm>().ok())
        .filter(|alg| registry.supports(*alg))
        .collect();
    tracing::debug!(
        operation = %operation.name,
        algorithms = ?algorithms,
        "resolved response checksum candidates"
    );
    context.checksum.response_algorithms = Some(algorithms);
}

/// Opts the call into response validation when the client validates whenever
/// supported and the caller left the validation-mode parameter unset.
pub fn set_default_checksum_mode(
    params: &mut CallerParams,
    operation: &OperationModel,
    config: &ChecksumConfig,
) {
    if config.response_checksum_validation != ResponseChecksumValidation::WhenSupported {
        return;
    }
    if let Some(member) = operation.request_validation_mode_member() {
        params
            .entry(member.to_string())
            .or_insert_with(|| CHECKSUM_MODE_ENABLED.to_string());
    }
}
