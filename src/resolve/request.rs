use super::CallerParams;
use crate::checksum::{ChecksumAlgorithm, ChecksumRegistry, DEFAULT_CHECKSUM_ALGORITHM};
use crate::config::RequestChecksumCalculation;
use crate::context::{ChecksumAlgorithmSpec, ChecksumLocation, RequestAlgorithmHeader};
use crate::error::Result;
use crate::http::HttpRequest;
use crate::model::OperationModel;

/// Picks the request checksum algorithm and placement and stores them in
/// `request.context.checksum`.
///
/// Leaves the context untouched for presigned requests, operations without
/// checksum metadata, when no algorithm applies, and when the caller already
/// set the checksum header. Fails before any I/O when the algorithm is unknown
/// or its backend is not available.
pub fn resolve_request_checksum(
    request: &mut HttpRequest,
    operation: &OperationModel,
    params: &CallerParams,
    registry: &ChecksumRegistry,
) -> Result<()> {
    if request.context.is_presign_request {
        tracing::debug!(operation = %operation.name, "presigned request, no flexible checksum");
        return Ok(());
    }
    if operation.http_checksum.is_none() && !operation.http_checksum_required {
        return Ok(());
    }

    let Some(algorithm) = requested_algorithm(request, operation, params)? else {
        return Ok(());
    };
    registry.check(algorithm)?;

    let name = algorithm.header_name();
    if request.headers.contains(&name) {
        tracing::debug!(header = %name, "checksum header set by caller, skipping");
        return Ok(());
    }

    // Trailers need a streamed body, TLS, and a signing scheme that covers them.
    let config = &request.context.client_config;
    let location = if operation.has_streaming_input
        && request.body.is_stream()
        && request.is_https()
        && config.signature_version.supports_trailers()
    {
        ChecksumLocation::Trailer
    } else {
        ChecksumLocation::Header
    };
    tracing::debug!(
        operation = %operation.name,
        %algorithm,
        %location,
        "resolved request checksum"
    );

    let checksum = &mut request.context.checksum;
    checksum.request_algorithm = Some(ChecksumAlgorithmSpec::new(algorithm, location));
    if operation.request_algorithm_member().is_some() {
        checksum.request_algorithm_header = Some(RequestAlgorithmHeader {
            name: operation.request_algorithm_header().to_string(),
            value: algorithm.as_upper_str().to_string(),
        });
    }
    Ok(())
}

/// Caller's choice, else the default when the operation calls for one.
fn requested_algorithm(
    request: &HttpRequest,
    operation: &OperationModel,
    params: &CallerParams,
) -> Result<Option<ChecksumAlgorithm>> {
    let member = operation.request_algorithm_member();
    if let Some(value) = member.and_then(|m| params.get(m)) {
        return value.parse::<ChecksumAlgorithm>().map(Some);
    }
    let when_supported = request.context.client_config.request_checksum_calculation
        == RequestChecksumCalculation::WhenSupported;
    if operation.request_checksum_required() || (member.is_some() && when_supported) {
        return Ok(Some(DEFAULT_CHECKSUM_ALGORITHM));
    }
    Ok(None)
}
