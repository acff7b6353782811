use crate::checksum::{ChecksumAlgorithm, ChecksumRegistry};
use crate::context::RequestContext;
use crate::error::Result;
use crate::http::{HttpResponse, ResponseBody};
use crate::model::OperationModel;
use crate::streaming::{is_composite_checksum, validate_digest, StreamingChecksumBody};

/// Validates the response body against the first candidate algorithm whose
/// checksum header the response carries.
///
/// Streaming outputs are wrapped so the check happens when the body is read to
/// the end; buffered outputs are checked now. Composite (`-N`) checksums are
/// passed over. The algorithm used is recorded on `response.context`.
pub fn handle_checksum_body(
    response: &mut HttpResponse,
    context: &RequestContext,
    operation: &OperationModel,
    registry: &ChecksumRegistry,
) -> Result<()> {
    let Some(candidates) = context.checksum.response_algorithms.as_deref() else {
        return Ok(());
    };
    let Some((algorithm, expected)) = select_checksum(response, candidates) else {
        tracing::debug!(operation = %operation.name, "no response checksum to validate");
        return Ok(());
    };

    let mut checksum = registry.create(algorithm)?;
    if operation.has_streaming_output {
        let raw = std::mem::take(&mut response.body).into_reader();
        let validating = StreamingChecksumBody::new(raw, checksum, expected);
        response.body = ResponseBody::Validating(validating);
    } else {
        let bytes = match std::mem::take(&mut response.body) {
            ResponseBody::Bytes(b) => b,
            other => other.read_to_vec()?,
        };
        checksum.update(&bytes);
        response.body = ResponseBody::Bytes(bytes);
        validate_digest(&checksum, &expected)?;
    }
    response.context.response_algorithm = Some(algorithm);
    Ok(())
}

fn select_checksum(
    response: &HttpResponse,
    candidates: &[ChecksumAlgorithm],
) -> Option<(ChecksumAlgorithm, String)> {
    for &algorithm in candidates {
        let Some(value) = response.headers.get(&algorithm.header_name()) else {
            continue;
        };
        if is_composite_checksum(value) {
            tracing::debug!(%algorithm, value, "skipping composite checksum");
            continue;
        }
        return Some((algorithm, value.to_string()));
    }
    None
}
