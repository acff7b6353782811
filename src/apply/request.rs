use super::{
    AMZ_DECODED_CONTENT_LENGTH, AMZ_TRAILER, CONTENT_ENCODING, CONTENT_LENGTH, TRANSFER_ENCODING,
};
use crate::aws_chunked::{AwsChunkedWrapper, AWS_CHUNKED_ENCODING};
use crate::checksum::{base64_digest_of, ChecksumRegistry};
use crate::context::{ChecksumAlgorithmSpec, ChecksumLocation};
use crate::error::Result;
use crate::http::{Body, HttpRequest};

/// Applies the checksum recorded in `request.context`; no-op when none was.
///
/// A checksum header the caller already set is never replaced, and in that
/// case the body is left as it is.
pub fn apply_request_checksum(
    request: &mut HttpRequest,
    registry: &ChecksumRegistry,
) -> Result<()> {
    let Some(requested) = request.context.checksum.request_algorithm.clone() else {
        return Ok(());
    };
    match requested.location {
        ChecksumLocation::Header => apply_header_checksum(request, &requested, registry)?,
        ChecksumLocation::Trailer => apply_trailer_checksum(request, &requested, registry)?,
    }
    if let Some(companion) = &request.context.checksum.request_algorithm_header {
        request
            .headers
            .insert_if_absent(companion.name.clone(), companion.value.clone());
    }
    Ok(())
}

fn apply_header_checksum(
    request: &mut HttpRequest,
    requested: &ChecksumAlgorithmSpec,
    registry: &ChecksumRegistry,
) -> Result<()> {
    if request.headers.contains(&requested.name) {
        return Ok(());
    }
    let checksum = registry.create(requested.algorithm)?;
    let digest = base64_digest_of(checksum, request.body.buffer()?);
    tracing::debug!(
        algorithm = %requested.algorithm,
        header = %requested.name,
        "computed request checksum header"
    );
    request.headers.insert(requested.name.clone(), digest);
    Ok(())
}

fn apply_trailer_checksum(
    request: &mut HttpRequest,
    requested: &ChecksumAlgorithmSpec,
    registry: &ChecksumRegistry,
) -> Result<()> {
    if request.headers.contains(&requested.name) {
        return Ok(());
    }
    let checksum = registry.create(requested.algorithm)?;

    let headers = &mut request.headers;
    headers.insert(TRANSFER_ENCODING, "chunked");
    headers.append_token(CONTENT_ENCODING, AWS_CHUNKED_ENCODING);
    headers.insert(AMZ_TRAILER, requested.name.clone());
    let body = std::mem::take(&mut request.body);
    if let Some(len) = body.known_length() {
        headers.insert(AMZ_DECODED_CONTENT_LENGTH, len.to_string());
    }
    headers.remove(CONTENT_LENGTH);

    let chunk_size = request.context.client_config.chunk_size;
    let wrapper = AwsChunkedWrapper::new(body.into_reader())
        .with_chunk_size(chunk_size)
        .with_trailer_checksum(requested.name.clone(), checksum);
    tracing::debug!(
        algorithm = %requested.algorithm,
        trailer = %requested.name,
        chunk_size,
        "wrapped request body in aws-chunked encoding"
    );
    request.body = Body::AwsChunked(wrapper);
    Ok(())
}
