//! Byte-exact aws-chunked framing.
//!
//! ```text
//! <hex-len>\r\n<payload>\r\n      (repeated, payload non-empty)
//! 0\r\n
//! <trailer-name>:<base64>\r\n     (zero or more)
//! \r\n
//! ```

use crate::checksum::ChecksumAlgorithm;

const CRLF: &[u8] = b"\r\n";

/// Appends one data chunk. `payload` must be non-empty; an empty chunk is the terminator.
pub(crate) fn push_chunk(out: &mut Vec<u8>, payload: &[u8]) {
    debug_assert!(!payload.is_empty());
    out.extend_from_slice(format!("{:x}", payload.len()).as_bytes());
    out.extend_from_slice(CRLF);
    out.extend_from_slice(payload);
    out.extend_from_slice(CRLF);
}

pub(crate) fn push_final_chunk(out: &mut Vec<u8>) {
    out.extend_from_slice(b"0");
    out.extend_from_slice(CRLF);
}

pub(crate) fn push_trailer(out: &mut Vec<u8>, name: &str, value: &str) {
    out.extend_from_slice(name.as_bytes());
    out.push(b':');
    out.extend_from_slice(value.as_bytes());
    out.extend_from_slice(CRLF);
}

pub(crate) fn push_end(out: &mut Vec<u8>) {
    out.extend_from_slice(CRLF);
}

fn hex_digits(mut n: u64) -> u64 {
    let mut digits = 1;
    while n >= 16 {
        n /= 16;
        digits += 1;
    }
    digits
}

fn chunk_overhead(len: u64) -> u64 {
    hex_digits(len) + 2 + len + 2
}

/// Total encoded length of `content_len` payload bytes split into `chunk_size`
/// chunks, followed by the given trailers.
///
/// Exact when every read from the source returns a full chunk; a source that
/// returns short reads produces more, smaller chunks.
pub fn encoded_length(
    content_len: u64,
    chunk_size: usize,
    trailers: &[(&str, ChecksumAlgorithm)],
) -> u64 {
    let chunk_size = chunk_size.max(1) as u64;
    let full = content_len / chunk_size;
    let rest = content_len % chunk_size;

    let mut total = full * chunk_overhead(chunk_size);
    if rest > 0 {
        total += chunk_overhead(rest);
    }
    total += 3; // 0\r\n
    for (name, algorithm) in trailers {
        total += name.len() as u64 + 1 + algorithm.base64_len() as u64 + 2;
    }
    total + 2
}
