//! Test-side aws-chunked decoder.

/// Decoded body: payload bytes plus `(name, value)` trailers.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Decoded {
    pub payload: Vec<u8>,
    pub chunk_sizes: Vec<usize>,
    pub trailers: Vec<(String, String)>,
}

fn read_line<'a>(input: &'a [u8], pos: &mut usize) -> &'a [u8] {
    let rest = &input[*pos..];
    let end = rest
        .windows(2)
        .position(|w| w == b"\r\n")
        .expect("missing CRLF");
    *pos += end + 2;
    &rest[..end]
}

/// Panics on malformed framing.
pub fn decode(input: &[u8]) -> Decoded {
    let mut out = Decoded::default();
    let mut pos = 0;
    loop {
        let size_line = std::str::from_utf8(read_line(input, &mut pos)).unwrap();
        let size = usize::from_str_radix(size_line, 16).unwrap();
        if size == 0 {
            break;
        }
        out.payload.extend_from_slice(&input[pos..pos + size]);
        out.chunk_sizes.push(size);
        pos += size;
        assert_eq!(&input[pos..pos + 2], b"\r\n");
        pos += 2;
    }
    loop {
        let line = read_line(input, &mut pos);
        if line.is_empty() {
            break;
        }
        let line = std::str::from_utf8(line).unwrap();
        let (name, value) = line.split_once(':').unwrap();
        out.trailers.push((name.to_string(), value.to_string()));
    }
    assert_eq!(pos, input.len(), "bytes after the closing CRLF");
    out
}
