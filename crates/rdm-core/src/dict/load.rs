use std::panic;
use std::thread;

use tracing::debug;

use super::{DictError, Line, HEADER_END};

/// Split off the header block: every line up to and including `...`.
pub(super) fn split_header<'a>(
    lines: &'a [&'a str],
) -> Result<(&'a [&'a str], &'a [&'a str]), DictError> {
    let end = lines
        .iter()
        .position(|l| *l == HEADER_END)
        .ok_or(DictError::MissingHeader)?;
    if end + 1 < 2 {
        return Err(DictError::MissingHeader);
    }
    Ok(lines.split_at(end + 1))
}

/// Parse body lines on up to `threads` workers.
///
/// `first_index` is the source index of `body[0]`. Output keeps source
/// order. On failure the error for the earliest malformed line is returned.
pub(super) fn parse_lines(
    body: &[&str],
    first_index: usize,
    threads: usize,
) -> Result<Vec<Line>, DictError> {
    let parse_chunk = |offset: usize, chunk: &[&str]| -> Result<Vec<Line>, DictError> {
        chunk
            .iter()
            .enumerate()
            .map(|(i, raw)| Line::parse(first_index + offset + i, raw))
            .collect()
    };

    if threads <= 1 || body.len() < 2 {
        return parse_chunk(0, body);
    }

    let chunk_size = body.len().div_ceil(threads);
    debug!(lines = body.len(), threads, chunk_size, "parsing in parallel");

    let chunks: Vec<Result<Vec<Line>, DictError>> = thread::scope(|s| {
        let handles: Vec<_> = body
            .chunks(chunk_size)
            .enumerate()
            .map(|(n, chunk)| s.spawn(move || parse_chunk(n * chunk_size, chunk)))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|e| panic::resume_unwind(e)))
            .collect()
    });

    let mut lines = Vec::with_capacity(body.len());
    for chunk in chunks {
        lines.extend(chunk?);
    }
    Ok(lines)
}
