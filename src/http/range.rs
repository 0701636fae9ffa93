//! Byte range requests (RFC 7233), single range only

/// Inclusive byte range already clamped to the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    pub const fn length(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn content_range(&self, total: usize) -> String {
        format!("bytes {}-{}/{total}", self.start, self.end)
    }
}

/// What a `Range` header asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOutcome {
    /// No header, another unit, multiple ranges or garbage: send everything
    Full,
    Partial(ByteRange),
    /// Answer 416
    Unsatisfiable,
}

/// Resolve a `Range` header against a body of `total` bytes
///
/// ```
/// use demo_server::http::range::{resolve, ByteRange, RangeOutcome};
/// assert_eq!(resolve(Some("bytes=0-99"), 1000), RangeOutcome::Partial(ByteRange { start: 0, end: 99 }));
/// assert_eq!(resolve(None, 1000), RangeOutcome::Full);
/// ```
pub fn resolve(header: Option<&str>, total: usize) -> RangeOutcome {
    let Some(spec) = header.and_then(|h| h.trim().strip_prefix("bytes=")) else {
        return RangeOutcome::Full;
    };
    if spec.contains(',') {
        return RangeOutcome::Full;
    }
    let Some((first, last)) = spec.split_once('-') else {
        return RangeOutcome::Full;
    };
    let (first, last) = (first.trim(), last.trim());

    if first.is_empty() {
        // "-n": the final n bytes
        let Ok(n) = last.parse::<usize>() else {
            return RangeOutcome::Full;
        };
        if n == 0 || total == 0 {
            return RangeOutcome::Unsatisfiable;
        }
        return RangeOutcome::Partial(ByteRange {
            start: total.saturating_sub(n),
            end: total - 1,
        });
    }

    let Ok(start) = first.parse::<usize>() else {
        return RangeOutcome::Full;
    };
    if start >= total {
        return RangeOutcome::Unsatisfiable;
    }
    let end = if last.is_empty() {
        total - 1
    } else {
        match last.parse::<usize>() {
            Ok(e) if e < start => return RangeOutcome::Unsatisfiable,
            Ok(e) => e.min(total - 1),
            Err(_) => return RangeOutcome::Full,
        }
    };
    RangeOutcome::Partial(ByteRange { start, end })
}
