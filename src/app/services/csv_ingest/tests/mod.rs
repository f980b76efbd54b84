//! Test utilities for CSV ingestion testing
//!
//! Helpers for building synthetic chunk streams and the sample payloads
//! shared by the test modules below.

use futures::stream::{self, Stream};

use crate::{CafeError, Result};


/// Summary-sheet export with quoting, a pass-through column and a trailing blank row
pub fn sample_summary_csv() -> &'static str {
    "\"Cafe Name\",City,Google Maps Link,Avg Wifi Quality,Avg Quietness,Avg Power Outlets Availability,Avg Coffee Quality,Vibe\r\n\
     \"Bean There, Done That\",Springfield,https://maps.example/bean,5,4,3,4,cosy\r\n\
     Mug Life,Shelbyville,,2,1,0,5,\r\n\
     \"The \"\"Daily\"\" Grind\",Capital City,https://maps.example/grind,4,5,2,3,busy\r\n\
     ,,,,,,,\r\n"
}

/// Split a payload into chunks of `size` bytes
pub fn chunked(payload: &str, size: usize) -> Vec<Vec<u8>> {
    payload
        .as_bytes()
        .chunks(size.max(1))
        .map(<[u8]>::to_vec)
        .collect()
}

/// Stream of successful chunks
pub fn ok_stream(chunks: Vec<Vec<u8>>) -> impl Stream<Item = Result<Vec<u8>>> {
    stream::iter(chunks.into_iter().map(Ok))
}

/// Stream that delivers `chunks` then fails with a transport error
pub fn failing_stream(chunks: Vec<Vec<u8>>) -> impl Stream<Item = Result<Vec<u8>>> {
    let failure = CafeError::transport("https://sheet.example/export.csv", "connection reset");
    stream::iter(
        chunks
            .into_iter()
            .map(Ok)
            .chain(std::iter::once(Err(failure))),
    )
}
