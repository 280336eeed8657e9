use std::io::Read;

use flate2::read::GzDecoder;
use receiver_core::{END_MARKER, Event};
use serde_json::Deserializer;

use crate::types::{IngestError, Result, StatUpdate};

/// Decodes a single JSON object into an [`Event`].
pub fn decode_event(fragment: &[u8]) -> Result<Event> {
    Ok(serde_json::from_slice(fragment)?)
}

/// Decodes a request body into events, in arrival order.
///
/// The body is either a JSON array of events or a sequence of concatenated
/// event objects with optional whitespace between them. The first fragment
/// that fails to decode rejects the whole body.
pub fn decode_batch(body: &[u8]) -> Result<Vec<Event>> {
    let Some(start) = body.iter().position(|byte| !byte.is_ascii_whitespace()) else {
        return Ok(Vec::new());
    };
    let body = &body[start..];
    if body[0] == b'[' {
        return Ok(serde_json::from_slice(body)?);
    }

    let mut events = Vec::new();
    for event in Deserializer::from_slice(body).into_iter::<Event>() {
        events.push(event?);
    }
    Ok(events)
}

/// Returns the generated count declared by an end-marker payload, or `None`
/// when the payload is ordinary data.
///
/// The count follows the `---end---` token, optionally after whitespace and
/// one `:` or `=` separator. Negative counts are rejected.
pub fn end_marker_count(source: &str, payload: &str) -> Result<Option<u64>> {
    let Some(rest) = payload.strip_prefix(END_MARKER) else {
        return Ok(None);
    };
    let rest = rest.trim_start();
    let digits = rest.strip_prefix([':', '=']).unwrap_or(rest).trim();
    digits
        .parse::<u64>()
        .map(Some)
        .map_err(|_| IngestError::GeneratedCount {
            source_name: source.to_string(),
            payload: payload.to_string(),
        })
}

/// Turns a decoded event into the counter changes for its source.
pub fn stat_update(event: Event) -> Result<StatUpdate> {
    let generated_count = end_marker_count(&event.source, &event.event)?;
    Ok(StatUpdate {
        bytes: event.event.len() as u64,
        source: event.source,
        generated_count,
    })
}

/// Inflates a gzip body, refusing to produce more than `limit` bytes.
pub fn gunzip(raw: &[u8], limit: usize) -> Result<Vec<u8>> {
    let mut decoded = Vec::new();
    GzDecoder::new(raw)
        .take((limit as u64).saturating_add(1))
        .read_to_end(&mut decoded)
        .map_err(IngestError::Gzip)?;
    if decoded.len() > limit {
        return Err(IngestError::BodyTooLarge { limit });
    }
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::{Compression, write::GzEncoder};

    use super::*;

    #[test]
    fn decode_event_maps_fields() {
        let event = decode_event(
            br#"{"time":"5","host":"h","source":"app1","sourcetype":"st","index":"i","event":"payload"}"#,
        )
        .expect("event");
        assert_eq!(event.time, Some(5.0));
        assert_eq!(event.host, "h");
        assert_eq!(event.source, "app1");
        assert_eq!(event.source_type, "st");
        assert_eq!(event.index, "i");
        assert_eq!(event.event, "payload");
        assert!(event.fields.is_none());
    }

    #[test]
    fn decode_event_rejects_bad_time() {
        let err = decode_event(br#"{"time":"abc","event":"x"}"#).expect_err("bad time");
        assert!(matches!(err, IngestError::MalformedEvent(_)));
    }

    #[test]
    fn decode_batch_reads_concatenated_objects() {
        let body = br#"{"source":"a","event":"1"}{"source":"b","event":"22"}
{"source":"a","event":"333"}
"#;
        let events = decode_batch(body).expect("batch");
        let payloads: Vec<_> = events.iter().map(|event| event.event.as_str()).collect();
        assert_eq!(payloads, vec!["1", "22", "333"]);
        assert_eq!(events[1].source, "b");
    }

    #[test]
    fn decode_batch_reads_array() {
        let body = br#"  [{"source":"a","event":"1"},{"source":"a","event":"2"}]"#;
        assert_eq!(decode_batch(body).expect("batch").len(), 2);
    }

    #[test]
    fn decode_batch_whitespace_only_is_empty() {
        assert!(decode_batch(b" \n\t").expect("batch").is_empty());
    }

    #[test]
    fn decode_batch_rejects_trailing_garbage() {
        let body = br#"{"source":"a","event":"1"} not-json"#;
        assert!(matches!(
            decode_batch(body),
            Err(IngestError::MalformedEvent(_))
        ));
    }

    #[test]
    fn decode_batch_rejects_truncated_fragment() {
        let body = br#"{"source":"a","event":"1"}{"source":"a","#;
        assert!(decode_batch(body).is_err());
    }

    #[test]
    fn end_marker_count_parses_suffix() {
        assert_eq!(end_marker_count("a", "---end---42").expect("count"), Some(42));
        assert_eq!(end_marker_count("a", "---end--- 42").expect("count"), Some(42));
        assert_eq!(end_marker_count("a", "---end---:7\n").expect("count"), Some(7));
        assert_eq!(end_marker_count("a", "---end---=0").expect("count"), Some(0));
    }

    #[test]
    fn short_or_unrelated_payloads_are_not_end_markers() {
        assert_eq!(end_marker_count("a", "---end").expect("plain"), None);
        assert_eq!(end_marker_count("a", "").expect("plain"), None);
        assert_eq!(end_marker_count("a", "é").expect("plain"), None);
        assert_eq!(end_marker_count("a", "x---end---42").expect("plain"), None);
    }

    #[test]
    fn end_marker_with_bad_count_is_an_error() {
        let err = end_marker_count("app1", "---end---abc").expect_err("bad count");
        match err {
            IngestError::GeneratedCount {
                source_name,
                payload,
            } => {
                assert_eq!(source_name, "app1");
                assert_eq!(payload, "---end---abc");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(end_marker_count("app1", "---end---").is_err());
    }

    #[test]
    fn negative_generated_count_is_an_error() {
        assert!(matches!(
            end_marker_count("app1", "---end----5"),
            Err(IngestError::GeneratedCount { .. })
        ));
        assert!(matches!(
            end_marker_count("app1", "---end---: -1"),
            Err(IngestError::GeneratedCount { .. })
        ));
    }

    #[test]
    fn stat_update_counts_payload_bytes() {
        let update = stat_update(Event::new("app1", "héllo")).expect("update");
        assert_eq!(update.source, "app1");
        assert_eq!(update.bytes, 6);
        assert_eq!(update.generated_count, None);

        let marker = stat_update(Event::new("app1", "---end---10")).expect("marker");
        assert_eq!(marker.bytes, 11);
        assert_eq!(marker.generated_count, Some(10));
    }

    #[test]
    fn gunzip_round_trips_and_rejects_garbage() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(br#"{"source":"a","event":"1"}"#)
            .expect("write");
        let compressed = encoder.finish().expect("finish");
        let decoded = gunzip(&compressed, 1024).expect("gunzip");
        assert_eq!(decode_batch(&decoded).expect("batch").len(), 1);

        assert!(matches!(gunzip(b"plain", 1024), Err(IngestError::Gzip(_))));
    }

    #[test]
    fn gunzip_stops_at_the_decoded_limit() {
        let body = br#"{"source":"a","event":"x"}"#.repeat(10_000);
        let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
        encoder.write_all(&body).expect("write");
        let compressed = encoder.finish().expect("finish");
        assert!(compressed.len() < 4096);

        assert!(matches!(
            gunzip(&compressed, 4096),
            Err(IngestError::BodyTooLarge { limit: 4096 })
        ));
        assert_eq!(gunzip(&compressed, body.len()).expect("exact fit"), body);
    }
}
