//! Writer roundtrip integration test.
//!
//! Sends a batched item sequence over an in-memory duplex transport with a
//! length-prefixed codec, reads the bytes back, and verifies every item
//! survived the trip in order across message boundaries.

use batchstream::error::BatchError;
use batchstream::enums::{DriveState, PayloadKind};
use batchstream::models::sinks::message_sink::MessageSink;
use batchstream::models::writers::message_writer::{send_batches_to_stream, BatchMessageWriter};
use batchstream::traits::item_codec::{CodecConfig, CodecOverrides, ItemCodec};
use batchstream::traits::wire_sink::WireSink;
use batchstream::BatchLimits;

use futures_util::SinkExt;
use tokio::io::{duplex, AsyncReadExt};

/// Writes each item as `[len: u32 LE][bytes]`; encoded size = 4 + len.
struct PrefixCodec {
    overrides: CodecOverrides,
}

impl PrefixCodec {
    fn new() -> Self {
        Self {
            overrides: CodecOverrides::default(),
        }
    }
}

impl CodecConfig for PrefixCodec {
    fn overrides(&self) -> CodecOverrides {
        self.overrides
    }
    fn set_overrides(&mut self, overrides: CodecOverrides) {
        self.overrides = overrides;
    }
}

impl ItemCodec<Vec<u8>> for PrefixCodec {
    fn encode_one<S: WireSink>(&mut self, item: &Vec<u8>, sink: &mut S) -> Result<(), BatchError> {
        let encoded = 4 + item.len() as u64;
        if let Some(limit) = self.overrides.item_size_limit {
            if encoded > limit {
                return Err(BatchError::ItemTooLarge(format!(
                    "encoded item of {} bytes exceeds limit of {} bytes",
                    encoded, limit
                )));
            }
        }
        sink.extend_from_slice(&(item.len() as u32).to_le_bytes());
        sink.extend_from_slice(item);
        Ok(())
    }
}

fn make_items(sizes: &[usize]) -> Vec<Vec<u8>> {
    sizes
        .iter()
        .enumerate()
        .map(|(i, &n)| vec![(i % 251) as u8; n])
        .collect()
}

/// Parse a stream of `[len][bytes]` records back into items.
fn decode_all(mut bytes: &[u8]) -> Vec<Vec<u8>> {
    let mut items = Vec::new();
    while !bytes.is_empty() {
        let len = u32::from_le_bytes(bytes[..4].try_into().unwrap()) as usize;
        items.push(bytes[4..4 + len].to_vec());
        bytes = &bytes[4 + len..];
    }
    items
}

#[tokio::test]
async fn test_send_batches_to_stream_roundtrip() {
    let sizes = [10, 3, 25, 1, 1, 18, 9, 9, 9, 2];
    let items = make_items(&sizes);
    // Small ceilings force several messages
    let limits = BatchLimits::new(32, 40).unwrap();

    let (client, mut server) = duplex(64);
    let writer = send_batches_to_stream::<_, _, _, Vec<u8>>(client, &items, PrefixCodec::new(), limits);

    let reader = async {
        let mut all = Vec::new();
        server.read_to_end(&mut all).await.unwrap();
        all
    };

    let (sent, bytes) = tokio::join!(writer, reader);
    sent.unwrap();

    assert_eq!(decode_all(&bytes), items);
}

#[tokio::test]
async fn test_send_batches_rejects_oversized_item() {
    let items = make_items(&[4, 60]);
    let limits = BatchLimits::new(32, 40).unwrap();

    let (client, _server) = duplex(256);
    let err = send_batches_to_stream::<_, _, _, Vec<u8>>(client, &items, PrefixCodec::new(), limits)
        .await
        .unwrap_err();
    assert!(matches!(err, BatchError::ItemTooLarge(_)));
}

#[tokio::test]
async fn test_writer_into_message_sink() {
    let sizes = [6, 6, 6, 6, 6];
    let items = make_items(&sizes);
    let limits = BatchLimits::new(16, 24).unwrap();

    let (client, mut server) = duplex(64);

    let producer = async {
        let mut writer: BatchMessageWriter<_, _, Vec<u8>> = BatchMessageWriter::new(
            &items,
            PrefixCodec::new(),
            limits,
            PayloadKind::Identified("documents".into()),
        );
        let mut sink: MessageSink<_, Vec<u8>> = MessageSink::new(client);

        let mut message_sizes = Vec::new();
        while let Some(message) = writer.next_message() {
            let message = message.unwrap();
            message_sizes.push(message.len_since_open());
            SinkExt::send(&mut sink, message.into_sink()).await.unwrap();
        }
        SinkExt::close(&mut sink).await.unwrap();
        assert_eq!(writer.state(), DriveState::Done);
        message_sizes
    };

    let reader = async {
        let mut all = Vec::new();
        server.read_to_end(&mut all).await.unwrap();
        all
    };

    let (message_sizes, bytes) = tokio::join!(producer, reader);

    // Each item encodes to 10 bytes; ceiling 24 fits two per message
    assert_eq!(message_sizes, vec![20, 20, 10]);
    for size in message_sizes {
        assert!(size <= limits.max_batch_size());
    }
    assert_eq!(decode_all(&bytes), items);
}
