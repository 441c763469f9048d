use bitcode::{Decode, Encode};
use prpc::constants::{MAGIC_CODE, RPC_HEAD_SIZE};
use prpc::meta::{ChunkInfo, CompressType, Trace};
use prpc::package::{
    PackageDecodeError, PackageEncodeError, RpcDataPackage, RpcErrorCode, RpcHeadMeta,
};

#[derive(Encode, Decode, Debug, PartialEq)]
struct SayRequest {
    text: String,
    times: u32,
}

fn request_package() -> RpcDataPackage {
    let payload = bitcode::encode(&SayRequest {
        text: "hello".into(),
        times: 3,
    });

    RpcDataPackage::builder()
        .prpc()
        .service_name("Echo")
        .method_name("say")
        .log_id(77)
        .trace(Trace::new(1, "trace-key", 2, 3))
        .ext_field("zone", "eu")
        .ext_field("canary", "true")
        .extra_params(b"extra".to_vec())
        .correlation_id(12345)
        .compress_type(CompressType::Snappy)
        .authentication_data(b"secret".to_vec())
        .data(payload)
        .attachment(b"attached".to_vec())
        .build()
}

fn be_i32(bytes: &[u8]) -> i32 {
    i32::from_be_bytes(bytes.try_into().expect("4 bytes"))
}

#[test]
fn round_trip_preserves_every_field() {
    let mut package = request_package();
    let bytes = package.encode().expect("encode failed");

    let decoded = RpcDataPackage::decode(&bytes).expect("decode failed");

    assert_eq!(
        decoded.head().map(|head| head.total_size),
        package.head().map(|head| head.total_size)
    );
    assert_eq!(decoded.rpc_meta(), package.rpc_meta());
    assert_eq!(decoded.data(), package.data());
    assert_eq!(decoded.attachment(), Some(&b"attached"[..]));

    assert_eq!(decoded.service_name(), Some("Echo"));
    assert_eq!(decoded.method_name(), Some("say"));
    assert_eq!(decoded.log_id(), Some(77));
    assert_eq!(decoded.trace(), Some(Trace::new(1, "trace-key", 2, 3)));
    assert_eq!(decoded.extra_params(), Some(&b"extra"[..]));
    assert_eq!(decoded.correlation_id(), 12345);
    assert_eq!(decoded.compress_type(), CompressType::Snappy);
    assert_eq!(decoded.authentication_data(), Some(&b"secret"[..]));

    let ext: Vec<_> = decoded
        .rpc_meta()
        .and_then(|meta| meta.request.as_ref())
        .map(|request| {
            request
                .rpc_request_meta_ext
                .iter()
                .map(|field| (field.key.as_str(), field.value.as_str()))
                .collect()
        })
        .unwrap_or_default();
    assert_eq!(ext, vec![("zone", "eu"), ("canary", "true")]);

    let request: SayRequest =
        bitcode::decode(decoded.data().expect("data")).expect("bitcode decode failed");
    assert_eq!(request.text, "hello");
    assert_eq!(request.times, 3);
}

#[test]
fn head_bytes_match_head_fields() {
    let mut package = request_package();
    let bytes = package.encode().unwrap();
    let head = *package.head().unwrap();

    assert_eq!(&bytes[0..4], &MAGIC_CODE);
    assert_eq!(be_i32(&bytes[4..8]), head.total_size);
    assert_eq!(be_i32(&bytes[8..12]), head.meta_size);
    assert_eq!(bytes.len(), head.total_size as usize + RPC_HEAD_SIZE);
}

#[test]
fn custom_magic_code_is_written_verbatim() {
    let mut package = RpcDataPackage::builder()
        .magic_code(*b"HULU")
        .service_name("Echo")
        .method_name("say")
        .build();

    let bytes = package.encode().unwrap();
    assert_eq!(&bytes[0..4], b"HULU");

    let decoded = RpcDataPackage::decode(&bytes).unwrap();
    assert!(!decoded.head().unwrap().has_valid_magic());
}

#[test]
fn encode_records_sizes_on_the_package() {
    let mut package = request_package();
    let data_len = package.data().unwrap().len();

    let bytes = package.encode().unwrap();

    let meta = package.rpc_meta().unwrap();
    let head = package.head().unwrap();
    let meta_len = meta.to_bytes().len();

    assert_eq!(meta.attachment_size, 8);
    assert_eq!(head.meta_size as usize, meta_len);
    assert_eq!(head.total_size as usize, data_len + 8 + meta_len);
    assert_eq!(
        &bytes[RPC_HEAD_SIZE..RPC_HEAD_SIZE + meta_len],
        &meta.to_bytes()[..]
    );
}

#[test]
fn encode_is_reproducible() {
    let mut package = request_package();
    let first = package.encode().unwrap();
    let second = package.encode().unwrap();
    assert_eq!(first, second);
}

#[test]
fn encode_requires_head_and_meta() {
    let mut no_head = RpcDataPackage::builder()
        .service_name("Echo")
        .method_name("say")
        .build();
    assert_eq!(no_head.encode(), Err(PackageEncodeError::MissingHead));

    let mut no_meta = RpcDataPackage::builder()
        .prpc()
        .data(b"payload".to_vec())
        .build();
    assert_eq!(no_meta.encode(), Err(PackageEncodeError::MissingMeta));
}

#[test]
fn package_without_data_round_trips() {
    let mut ack = RpcDataPackage::builder()
        .prpc()
        .correlation_id(9)
        .error_code(RpcErrorCode::Success)
        .build();

    let bytes = ack.encode().unwrap();
    let decoded = RpcDataPackage::decode(&bytes).unwrap();

    assert_eq!(decoded.data(), None);
    assert_eq!(decoded.attachment(), None);
    assert_eq!(decoded.correlation_id(), 9);
    assert_eq!(decoded.error_code(), Some(0));
}

#[test]
fn decode_ignores_trailing_bytes() {
    let mut package = request_package();
    let mut bytes = package.encode().unwrap();
    bytes.extend_from_slice(b"next package");

    let decoded = RpcDataPackage::decode(&bytes).unwrap();
    assert_eq!(decoded.attachment(), Some(&b"attached"[..]));
}

#[test]
fn decode_rejects_short_head() {
    assert_eq!(
        RpcDataPackage::decode(b"PRPC\0\0"),
        Err(PackageDecodeError::IncompleteHead { available: 6 })
    );
    assert_eq!(
        RpcDataPackage::decode(&[]),
        Err(PackageDecodeError::IncompleteHead { available: 0 })
    );
}

#[test]
fn decode_rejects_meta_running_past_the_end() {
    let mut package = request_package();
    let bytes = package.encode().unwrap();
    let meta_size = package.head().unwrap().meta_size as usize;

    let truncated = &bytes[..RPC_HEAD_SIZE + meta_size - 1];
    assert_eq!(
        RpcDataPackage::decode(truncated),
        Err(PackageDecodeError::IncompleteMeta {
            meta_size,
            available: meta_size - 1,
        })
    );
}

#[test]
fn decode_rejects_truncated_payload() {
    let mut package = request_package();
    let bytes = package.encode().unwrap();

    let result = RpcDataPackage::decode(&bytes[..bytes.len() - 1]);
    assert!(matches!(
        result,
        Err(PackageDecodeError::IncompletePayload { .. })
    ));
}

#[test]
fn decode_rejects_negative_data_size() {
    let mut package = RpcDataPackage::builder()
        .prpc()
        .service_name("Echo")
        .method_name("say")
        .attachment(b"attachment".to_vec())
        .build();
    let mut bytes = package.encode().unwrap();
    let meta_size = package.head().unwrap().meta_size;

    // Claim a body that cannot even hold the attachment
    let head = RpcHeadMeta {
        magic_code: MAGIC_CODE,
        total_size: meta_size,
        meta_size,
    };
    bytes[..RPC_HEAD_SIZE].copy_from_slice(&head.encode());

    assert_eq!(
        RpcDataPackage::decode(&bytes),
        Err(PackageDecodeError::NegativeDataSize {
            total_size: meta_size,
            meta_size,
            attachment_size: 10,
        })
    );
}

#[test]
fn decode_rejects_negative_meta_size() {
    let head = RpcHeadMeta {
        magic_code: MAGIC_CODE,
        total_size: 0,
        meta_size: -4,
    };

    assert_eq!(
        RpcDataPackage::decode(&head.encode()),
        Err(PackageDecodeError::NegativeSize {
            field: "meta_size",
            value: -4,
        })
    );
}

#[test]
fn decode_rejects_corrupt_meta() {
    let head = RpcHeadMeta {
        magic_code: MAGIC_CODE,
        total_size: 2,
        meta_size: 2,
    };
    let mut bytes = head.encode().to_vec();
    bytes.extend_from_slice(&[0xff, 0xff]);

    let err = RpcDataPackage::decode(&bytes).unwrap_err();
    assert!(matches!(err, PackageDecodeError::CorruptMeta(_)));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn error_response_keeps_correlation_and_drops_request() {
    let request = request_package();
    let mut response = request.error_response(RpcErrorCode::ServiceNotFound, "no such service");

    assert_eq!(response.correlation_id(), 12345);
    assert_eq!(response.compress_type(), CompressType::Snappy);
    assert_eq!(response.service_name(), None);
    assert_eq!(response.data(), None);
    assert_eq!(response.attachment(), None);
    assert_eq!(response.error_code(), Some(1001));
    assert_eq!(
        RpcErrorCode::try_from(response.error_code().unwrap()),
        Ok(RpcErrorCode::ServiceNotFound)
    );

    let decoded = RpcDataPackage::decode(&response.encode().unwrap()).unwrap();
    assert_eq!(decoded.error_text(), Some("no such service"));
    assert_eq!(decoded.rpc_meta().unwrap().attachment_size, 0);
}

#[test]
fn error_response_without_head_is_still_encodable() {
    let headless = RpcDataPackage::builder().correlation_id(3).build();
    let mut response = headless.error_response(500, "boom");

    let bytes = response.encode().unwrap();
    assert_eq!(&bytes[..4], b"PRPC");
}

#[test]
fn into_builder_derives_a_response() {
    let request = request_package();

    let mut response = request
        .into_builder()
        .data(b"pong".to_vec())
        .error_code(RpcErrorCode::Success)
        .error_text("")
        .chunk_info(5, -1)
        .build();

    assert_eq!(response.correlation_id(), 12345);
    assert_eq!(response.chunk_info(), Some(ChunkInfo::new(5, -1)));
    assert!(response.is_final_package());

    let decoded = RpcDataPackage::decode(&response.encode().unwrap()).unwrap();
    assert_eq!(decoded.data(), Some(&b"pong"[..]));
}
