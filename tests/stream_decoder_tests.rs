use prpc::constants::{MAGIC_CODE, RPC_HEAD_SIZE};
use prpc::package::{PackageDecodeError, RpcDataPackage, RpcHeadMeta, RpcPackageStreamDecoder};
use rand::Rng;

fn encoded(correlation_id: i64, data: &[u8]) -> Vec<u8> {
    RpcDataPackage::builder()
        .prpc()
        .service_name("Echo")
        .method_name("say")
        .correlation_id(correlation_id)
        .data(data.to_vec())
        .build()
        .encode()
        .expect("encode failed")
}

#[test]
fn decoder_handles_incomplete_input() {
    let full = encoded(1, b"xyz");
    let split = full.split_at(full.len() / 2);

    let mut decoder = RpcPackageStreamDecoder::new();

    {
        let decoded: Vec<_> = decoder.read_bytes(split.0).collect();
        assert_eq!(decoded.len(), 0); // Incomplete package
        assert_eq!(decoder.buffered_len(), split.0.len());
    }

    let decoded: Vec<_> = decoder.read_bytes(split.1).collect();
    assert_eq!(decoded.len(), 1); // Now complete

    let package = decoded[0].as_ref().expect("expected valid package");
    assert_eq!(package.data(), Some(&b"xyz"[..]));
    assert_eq!(decoder.buffered_len(), 0);
}

#[test]
fn decoder_emits_back_to_back_packages() {
    let mut stream = Vec::new();
    for id in 0..5 {
        stream.extend(encoded(id, format!("payload {id}").as_bytes()));
    }

    let mut decoder = RpcPackageStreamDecoder::new();
    let ids: Vec<i64> = decoder
        .read_bytes(&stream)
        .map(|result| result.expect("decode failed").correlation_id())
        .collect();

    assert_eq!(ids, vec![0, 1, 2, 3, 4]);
}

#[test]
fn decoder_survives_random_fragmentation() {
    let mut rng = rand::rng();

    let mut stream = Vec::new();
    for id in 0..20 {
        let data: Vec<u8> = (0..rng.random_range(0..500)).map(|_| rng.random()).collect();
        stream.extend(encoded(id, &data));
    }

    let mut decoder = RpcPackageStreamDecoder::new();
    let mut ids = Vec::new();
    let mut rest = &stream[..];
    while !rest.is_empty() {
        let take = rng.random_range(1..=rest.len().min(37));
        let (fragment, tail) = rest.split_at(take);
        rest = tail;

        for result in decoder.read_bytes(fragment) {
            ids.push(result.expect("decode failed").correlation_id());
        }
    }

    assert_eq!(ids, (0..20).collect::<Vec<i64>>());
}

#[test]
fn decoder_rejects_oversized_packages() {
    let bytes = encoded(1, &[7u8; 256]);
    let mut decoder = RpcPackageStreamDecoder::new().with_max_package_size(64);

    let results: Vec<_> = decoder.read_bytes(&bytes).collect();
    assert_eq!(results.len(), 1);
    assert!(matches!(
        results[0],
        Err(PackageDecodeError::PackageTooLarge { max: 64, .. })
    ));
    assert_eq!(decoder.buffered_len(), 0);
}

#[test]
fn decoder_rejects_negative_total_size() {
    let head = RpcHeadMeta {
        magic_code: MAGIC_CODE,
        total_size: -1,
        meta_size: 0,
    };

    let mut decoder = RpcPackageStreamDecoder::new();
    let results: Vec<_> = decoder.read_bytes(&head.encode()).collect();

    assert_eq!(
        results,
        vec![Err(PackageDecodeError::NegativeSize {
            field: "total_size",
            value: -1,
        })]
    );
}

#[test]
fn decoder_reports_bad_package_and_continues() {
    // Head says 2 meta bytes, but they are not valid protobuf
    let head = RpcHeadMeta {
        magic_code: MAGIC_CODE,
        total_size: 2,
        meta_size: 2,
    };
    let mut stream = head.encode().to_vec();
    stream.extend_from_slice(&[0xff, 0xff]);
    stream.extend(encoded(9, b"ok"));

    let mut decoder = RpcPackageStreamDecoder::new();
    let results: Vec<_> = decoder.read_bytes(&stream).collect();

    assert_eq!(results.len(), 2);
    assert!(matches!(results[0], Err(PackageDecodeError::CorruptMeta(_))));
    assert_eq!(results[1].as_ref().unwrap().correlation_id(), 9);
    assert_eq!(decoder.buffered_len(), 0);
    assert!(stream.len() > RPC_HEAD_SIZE);
}
