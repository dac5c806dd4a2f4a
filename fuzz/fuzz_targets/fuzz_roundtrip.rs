#![no_main]
use bmpedit::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must re-encode and decode to identical pixels
    let Ok(decoded) = decode_bmp(data, enough::Unstoppable) else {
        return;
    };
    let reencoded = encode_bmp(&decoded, enough::Unstoppable).expect("decoded image failed to encode");
    let Ok(decoded2) = decode_bmp(&reencoded, enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded.pixels(), decoded2.pixels(), "roundtrip pixel mismatch");
    assert_eq!(decoded2.header().row_order(), RowOrder::BottomUp);

    // Every transform keeps the size of whatever decoded
    for kind in TransformKind::ALL {
        let out = kind.apply(decoded.pixels().clone(), kind.default_param());
        assert_eq!((out.width(), out.height()), (decoded.width(), decoded.height()));
    }
});
