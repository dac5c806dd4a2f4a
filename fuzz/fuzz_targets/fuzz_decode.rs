#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Header probing and full decode must never panic
    let _ = bmpedit::bmp::probe_header(data);
    let _ = bmpedit::decode_bmp(data, enough::Unstoppable);

    let limits = bmpedit::Limits {
        max_pixels: Some(1 << 20),
        ..Default::default()
    };
    let _ = bmpedit::DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable);
});
