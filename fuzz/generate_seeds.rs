#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp(width: i32, height: i32, bgr_rows: &[&[u8]]) -> Vec<u8> {
    let stride = (width as usize * 3 + 3) & !3;
    let image_size = (stride * height.unsigned_abs() as usize) as u32;
    let mut out = vec![0u8; 54];
    out[0] = b'B'; out[1] = b'M';
    out[2..6].copy_from_slice(&(54 + image_size).to_le_bytes()); // file size
    out[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    out[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    out[18..22].copy_from_slice(&width.to_le_bytes());
    out[22..26].copy_from_slice(&height.to_le_bytes());
    out[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    out[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
    out[34..38].copy_from_slice(&image_size.to_le_bytes());
    for row in bgr_rows {
        out.extend_from_slice(row);
        out.resize(out.len() + stride - row.len(), 0);
    }
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    fs::write(format!("{dir}/bmp_1x1.bmp"), bmp(1, 1, &[&[0xff, 0x00, 0x00]])).unwrap();
    fs::write(
        format!("{dir}/bmp_2x2_white.bmp"),
        bmp(2, 2, &[&[0xff; 6], &[0xff; 6]]),
    )
    .unwrap();
    fs::write(
        format!("{dir}/bmp_5x2_padded.bmp"),
        bmp(5, 2, &[&[0x10; 15], &[0x80; 15]]),
    )
    .unwrap();
    fs::write(
        format!("{dir}/bmp_top_down_1x2.bmp"),
        bmp(1, -2, &[&[0x00, 0x00, 0xff], &[0xff, 0x00, 0x00]]),
    )
    .unwrap();

    // Extra bytes between the header and the pixel data
    let mut gap = bmp(1, 1, &[]);
    gap[10..14].copy_from_slice(&58u32.to_le_bytes());
    gap.extend_from_slice(&[0xaa; 4]);
    gap.extend_from_slice(&[0x01, 0x02, 0x03, 0x00]);
    fs::write(format!("{dir}/bmp_offset_gap.bmp"), gap).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/bmp_no_pixels.bin"), bmp(4, 4, &[])).unwrap();
    let mut rle = bmp(1, 1, &[&[0, 0, 0]]);
    rle[30..34].copy_from_slice(&1u32.to_le_bytes());
    fs::write(format!("{dir}/bmp_rle8.bin"), rle).unwrap();

    println!("Generated seed corpus in {dir}/");
}
