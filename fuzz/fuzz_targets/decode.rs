#![no_main]
use libfuzzer_sys::fuzz_target;
use lpve::Codec;

fuzz_target!(|data: &[u8]| {
    // Malformed input must yield an error, never a panic
    let _ = Codec::HASH256.decode(data);
    if let Some((&width, rest)) = data.split_first() {
        if let Ok(codec) = Codec::new(width as usize) {
            let _ = codec.decode(rest);
        }
    }
});
