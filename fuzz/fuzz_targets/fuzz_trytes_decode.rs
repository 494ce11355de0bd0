#![no_main]

use libfuzzer_sys::fuzz_target;

use tangle_types::codec::{self, ErrorPolicy};
use tangle_types::TryteSeq;

// Fuzz the tryte codecs with arbitrary payloads.
fuzz_target!(|data: &[u8]| {
    // Decoding arbitrary bytes as trytes must never panic, under any
    // error policy.
    if let Ok(seq) = TryteSeq::from_ascii(data) {
        for policy in [ErrorPolicy::Strict, ErrorPolicy::Ignore, ErrorPolicy::Replace] {
            let _ = codec::bytes_from_trytes(&seq, policy);
            let _ = codec::string_from_trytes(&seq, policy);
        }
        assert_eq!(TryteSeq::from_trits(&seq.trits()), seq);
    }

    // Encoding arbitrary bytes then decoding strictly must round-trip.
    let encoded = codec::trytes_from_bytes(data);
    let decoded = codec::bytes_from_trytes(&encoded, ErrorPolicy::Strict);
    assert_eq!(decoded.as_deref(), Ok(data));
});
