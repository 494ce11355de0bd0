#![no_main]

use libfuzzer_sys::fuzz_target;

use tangle_bundle::{Bundle, BundleValidator, Transaction};
use tangle_types::TransactionTrytes;

// Parsing wire records from arbitrary trytes must never panic.
fuzz_target!(|data: &[u8]| {
    if let Ok(trytes) = TransactionTrytes::from_trytes(data) {
        if let Ok(transaction) = Transaction::from_trytes(&trytes) {
            let reencoded = transaction.as_trytes();
            if let Ok(bundle) = Bundle::from_tryte_strings(&[reencoded]) {
                let _ = BundleValidator::new(&bundle).errors();
            }
        }
    }
});
