//! Whole-bundle validation.

use tangle_crypto::validate_signature_fragments;
use tangle_types::{BundleHash, Curl, Fragment, Trit, HASH_TRITS};

use crate::builder::Bundle;
use crate::transaction::Transaction;

/// Checks a received bundle for internal consistency: balance, transaction
/// ordering, the bundle hash, and every input signature.
pub struct BundleValidator<'a> {
    bundle: &'a Bundle,
}

impl<'a> BundleValidator<'a> {
    pub fn new(bundle: &'a Bundle) -> Self {
        Self { bundle }
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    /// Every problem found, as human-readable descriptions. An empty list
    /// means the bundle is valid.
    ///
    /// Structural problems are all reported together; signature checks run
    /// only when the structure is sound, since a signature over a broken
    /// structure proves nothing.
    pub fn errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let transactions = self.bundle.transactions();

        // An empty bundle is vacuously balanced.
        if transactions.is_empty() {
            return errors;
        }

        // Wire values span the full i64 range, so the sum is taken wide.
        let balance: i128 = transactions
            .iter()
            .map(|transaction| i128::from(transaction.value))
            .sum();
        if balance != 0 {
            errors.push(format!(
                "bundle has invalid balance (expected 0, actual {balance})"
            ));
        }

        let last_index = transactions.len() - 1;
        for (position, transaction) in transactions.iter().enumerate() {
            if transaction.current_index != position {
                errors.push(format!(
                    "transaction {position} has invalid current index (expected {position}, actual {})",
                    transaction.current_index
                ));
            }
            if transaction.last_index != last_index {
                errors.push(format!(
                    "transaction {position} has invalid last index (expected {last_index}, actual {})",
                    transaction.last_index
                ));
            }
        }

        let computed = self.computed_hash();
        for (position, transaction) in transactions.iter().enumerate() {
            if transaction.bundle_hash != computed {
                errors.push(format!("transaction {position} has invalid bundle hash"));
            }
        }

        if errors.is_empty() {
            self.check_signatures(transactions, &mut errors);
        }
        errors
    }

    /// Recomputes the bundle hash from the transaction essences.
    fn computed_hash(&self) -> BundleHash {
        let mut sponge = Curl::new();
        for transaction in self.bundle.transactions() {
            sponge.absorb(&transaction.essence());
        }

        let mut hash_trits = [0 as Trit; HASH_TRITS];
        sponge.squeeze(&mut hash_trits);
        BundleHash::from_trits(&hash_trits).unwrap_or_else(|_| BundleHash::null())
    }

    /// Validates the signature of each input. An input's signature spans
    /// its own slot plus the zero-value slots that follow on the same
    /// address.
    fn check_signatures(&self, transactions: &[Transaction], errors: &mut Vec<String>) {
        let mut position = 0;
        while position < transactions.len() {
            let transaction = &transactions[position];
            if transaction.value >= 0 {
                position += 1;
                continue;
            }

            let mut fragments: Vec<Fragment> =
                vec![transaction.signature_message_fragment.clone()];
            let mut next = position + 1;
            while next < transactions.len()
                && transactions[next].value == 0
                && transactions[next].address == transaction.address
            {
                fragments.push(transactions[next].signature_message_fragment.clone());
                next += 1;
            }

            if !validate_signature_fragments(
                &fragments,
                &transaction.bundle_hash,
                &transaction.address,
            ) {
                errors.push(format!(
                    "transaction {position} has invalid signature (using {} fragments)",
                    fragments.len()
                ));
            }

            position = next;
        }
    }
}
