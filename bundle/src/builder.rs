//! Bundle construction and signing.
//!
//! A bundle goes through two distinct types. [`ProposedBundle`] collects
//! outputs, inputs, and a change address; [`ProposedBundle::finalize`]
//! computes the bundle hash and yields a [`Bundle`], whose inputs can then
//! be signed. The type split makes signing before finalization, or
//! finalizing twice, impossible to express.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use tangle_crypto::{message_fragments, signature_fragments, KeySource, PrivateKey};
use tangle_types::{
    add_trits, codec::ErrorPolicy, codec::string_from_trytes, Address, BundleHash, Curl,
    Fragment, Nonce, Tag, Trit, TransactionHash, TransactionTrytes, TryteSeq, HASH_TRITS,
};

use crate::error::BundleError;
use crate::transaction::Transaction;

/// An output to add to a bundle: a destination, a value, and optionally a
/// tag and a message payload.
#[derive(Clone, Debug)]
pub struct ProposedTransaction {
    address: Address,
    value: i64,
    tag: Tag,
    message: Option<TryteSeq>,
}

impl ProposedTransaction {
    pub fn new(address: Address, value: i64) -> Self {
        Self {
            address,
            value,
            tag: Tag::null(),
            message: None,
        }
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tag = tag;
        self
    }

    /// Attaches a message payload. Messages longer than one fragment are
    /// spread over additional zero-value transactions.
    pub fn with_message(mut self, message: TryteSeq) -> Self {
        self.message = Some(message);
        self
    }
}

/// One slot of a bundle under construction.
#[derive(Clone, Debug)]
struct Slot {
    address: Address,
    value: i64,
    tag: Tag,
    fragment: Fragment,
}

/// A bundle being assembled: outputs, then inputs, then an optional change
/// address, in any order.
#[derive(Default)]
pub struct ProposedBundle {
    slots: Vec<Slot>,
    change_address: Option<Address>,
}

impl ProposedBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of all slot values; zero when inputs exactly cover outputs.
    /// Summed wide, so slot values near the `i64` limits cannot overflow.
    pub fn balance(&self) -> i128 {
        self.slots.iter().map(|slot| i128::from(slot.value)).sum()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Adds an output. The message, if any, is split across as many
    /// zero-value continuation slots as it needs.
    pub fn add_transaction(&mut self, transaction: ProposedTransaction) -> Result<(), BundleError> {
        if transaction.value < 0 {
            return Err(BundleError::NegativeValue);
        }

        let mut fragments = match &transaction.message {
            Some(message) => message_fragments(message),
            None => Vec::new(),
        };
        if fragments.is_empty() {
            fragments.push(Fragment::null());
        }

        for (seq, fragment) in fragments.into_iter().enumerate() {
            self.slots.push(Slot {
                address: transaction.address.clone(),
                value: if seq == 0 { transaction.value } else { 0 },
                tag: transaction.tag.clone(),
                fragment,
            });
        }

        Ok(())
    }

    /// Adds input addresses. Each input must carry its balance, key index,
    /// and security level; its whole balance is consumed, and one extra
    /// slot is reserved per additional security level for the signature
    /// overflow.
    pub fn add_inputs(&mut self, inputs: &[Address]) -> Result<(), BundleError> {
        for input in inputs {
            let balance = input.balance().ok_or_else(|| BundleError::MissingBalance {
                address: input.as_str().to_owned(),
            })?;
            if balance <= 0 {
                return Err(BundleError::NotAnInput {
                    address: input.as_str().to_owned(),
                });
            }
            if input.key_index().is_none() {
                return Err(BundleError::MissingKeyIndex {
                    address: input.as_str().to_owned(),
                });
            }

            let level =
                input
                    .security_level()
                    .ok_or_else(|| BundleError::MissingSecurityLevel {
                        address: input.as_str().to_owned(),
                    })?;
            for seq in 0..level.fragments() {
                self.slots.push(Slot {
                    address: input.clone(),
                    value: if seq == 0 { -balance } else { 0 },
                    tag: Tag::null(),
                    fragment: Fragment::null(),
                });
            }
        }

        Ok(())
    }

    /// Sends any balance left over after the outputs to `address`.
    pub fn send_unspent_inputs_to(&mut self, address: Address) {
        self.change_address = Some(address);
    }

    /// Finalizes with the current wall-clock time as the bundle timestamp.
    pub fn finalize(self) -> Result<Bundle, BundleError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs() as i64)
            .unwrap_or(0);
        self.finalize_at(now)
    }

    /// Finalizes at an explicit timestamp, fixing every transaction's
    /// position and computing the bundle hash.
    pub fn finalize_at(mut self, timestamp: i64) -> Result<Bundle, BundleError> {
        if self.slots.is_empty() {
            return Err(BundleError::EmptyBundle);
        }

        let balance = self.balance();
        if balance > 0 {
            return Err(BundleError::InsufficientInputs { balance });
        }
        if balance < 0 {
            match self.change_address.take() {
                Some(address) => {
                    let change = i64::try_from(-balance)
                        .map_err(|_| BundleError::UnspentInputs { balance })?;
                    debug!(change, "returning unspent inputs");
                    self.slots.push(Slot {
                        address,
                        value: change,
                        tag: Tag::null(),
                        fragment: Fragment::null(),
                    });
                }
                None => return Err(BundleError::UnspentInputs { balance }),
            }
        }

        let last_index = self.slots.len() - 1;
        let mut transactions: Vec<Transaction> = self
            .slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| Transaction {
                signature_message_fragment: slot.fragment,
                address: slot.address,
                value: slot.value,
                legacy_tag: slot.tag.clone(),
                timestamp,
                current_index: index,
                last_index,
                bundle_hash: BundleHash::null(),
                trunk_transaction_hash: TransactionHash::null(),
                branch_transaction_hash: TransactionHash::null(),
                tag: slot.tag,
                attachment_timestamp: 0,
                attachment_timestamp_lower_bound: 0,
                attachment_timestamp_upper_bound: 0,
                nonce: Nonce::null(),
            })
            .collect();

        let hash = loop {
            let mut sponge = Curl::new();
            for transaction in &transactions {
                sponge.absorb(&transaction.essence());
            }
            let mut hash_trits = [0 as Trit; HASH_TRITS];
            sponge.squeeze(&mut hash_trits);
            let hash = BundleHash::from_trits(&hash_trits)?;

            // A normalized value of 13 would let a signer skip a block of
            // key material, so such hashes are rejected and retried with a
            // bumped legacy tag.
            if hash.normalize().contains(&13) {
                let bumped = add_trits(&transactions[0].legacy_tag.trits(), &[1]);
                transactions[0].legacy_tag = Tag::from_trits(&bumped)?;
                debug!("bundle hash insecure, retrying with bumped legacy tag");
                continue;
            }

            break hash;
        };

        for transaction in &mut transactions {
            transaction.bundle_hash = hash.clone();
        }

        Ok(Bundle { transactions, hash })
    }
}

/// A finalized bundle: positions and hash are fixed, inputs may still need
/// signatures.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Bundle {
    transactions: Vec<Transaction>,
    hash: BundleHash,
}

impl Bundle {
    /// Reassembles a bundle from wire records, in any order.
    pub fn from_tryte_strings(records: &[TransactionTrytes]) -> Result<Self, BundleError> {
        if records.is_empty() {
            return Err(BundleError::EmptyBundle);
        }

        let mut transactions = records
            .iter()
            .map(Transaction::from_trytes)
            .collect::<Result<Vec<_>, _>>()?;
        transactions.sort_by_key(|transaction| transaction.current_index);

        let hash = transactions[0].bundle_hash.clone();
        Ok(Self { transactions, hash })
    }

    pub fn hash(&self) -> &BundleHash {
        &self.hash
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// The tail transaction, index 0.
    pub fn tail(&self) -> Option<&Transaction> {
        self.transactions.first()
    }

    /// Signs every input with keys drawn from `source`, consuming one key
    /// per input address.
    pub fn sign_inputs<S: KeySource>(&mut self, source: &S) -> Result<(), BundleError> {
        let mut index = 0;
        while index < self.transactions.len() {
            let transaction = &self.transactions[index];
            if transaction.value >= 0 {
                index += 1;
                continue;
            }

            let address = transaction.address.clone();
            let key_index = address
                .key_index()
                .ok_or_else(|| BundleError::MissingKeyIndex {
                    address: address.as_str().to_owned(),
                })?;
            let level =
                address
                    .security_level()
                    .ok_or_else(|| BundleError::MissingSecurityLevel {
                        address: address.as_str().to_owned(),
                    })?;

            debug!(index, key_index, "signing input");
            let key = source.key(key_index, level)?;
            self.sign_input_at(index, &key)?;
            index += level.fragments();
        }

        Ok(())
    }

    /// Writes the signature for the input at `index` into its slot and the
    /// reserved continuation slots after it.
    pub fn sign_input_at(&mut self, index: usize, key: &PrivateKey) -> Result<(), BundleError> {
        let head = self
            .transactions
            .get(index)
            .ok_or(BundleError::IndexOutOfRange { index })?;
        if head.value >= 0 {
            return Err(BundleError::NotAnInput {
                address: head.address.as_str().to_owned(),
            });
        }
        let address = head.address.clone();

        let fragments = signature_fragments(key, &self.hash)?;

        // The fragments must fill the slot group exactly: the input slot
        // plus every zero-value slot that follows on the same address.
        let mut group = 1;
        while self
            .transactions
            .get(index + group)
            .is_some_and(|slot| slot.address == address && slot.value == 0)
        {
            group += 1;
        }
        if group != fragments.len() {
            return Err(BundleError::MissingSignatureSlots {
                index,
                fragments: fragments.len(),
            });
        }

        for offset in 0..group {
            if !self.transactions[index + offset]
                .signature_message_fragment
                .is_null()
            {
                return Err(BundleError::AlreadySigned {
                    index: index + offset,
                });
            }
        }

        for (offset, fragment) in fragments.into_iter().enumerate() {
            self.transactions[index + offset].signature_message_fragment = fragment;
        }

        Ok(())
    }

    /// Wire records in attachment order: highest index first, tail last.
    pub fn as_tryte_strings(&self) -> Vec<TransactionTrytes> {
        self.transactions
            .iter()
            .rev()
            .map(Transaction::as_trytes)
            .collect()
    }

    /// Splits the bundle into runs of consecutive transactions sharing an
    /// address.
    pub fn group_transactions(&self) -> Vec<Vec<&Transaction>> {
        let mut groups: Vec<Vec<&Transaction>> = Vec::new();

        for transaction in &self.transactions {
            match groups.last_mut() {
                Some(group) if group[0].address == transaction.address => {
                    group.push(transaction);
                }
                _ => groups.push(vec![transaction]),
            }
        }

        groups
    }

    /// Decodes the message carried by each non-input transaction group.
    /// Groups with no message are skipped.
    pub fn messages(&self, policy: ErrorPolicy) -> Result<Vec<String>, BundleError> {
        let mut messages = Vec::new();

        for group in self.group_transactions() {
            if group[0].value < 0 {
                continue;
            }

            let mut raw = TryteSeq::empty();
            for transaction in &group {
                raw.push_trytes(transaction.signature_message_fragment.as_trytes());
            }
            if raw.is_null() {
                continue;
            }

            let message = string_from_trytes(&raw, policy)?;
            if !message.is_empty() {
                messages.push(message);
            }
        }

        Ok(messages)
    }
}
