//! Transaction staging store
//!
//! The transaction parser (outside this crate) stages each output's amount
//! and address as it decodes them, plus the fee if there is one. The
//! confirmation workflow later walks the staged set read-only.
//!
//! The parser must call [`Staging::reset`] before staging a new
//! transaction; nothing here infers that a new one has started.

use heapless::{String, Vec};

/// Maximum outputs per transaction that can be reviewed
pub const MAX_OUTPUTS: usize = 2;

/// Maximum characters in an amount, e.g. "21000000.00000000"
pub const MAX_AMOUNT_LEN: usize = 21;

/// Maximum characters in an address (base58 P2PKH/P2SH)
pub const MAX_ADDRESS_LEN: usize = 35;

/// Amount as display text
pub type AmountText = String<MAX_AMOUNT_LEN>;

/// Address as display text
pub type AddressText = String<MAX_ADDRESS_LEN>;

/// Staging errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StagingError {
    /// Already holding MAX_OUTPUTS outputs
    Full,
}

/// One transaction output awaiting review
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputRecord {
    pub amount: AmountText,
    pub address: AddressText,
}

/// Outputs and fee of the transaction under review
#[derive(Debug, Clone, Default)]
pub struct Staging {
    /// Outputs in staging order
    outputs: Vec<OutputRecord, MAX_OUTPUTS>,
    /// Fee, if the transaction has one
    fee: Option<AmountText>,
}

impl Staging {
    /// Create an empty store
    pub const fn new() -> Self {
        Self {
            outputs: Vec::new(),
            fee: None,
        }
    }

    /// Stage the next output
    ///
    /// Text longer than the maximum lengths is truncated. Fails without
    /// touching the store if it is already full.
    pub fn stage_output(&mut self, amount: &str, address: &str) -> Result<(), StagingError> {
        if self.outputs.is_full() {
            return Err(StagingError::Full);
        }
        let record = OutputRecord {
            amount: truncated(amount),
            address: truncated(address),
        };
        self.outputs.push(record).map_err(|_| StagingError::Full)
    }

    /// Stage the transaction fee
    pub fn stage_fee(&mut self, amount: &str) {
        self.fee = Some(truncated(amount));
    }

    /// Forget everything staged so far
    pub fn reset(&mut self) {
        self.outputs.clear();
        self.fee = None;
    }

    /// Staged outputs, in staging order
    pub fn outputs(&self) -> &[OutputRecord] {
        &self.outputs
    }

    /// Staged fee, if any
    pub fn fee(&self) -> Option<&str> {
        self.fee.as_deref()
    }

    /// Number of staged outputs
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    /// Check if no outputs are staged
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

/// Copy up to N bytes of `text`, stopping at a NUL or a char that does
/// not fit
fn truncated<const N: usize>(text: &str) -> String<N> {
    let mut out = String::new();
    for ch in text.chars().take_while(|&ch| ch != '\0') {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_up_to_capacity() {
        let mut staging = Staging::new();
        assert_eq!(staging.stage_output("0.01", "1FirstAddress"), Ok(()));
        assert_eq!(staging.stage_output("0.02", "1SecondAddress"), Ok(()));
        assert_eq!(
            staging.stage_output("0.03", "1ThirdAddress"),
            Err(StagingError::Full)
        );

        assert_eq!(staging.len(), MAX_OUTPUTS);
        assert_eq!(staging.outputs()[0].amount.as_str(), "0.01");
        assert_eq!(staging.outputs()[0].address.as_str(), "1FirstAddress");
        assert_eq!(staging.outputs()[1].amount.as_str(), "0.02");
        assert_eq!(staging.outputs()[1].address.as_str(), "1SecondAddress");
    }

    #[test]
    fn test_text_is_truncated() {
        let mut staging = Staging::new();
        let long_amount = "123456789012345678901234567890";
        let long_address = "1RaTTuSEN7jJUDiW1EGogHwtek7g9BiEnXXXXXXXX";
        staging.stage_output(long_amount, long_address).unwrap();

        let record = &staging.outputs()[0];
        assert_eq!(record.amount.as_str(), &long_amount[..MAX_AMOUNT_LEN]);
        assert_eq!(record.address.as_str(), &long_address[..MAX_ADDRESS_LEN]);
    }

    #[test]
    fn test_text_stops_at_nul() {
        let mut staging = Staging::new();
        staging.stage_fee("0.0001\0garbage");
        assert_eq!(staging.fee(), Some("0.0001"));
    }

    #[test]
    fn test_fee_is_optional() {
        let mut staging = Staging::new();
        assert_eq!(staging.fee(), None);
        staging.stage_fee("0.0005");
        assert_eq!(staging.fee(), Some("0.0005"));
    }

    #[test]
    fn test_reset_clears_outputs_and_fee() {
        let mut staging = Staging::new();
        staging.stage_output("1", "1Addr").unwrap();
        staging.stage_output("2", "1Addr").unwrap();
        staging.stage_fee("0.1");

        staging.reset();
        assert!(staging.is_empty());
        assert_eq!(staging.fee(), None);
        assert_eq!(staging.stage_output("3", "1Addr"), Ok(()));
    }
}
