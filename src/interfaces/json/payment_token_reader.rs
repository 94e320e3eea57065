use crate::domain::payment::PaymentToken;
use crate::error::InterfaceError;
use std::io::Read;

/// Reads a device payment token exported as JSON.
///
/// Expected shape: `paymentData` (base64), `transactionIdentifier`,
/// `paymentInstrumentName` and `paymentNetwork`.
pub struct PaymentTokenReader<R: Read> {
    source: R,
}

impl<R: Read> PaymentTokenReader<R> {
    /// Creates a new `PaymentTokenReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self { source }
    }

    pub fn read_token(self) -> Result<PaymentToken, InterfaceError> {
        Ok(serde_json::from_reader(self.source)?)
    }
}
