use crate::domain::configuration::ApplePayConfiguration;
use crate::domain::payment::TokenizedPayment;
use crate::error::InterfaceError;
use serde_json::json;
use std::io::Write;

/// Writes command results as one JSON document per line.
pub struct ReportWriter<W: Write> {
    sink: W,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    pub fn write_tokenized(&mut self, payment: &TokenizedPayment) -> Result<(), InterfaceError> {
        serde_json::to_writer(&mut self.sink, payment)?;
        writeln!(self.sink)?;
        Ok(())
    }

    pub fn write_status(&mut self, apple_pay: &ApplePayConfiguration) -> Result<(), InterfaceError> {
        let report = json!({
            "enabled": apple_pay.status.is_enabled(),
            "status": apple_pay.status.to_string(),
            "paymentRequest": apple_pay.payment_request(),
        });
        serde_json::to_writer(&mut self.sink, &report)?;
        writeln!(self.sink)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::configuration::Configuration;

    #[test]
    fn test_write_tokenized() {
        let mut out = Vec::new();
        ReportWriter::new(&mut out)
            .write_tokenized(&TokenizedPayment {
                nonce: "an-apple-pay-nonce".to_string(),
                description: "a description".to_string(),
                card_type: None,
                is_default: false,
            })
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"nonce\":\"an-apple-pay-nonce\",\"description\":\"a description\",\"default\":false}\n"
        );
    }

    #[test]
    fn test_write_status() {
        let config = Configuration::new(serde_json::json!({
            "applePay": {"status": "off", "countryCode": "US"}
        }));
        let mut out = Vec::new();
        ReportWriter::new(&mut out)
            .write_status(&config.apple_pay())
            .unwrap();

        let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(report["enabled"], false);
        assert_eq!(report["status"], "off");
        assert_eq!(report["paymentRequest"]["countryCode"], "US");
    }
}
