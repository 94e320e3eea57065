pub mod payment_token_reader;
pub mod report_writer;
