//! Pricing and execution of packing-list transmissions into a UAE store.
//!
//! A [`TransmissionForm`] is built from an approved packing list and the
//! source store's INR stock prices, edited (margin, exchange rate, dealer
//! price) while the dialog is open, and finally handed to [`execute`].

pub mod execute;
pub mod form;
pub mod parse;
pub mod report;
pub mod sessions;

pub use self::execute::execute;
pub use self::form::{TransmissionForm, TransmissionItem};
pub use self::report::{Notice, NoticeLevel, TransmissionReport};
pub use self::sessions::TransmissionSessions;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransmissionError {
    #[error("item {index} does not exist (form has {len} items)")]
    ItemIndexOutOfRange { index: usize, len: usize },
    #[error("please select a destination store")]
    MissingDestination,
}
