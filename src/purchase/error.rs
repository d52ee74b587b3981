use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PurchaseError {
    #[error("no checkout in progress")]
    NotInCheckout,

    #[error("license picker is not open")]
    PickerNotOpen,
}
