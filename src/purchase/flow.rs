use crate::{
    catalog::License,
    host::HostAdapter,
    purchase::error::PurchaseError,
};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Stage {
    #[default]
    Closed,
    PickingLicense,
    Checkout,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaymentOutcome {
    /// Stub acknowledgement; real payment wiring comes later.
    Acknowledged,
    /// No payment-capable host around, the UI should say so.
    HostRequired,
}

/// Modal state for the buy flow. Fields are private so checkout can only be
/// reached through `select_license`, which is what keeps "checkout with no
/// license" unrepresentable.
#[derive(Debug, Default)]
pub struct PurchaseFlow {
    stage: Stage,
    selected: Option<License>,
}

impl PurchaseFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn selected_license(&self) -> Option<&License> {
        self.selected.as_ref()
    }

    pub fn open_picker(&mut self) {
        if self.stage == Stage::Closed {
            self.stage = Stage::PickingLicense;
        }
    }

    pub fn select_license(&mut self, license: License) -> Result<(), PurchaseError> {
        if self.stage != Stage::PickingLicense {
            return Err(PurchaseError::PickerNotOpen);
        }
        self.selected = Some(license);
        self.stage = Stage::Checkout;
        Ok(())
    }

    /// Closing is not "cancel": the last pick survives so re-opening the
    /// checkout remembers it.
    pub fn close(&mut self) {
        self.stage = Stage::Closed;
    }

    pub fn initiate_payment(
        &self,
        host: &dyn HostAdapter,
    ) -> Result<PaymentOutcome, PurchaseError> {
        if self.stage != Stage::Checkout {
            return Err(PurchaseError::NotInCheckout);
        }
        if !host.is_available() {
            return Ok(PaymentOutcome::HostRequired);
        }
        Ok(PaymentOutcome::Acknowledged)
    }
}
