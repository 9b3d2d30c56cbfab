//! Variant pricing - Discount derivation and validated field edits.
//!
//! The discount percentage is never entered directly; it follows MRP and RSP.
//! RSP edits are mirrored into the generic selling price.

use crate::{
    core::matrix::{VariantKey, VariantMatrix, VariantRecord},
    errors::{Error, Result},
};

/// Percentage saved when selling at `rsp` against a maximum retail price of `mrp`.
///
/// Returns 0 unless both prices are positive and `rsp` does not exceed `mrp`.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn discount(mrp: i64, rsp: i64) -> i32 {
    if mrp > 0 && rsp > 0 && rsp <= mrp {
        (((mrp - rsp) as f64 / mrp as f64) * 100.0).round() as i32
    } else {
        0
    }
}

/// Rounds an entered amount to integral currency units.
///
/// # Errors
/// Returns [`Error::InvalidAmount`] for negative, NaN or infinite input.
#[allow(clippy::cast_possible_truncation)]
pub fn round_amount(amount: f64) -> Result<i64> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(amount.round() as i64)
}

/// One operator edit to a variant card.
#[derive(Clone, Debug, PartialEq)]
pub enum VariantEdit {
    /// Units in stock
    Quantity(i64),
    /// Stock keeping unit
    Sku(String),
    /// Maximum retail price
    MrpPrice(f64),
    /// Retail selling price, also becomes the selling price
    RspPrice(f64),
    /// Purchase cost
    CostPrice(f64),
}

/// An edit whose input has already been validated and rounded.
enum CheckedEdit {
    Quantity(i32),
    Sku(String),
    MrpPrice(i64),
    RspPrice(i64),
    CostPrice(i64),
}

impl VariantEdit {
    fn check(self) -> Result<CheckedEdit> {
        Ok(match self {
            Self::Quantity(quantity) => CheckedEdit::Quantity(
                i32::try_from(quantity)
                    .ok()
                    .filter(|q| *q >= 0)
                    .ok_or(Error::InvalidQuantity { quantity })?,
            ),
            Self::Sku(sku) => CheckedEdit::Sku(sku.trim().to_string()),
            Self::MrpPrice(amount) => CheckedEdit::MrpPrice(round_amount(amount)?),
            Self::RspPrice(amount) => CheckedEdit::RspPrice(round_amount(amount)?),
            Self::CostPrice(amount) => CheckedEdit::CostPrice(round_amount(amount)?),
        })
    }
}

impl VariantRecord {
    fn apply(&mut self, edit: CheckedEdit) {
        match edit {
            CheckedEdit::Quantity(quantity) => self.quantity = quantity,
            CheckedEdit::Sku(sku) => self.sku = sku,
            CheckedEdit::MrpPrice(mrp) => {
                self.mrp_price = mrp;
                self.discount_percentage = discount(self.mrp_price, self.rsp_price);
            }
            CheckedEdit::RspPrice(rsp) => {
                self.rsp_price = rsp;
                self.price = rsp;
                self.discount_percentage = discount(self.mrp_price, self.rsp_price);
            }
            CheckedEdit::CostPrice(cost) => self.cost_price = cost,
        }
        self.touch();
    }
}

impl VariantMatrix {
    /// Applies one edit to the record with `key`.
    ///
    /// Input is validated before the record is touched, so a rejected edit
    /// leaves the matrix exactly as it was.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The amount is negative or not finite
    /// - The quantity is negative or out of range
    /// - No record has this key
    pub fn edit_variant(&mut self, key: &VariantKey, edit: VariantEdit) -> Result<&VariantRecord> {
        let checked = edit.check()?;
        let record = self.record_mut(key)?;
        record.apply(checked);
        Ok(record)
    }
}
