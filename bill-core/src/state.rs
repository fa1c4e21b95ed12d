//! Invoice form state.
//!
//! The form is an immutable value: every edit is an [`InvoiceEvent`] applied
//! with [`InvoiceForm::apply`], which returns a new form. Derived totals are
//! computed from the finished invoice after each transition, never halfway
//! through one.
//!
//! Subtotal precedence follows the last edit. Any change to the item list
//! re-sums the items into `amount`; typing a subtotal directly is kept until
//! the next item change.

use tracing::{debug, warn};

use crate::calculations::totals::{Totals, recompute_totals};
use crate::models::{Invoice, LineItem, NumericField, RecentBill};
use crate::samples::apply_recent_bill;

/// Free-text invoice fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    CompanyName,
    CompanyAddress,
    CompanyGstin,
    CompanyState,
    CompanyEmail,
    BillNo,
    Date,
    BillTo,
    ShipTo,
    PlaceOfSupply,
    StateCode,
    Gstin,
    WorkOrderNo,
    InvoiceDescription,
}

/// Free-text line item fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemTextField {
    Description,
    HsnSac,
}

/// A single edit to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvoiceEvent {
    SetText(TextField, String),
    SetAmount(String),
    SetCgstPercent(String),
    SetSgstPercent(String),
    SetItemText {
        index: usize,
        field: ItemTextField,
        value: String,
    },
    /// Re-derives the item's due-now amount.
    SetItemTotalValue { index: usize, raw: String },
    /// Re-derives the item's due-now amount.
    SetItemDueNowPercent { index: usize, raw: String },
    /// Manual override of the derived due-now amount.
    SetItemDueNowAmount { index: usize, raw: String },
    AddItem,
    /// Ignored when only one item is left.
    RemoveItem(usize),
    LoadRecent(RecentBill),
    Reset(Invoice),
}

/// What a transition touched, and therefore where the subtotal comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    EnteredAmount,
    Items,
}

/// Current invoice plus its derived totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceForm {
    invoice: Invoice,
}

impl InvoiceForm {
    /// Wraps an invoice and derives its totals.
    ///
    /// A non-empty item list is authoritative for the subtotal; an invoice
    /// without items keeps its entered amount.
    pub fn new(invoice: Invoice) -> Self {
        let source = initial_source(&invoice);
        Self::derive(invoice, source)
    }

    pub fn invoice(&self) -> &Invoice {
        &self.invoice
    }

    pub fn totals(&self) -> &Totals {
        &self.invoice.totals
    }

    pub fn into_invoice(self) -> Invoice {
        self.invoice
    }

    /// Applies one edit and returns the resulting form.
    ///
    /// `self` is left untouched. Edits addressed to an item index that does
    /// not exist are ignored.
    pub fn apply(
        &self,
        event: InvoiceEvent,
    ) -> Self {
        let mut next = self.invoice.clone();
        let source = transition(&mut next, event);
        Self::derive(next, source)
    }

    /// Applies a sequence of edits in order.
    pub fn apply_all(
        &self,
        events: impl IntoIterator<Item = InvoiceEvent>,
    ) -> Self {
        events
            .into_iter()
            .fold(self.clone(), |form, event| form.apply(event))
    }

    fn derive(
        mut invoice: Invoice,
        source: Source,
    ) -> Self {
        let from_items = source == Source::Items;
        let totals = recompute_totals(
            &invoice.amount,
            &invoice.cgst_percent,
            &invoice.sgst_percent,
            from_items.then_some(invoice.items.as_slice()),
        );

        if from_items && invoice.amount.value() != Some(totals.amount) {
            debug!(subtotal = %totals.amount, "subtotal synced from items");
            invoice.amount = NumericField::Value(totals.amount);
        }
        invoice.totals = totals;

        Self { invoice }
    }
}

fn initial_source(invoice: &Invoice) -> Source {
    if invoice.items.is_empty() {
        Source::EnteredAmount
    } else {
        Source::Items
    }
}

fn optional_text(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}

fn set_text(
    invoice: &mut Invoice,
    field: TextField,
    value: String,
) {
    match field {
        TextField::CompanyName => invoice.issuer.company_name = optional_text(value),
        TextField::CompanyAddress => invoice.issuer.company_address = optional_text(value),
        TextField::CompanyGstin => invoice.issuer.company_gstin = optional_text(value),
        TextField::CompanyState => invoice.issuer.company_state = optional_text(value),
        TextField::CompanyEmail => invoice.issuer.company_email = optional_text(value),
        TextField::BillNo => invoice.bill_no = value,
        TextField::Date => invoice.date = value,
        TextField::BillTo => invoice.bill_to = value,
        TextField::ShipTo => invoice.ship_to = value,
        TextField::PlaceOfSupply => invoice.place_of_supply = optional_text(value),
        TextField::StateCode => invoice.state_code = optional_text(value),
        TextField::Gstin => invoice.gstin = optional_text(value),
        TextField::WorkOrderNo => invoice.work_order_no = optional_text(value),
        TextField::InvoiceDescription => invoice.invoice_description = optional_text(value),
    }
}

/// Runs `edit` on the item at `index`, or logs and does nothing.
fn edit_item(
    invoice: &mut Invoice,
    index: usize,
    edit: impl FnOnce(&mut LineItem),
) -> Source {
    match invoice.items.get_mut(index) {
        Some(item) => {
            edit(item);
            Source::Items
        }
        None => {
            warn!(index, items = invoice.items.len(), "edit to missing item ignored");
            Source::EnteredAmount
        }
    }
}

fn transition(
    invoice: &mut Invoice,
    event: InvoiceEvent,
) -> Source {
    match event {
        InvoiceEvent::SetText(field, value) => {
            set_text(invoice, field, value);
            Source::EnteredAmount
        }
        InvoiceEvent::SetAmount(raw) => {
            invoice.amount = NumericField::parse(&raw);
            Source::EnteredAmount
        }
        InvoiceEvent::SetCgstPercent(raw) => {
            invoice.cgst_percent = NumericField::parse(&raw);
            Source::EnteredAmount
        }
        InvoiceEvent::SetSgstPercent(raw) => {
            invoice.sgst_percent = NumericField::parse(&raw);
            Source::EnteredAmount
        }
        InvoiceEvent::SetItemText {
            index,
            field,
            value,
        } => edit_item(invoice, index, |item| match field {
            ItemTextField::Description => item.description = value,
            ItemTextField::HsnSac => item.hsn_sac = optional_text(value),
        }),
        InvoiceEvent::SetItemTotalValue { index, raw } => edit_item(invoice, index, |item| {
            item.total_value = NumericField::parse(&raw);
            item.rederive_due_now();
        }),
        InvoiceEvent::SetItemDueNowPercent { index, raw } => edit_item(invoice, index, |item| {
            item.due_now_percent = NumericField::parse(&raw);
            item.rederive_due_now();
        }),
        InvoiceEvent::SetItemDueNowAmount { index, raw } => edit_item(invoice, index, |item| {
            item.due_now_amount = NumericField::parse(&raw);
        }),
        InvoiceEvent::AddItem => {
            invoice.items.push(LineItem::blank());
            Source::Items
        }
        InvoiceEvent::RemoveItem(index) => {
            if invoice.items.len() <= 1 {
                warn!("an invoice needs at least one item; removal ignored");
                return Source::EnteredAmount;
            }
            if index >= invoice.items.len() {
                warn!(index, items = invoice.items.len(), "removal of missing item ignored");
                return Source::EnteredAmount;
            }
            invoice.items.remove(index);
            Source::Items
        }
        InvoiceEvent::LoadRecent(bill) => {
            apply_recent_bill(invoice, &bill);
            Source::Items
        }
        InvoiceEvent::Reset(replacement) => {
            *invoice = replacement;
            initial_source(invoice)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::common::round_half_up;
    use crate::samples::{default_invoice, find_recent_bill};

    fn form() -> InvoiceForm {
        let today = NaiveDate::from_ymd_opt(2024, 4, 1).expect("valid date");
        InvoiceForm::new(default_invoice(today))
    }

    fn set_total(
        index: usize,
        raw: &str,
    ) -> InvoiceEvent {
        InvoiceEvent::SetItemTotalValue {
            index,
            raw: raw.to_string(),
        }
    }

    fn set_percent(
        index: usize,
        raw: &str,
    ) -> InvoiceEvent {
        InvoiceEvent::SetItemDueNowPercent {
            index,
            raw: raw.to_string(),
        }
    }

    // =========================================================================
    // construction
    // =========================================================================

    #[test]
    fn new_derives_totals() {
        let form = form();

        assert_eq!(form.totals().amount, dec!(1266838));
        assert_eq!(form.totals().total_amount, dec!(1494868.84));
    }

    #[test]
    fn new_without_items_keeps_entered_amount() {
        let invoice = Invoice {
            amount: NumericField::Value(dec!(500)),
            cgst_percent: NumericField::Value(dec!(9)),
            sgst_percent: NumericField::Value(dec!(9)),
            ..Invoice::default()
        };

        let form = InvoiceForm::new(invoice);

        assert_eq!(form.totals().total_amount, dec!(590));
    }

    // =========================================================================
    // purity
    // =========================================================================

    #[test]
    fn apply_leaves_previous_form_untouched() {
        let before = form();
        let after = before.apply(InvoiceEvent::SetCgstPercent("0".to_string()));

        assert_eq!(before.totals().cgst_amount, dec!(114015.42));
        assert_eq!(after.totals().cgst_amount, Decimal::ZERO);
    }

    #[test]
    fn replaying_events_gives_identical_forms() {
        let events = vec![
            InvoiceEvent::AddItem,
            set_total(1, "2000"),
            set_percent(1, "50"),
            InvoiceEvent::SetSgstPercent("6".to_string()),
        ];

        assert_eq!(form().apply_all(events.clone()), form().apply_all(events));
    }

    // =========================================================================
    // subtotal precedence
    // =========================================================================

    #[test]
    fn manual_subtotal_is_kept_until_next_item_edit() {
        let typed = form().apply(InvoiceEvent::SetAmount("1000".to_string()));

        assert_eq!(typed.totals().amount, dec!(1000));
        assert_eq!(typed.totals().total_amount, dec!(1180));

        let still_typed = typed.apply(InvoiceEvent::SetText(TextField::BillNo, "X-1".to_string()));
        assert_eq!(still_typed.totals().amount, dec!(1000));

        let resummed = still_typed.apply(set_percent(0, "100"));
        assert_eq!(resummed.totals().amount, dec!(1266838));
        assert_eq!(resummed.invoice().amount.value(), Some(dec!(1266838)));
    }

    #[test]
    fn adding_items_resums_subtotal() {
        let form = form().apply_all([
            InvoiceEvent::AddItem,
            set_total(1, "250"),
            InvoiceEvent::AddItem,
        ]);

        assert_eq!(form.invoice().items.len(), 3);
        assert_eq!(form.totals().amount, dec!(1267088));
    }

    #[test]
    fn item_text_edit_also_resums() {
        let form = form()
            .apply(InvoiceEvent::SetAmount("1".to_string()))
            .apply(InvoiceEvent::SetItemText {
                index: 0,
                field: ItemTextField::Description,
                value: "Civil works".to_string(),
            });

        assert_eq!(form.invoice().items[0].description, "Civil works");
        assert_eq!(form.totals().amount, dec!(1266838));
    }

    // =========================================================================
    // per-item due-now derivation
    // =========================================================================

    #[test]
    fn changing_percent_rederives_due_now() {
        let form = form().apply(set_percent(0, "50"));

        assert_eq!(form.invoice().items[0].due_now_amount.value(), Some(dec!(633419)));
        assert_eq!(form.totals().amount, dec!(633419));
    }

    #[test]
    fn invalid_operand_leaves_due_now_unchanged() {
        let form = form().apply(set_total(0, "12x"));
        let item = &form.invoice().items[0];

        assert_eq!(item.total_value, NumericField::Invalid("12x".to_string()));
        assert_eq!(item.due_now_amount.value(), Some(dec!(1266838)));
    }

    #[test]
    fn manual_due_now_override_wins_until_operand_changes() {
        let overridden = form().apply(InvoiceEvent::SetItemDueNowAmount {
            index: 0,
            raw: "100000".to_string(),
        });
        assert_eq!(overridden.totals().amount, dec!(100000));

        let rederived = overridden.apply(set_percent(0, "10"));
        assert_eq!(rederived.totals().amount, dec!(126683.8));
    }

    // =========================================================================
    // item list bounds
    // =========================================================================

    #[test]
    fn last_item_cannot_be_removed() {
        let form = form().apply(InvoiceEvent::RemoveItem(0));

        assert_eq!(form.invoice().items.len(), 1);
    }

    #[test]
    fn removing_an_item_resums() {
        let form = form().apply_all([
            InvoiceEvent::AddItem,
            set_total(1, "500"),
            InvoiceEvent::RemoveItem(0),
        ]);

        assert_eq!(form.invoice().items.len(), 1);
        assert_eq!(form.totals().amount, dec!(500));
    }

    #[test]
    fn edits_to_missing_items_are_ignored() {
        let before = form();
        let after = before.apply(set_total(7, "1"));

        assert_eq!(after, before);
    }

    // =========================================================================
    // text fields, recent bills and reset
    // =========================================================================

    #[test]
    fn blank_optional_text_clears_field() {
        let form = form().apply(InvoiceEvent::SetText(TextField::Gstin, "  ".to_string()));

        assert_eq!(form.invoice().gstin, None);
    }

    #[test]
    fn loading_recent_bill_recovers_total() {
        let bill = find_recent_bill("INV-1023").expect("sample bill");
        let form = form().apply(InvoiceEvent::LoadRecent(bill));

        assert_eq!(form.invoice().bill_no, "INV-1023");
        assert_eq!(round_half_up(form.totals().total_amount), dec!(1454868.00));
        assert_eq!(
            form.totals().total_amount_in_words,
            "Rupees Fourteen Lakh Fifty Four Thousand Eight Hundred Sixty Eight Only"
        );
    }

    #[test]
    fn reset_replaces_everything() {
        let form = form().apply(InvoiceEvent::Reset(Invoice::default()));

        assert!(form.invoice().items.is_empty());
        assert_eq!(form.totals(), &Totals::default());
        assert_eq!(form.invoice().amount.or_zero(), Decimal::ZERO);
    }
}
