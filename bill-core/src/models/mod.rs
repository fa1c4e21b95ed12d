mod invoice;
mod line_item;
mod numeric;
mod recent_bill;

pub use invoice::{Invoice, Issuer};
pub use line_item::LineItem;
pub use numeric::NumericField;
pub use recent_bill::RecentBill;
