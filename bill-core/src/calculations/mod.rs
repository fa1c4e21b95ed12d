//! Invoice calculations: amount-in-words and derived totals.
//!
//! Both are pure functions over decimal inputs. The totals engine sits on
//! top of the words converter and nothing else.

pub mod common;
pub mod totals;
pub mod words;

pub use totals::{Totals, due_now_amount, recompute_totals, subtotal_from_items};
pub use words::{TOO_LARGE, number_to_words, rupees_in_words};
