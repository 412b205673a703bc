//! Style appliers used by the node formatters.
//!
//! - [`rule`]: Rule names, [`Amount`] policies and the resolved [`Rules`]
//! - [`whitespace`]: Spaces before and after a token
//! - [`line_break`]: Line breaks between a token and its significant neighbour
//! - [`indent`]: Indentation of tokens that start a line
//!
//! Every `*_if_needed` operation looks its rule up, does nothing for
//! [`Amount::Preserve`], and only mutates the stream when the current layout
//! deviates from the policy. Applying one twice is the same as applying it once.

pub mod indent;
pub mod line_break;
pub mod rule;
pub mod whitespace;

pub use indent::Indent;
pub use line_break::LineBreak;
pub use rule::{Amount, Rule, RuleTable, Rules};
pub use whitespace::Whitespace;
