//! Rule names and their resolved policies.
//!
//! Every spacing decision a node formatter makes is keyed by a [`Rule`]. The
//! configuration maps rules to amounts in four tables (whitespace before and
//! after, line breaks before and after); [`Rules`] is the resolved, read-only
//! view the formatters consult.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::FormatError;

macro_rules! rules {
    ($($name:ident),+ $(,)?) => {
        /// Name of a style decision
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum Rule {
            $($name,)+
        }

        impl Rule {
            /// Every rule, in declaration order
            pub const ALL: &'static [Rule] = &[$(Rule::$name,)+];

            #[must_use]
            pub fn name(self) -> &'static str {
                match self {
                    $(Rule::$name => stringify!($name),)+
                }
            }
        }
    };
}

rules! {
    FunctionName,
    ParameterList,
    ParameterComma,
    ArgumentList,
    ArgumentComma,
    BinaryExpressionOperator,
    LogicalExpressionOperator,
    AssignmentOperator,
    CommaOperator,
    Property,
    PropertyName,
    PropertyValue,
    VariableName,
    VariableValue,
    FunctionDeclarationOpeningBrace,
    FunctionDeclarationClosingBrace,
    ObjectExpressionOpeningBrace,
    ObjectExpressionClosingBrace,
    IfStatementConditional,
    IfStatementOpeningBrace,
    IfStatementClosingBrace,
    ElseIfStatement,
    ElseIfStatementOpeningBrace,
    ElseIfStatementClosingBrace,
    ElseStatement,
    ElseStatementOpeningBrace,
    ElseStatementClosingBrace,
    WhileStatementConditional,
    WhileStatementOpeningBrace,
    WhileStatementClosingBrace,
    ForStatementExpression,
    ForStatementSemicolon,
    ForStatementOpeningBrace,
    ForStatementClosingBrace,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Rule {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rule::ALL
            .iter()
            .copied()
            .find(|rule| rule.name() == s)
            .ok_or_else(|| FormatError::UnknownRule(s.to_string()))
    }
}

impl TryFrom<String> for Rule {
    type Error = FormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rule> for String {
    fn from(rule: Rule) -> Self {
        rule.name().to_string()
    }
}

/// Resolved policy of a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Amount {
    /// Leave the gap as written
    Preserve,
    /// Force exactly this many spaces or line breaks (0 = none)
    Exactly(usize),
}

impl Amount {
    /// Interpret a configured amount, where any negative value means preserve
    #[must_use]
    pub fn from_setting(value: i8) -> Self {
        usize::try_from(value).map_or(Amount::Preserve, Amount::Exactly)
    }
}

/// A table of configured amounts keyed by rule
pub type RuleTable = BTreeMap<Rule, i8>;

fn resolve(table: &RuleTable) -> BTreeMap<Rule, Amount> {
    table
        .iter()
        .map(|(&rule, &value)| (rule, Amount::from_setting(value)))
        .collect()
}

/// Policies of one formatting pass
#[derive(Debug, Clone, Default)]
pub struct Rules {
    whitespace_before: BTreeMap<Rule, Amount>,
    whitespace_after: BTreeMap<Rule, Amount>,
    line_break_before: BTreeMap<Rule, Amount>,
    line_break_after: BTreeMap<Rule, Amount>,
    indent_unit: String,
}

impl Rules {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let indent_unit = if config.use_tabs {
            "\t".to_string()
        } else {
            " ".repeat(config.indent)
        };
        Self {
            whitespace_before: resolve(&config.whitespace.before),
            whitespace_after: resolve(&config.whitespace.after),
            line_break_before: resolve(&config.line_break.before),
            line_break_after: resolve(&config.line_break.after),
            indent_unit,
        }
    }

    #[must_use]
    pub fn whitespace_before(&self, rule: Rule) -> Amount {
        lookup(&self.whitespace_before, rule)
    }

    #[must_use]
    pub fn whitespace_after(&self, rule: Rule) -> Amount {
        lookup(&self.whitespace_after, rule)
    }

    #[must_use]
    pub fn line_break_before(&self, rule: Rule) -> Amount {
        lookup(&self.line_break_before, rule)
    }

    #[must_use]
    pub fn line_break_after(&self, rule: Rule) -> Amount {
        lookup(&self.line_break_after, rule)
    }

    /// Text of one indentation level
    #[must_use]
    pub fn indent_unit(&self) -> &str {
        &self.indent_unit
    }
}

fn lookup(table: &BTreeMap<Rule, Amount>, rule: Rule) -> Amount {
    table.get(&rule).copied().unwrap_or(Amount::Preserve)
}
