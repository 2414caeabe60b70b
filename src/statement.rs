// 🧾 Statement Tree - one shape for filings and for period projections
//
// A filing payload and a projected period share the same tree:
//   statement -> section -> line item (plus an open-ended additional_items list)
// Only the leaf differs: `LineValue` (multi-period, as disclosed) on input,
// `ProjectedLine` (one value for one period) on output.

use crate::error::{Result, SynthesisError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// STATEMENT KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    BalanceSheet,
    IncomeStatement,
    CashFlowStatement,
    SupplementalData,
}

impl StatementKind {
    pub const ALL: [StatementKind; 4] = [
        StatementKind::BalanceSheet,
        StatementKind::IncomeStatement,
        StatementKind::CashFlowStatement,
        StatementKind::SupplementalData,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatementKind::BalanceSheet => "balance_sheet",
            StatementKind::IncomeStatement => "income_statement",
            StatementKind::CashFlowStatement => "cash_flow_statement",
            StatementKind::SupplementalData => "supplemental_data",
        }
    }
}

impl FromStr for StatementKind {
    type Err = SynthesisError;

    fn from_str(s: &str) -> Result<Self> {
        StatementKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| SynthesisError::InvalidFieldPath(s.to_string()))
    }
}

// ============================================================================
// FIELD PATH
// ============================================================================

/// Address of one line item: `statement.section.item`.
///
/// Serialized as its dotted string so configuration files stay readable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldPath {
    pub statement: StatementKind,
    pub section: String,
    pub item: String,
}

impl FieldPath {
    pub fn new(statement: StatementKind, section: impl Into<String>, item: impl Into<String>) -> Self {
        FieldPath {
            statement,
            section: section.into(),
            item: item.into(),
        }
    }

    pub fn parse(path: &str) -> Result<Self> {
        let parts: Vec<&str> = path.trim().split('.').collect();
        match parts.as_slice() {
            [statement, section, item] if !section.is_empty() && !item.is_empty() => {
                let statement = statement
                    .parse::<StatementKind>()
                    .map_err(|_| SynthesisError::InvalidFieldPath(path.to_string()))?;
                Ok(FieldPath::new(statement, *section, *item))
            }
            _ => Err(SynthesisError::InvalidFieldPath(path.to_string())),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.statement.as_str(), self.section, self.item)
    }
}

impl FromStr for FieldPath {
    type Err = SynthesisError;

    fn from_str(s: &str) -> Result<Self> {
        FieldPath::parse(s)
    }
}

impl TryFrom<String> for FieldPath {
    type Error = SynthesisError;

    fn try_from(value: String) -> Result<Self> {
        FieldPath::parse(&value)
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.to_string()
    }
}

// ============================================================================
// TREE
// ============================================================================

/// Catch-all line item outside the canonical mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditionalItem<L> {
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    pub line: L,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section<L> {
    #[serde(default = "BTreeMap::new", skip_serializing_if = "BTreeMap::is_empty")]
    pub items: BTreeMap<String, L>,

    #[serde(default = "Vec::new", skip_serializing_if = "Vec::is_empty")]
    pub additional_items: Vec<AdditionalItem<L>>,
}

impl<L> Section<L> {
    pub fn new() -> Self {
        Section {
            items: BTreeMap::new(),
            additional_items: Vec::new(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.items.len() + self.additional_items.len()
    }
}

impl<L> Default for Section<L> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Statement<L> {
    pub sections: BTreeMap<String, Section<L>>,
}

impl<L> Statement<L> {
    pub fn new() -> Self {
        Statement {
            sections: BTreeMap::new(),
        }
    }

    pub fn section(&self, name: &str) -> Option<&Section<L>> {
        self.sections.get(name)
    }

    pub fn line_count(&self) -> usize {
        self.sections.values().map(Section::line_count).sum()
    }
}

impl<L> Default for Statement<L> {
    fn default() -> Self {
        Self::new()
    }
}

/// The four statements of one filing (or of one projected period).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statements<L> {
    #[serde(default = "Statement::new")]
    pub balance_sheet: Statement<L>,

    #[serde(default = "Statement::new")]
    pub income_statement: Statement<L>,

    #[serde(default = "Statement::new")]
    pub cash_flow_statement: Statement<L>,

    #[serde(default = "Statement::new")]
    pub supplemental_data: Statement<L>,
}

impl<L> Statements<L> {
    pub fn new() -> Self {
        Statements {
            balance_sheet: Statement::new(),
            income_statement: Statement::new(),
            cash_flow_statement: Statement::new(),
            supplemental_data: Statement::new(),
        }
    }

    pub fn statement(&self, kind: StatementKind) -> &Statement<L> {
        match kind {
            StatementKind::BalanceSheet => &self.balance_sheet,
            StatementKind::IncomeStatement => &self.income_statement,
            StatementKind::CashFlowStatement => &self.cash_flow_statement,
            StatementKind::SupplementalData => &self.supplemental_data,
        }
    }

    pub fn statement_mut(&mut self, kind: StatementKind) -> &mut Statement<L> {
        match kind {
            StatementKind::BalanceSheet => &mut self.balance_sheet,
            StatementKind::IncomeStatement => &mut self.income_statement,
            StatementKind::CashFlowStatement => &mut self.cash_flow_statement,
            StatementKind::SupplementalData => &mut self.supplemental_data,
        }
    }

    /// All four statements in a fixed order.
    pub fn iter(&self) -> impl Iterator<Item = (StatementKind, &Statement<L>)> {
        StatementKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.statement(kind)))
    }

    /// Canonical line item at `path`. Additional items are not addressable.
    pub fn get(&self, path: &FieldPath) -> Option<&L> {
        self.statement(path.statement)
            .section(&path.section)?
            .items
            .get(&path.item)
    }

    pub fn set(&mut self, path: &FieldPath, line: L) {
        self.statement_mut(path.statement)
            .sections
            .entry(path.section.clone())
            .or_default()
            .items
            .insert(path.item.clone(), line);
    }

    pub fn push_additional(
        &mut self,
        statement: StatementKind,
        section: &str,
        item: AdditionalItem<L>,
    ) {
        self.statement_mut(statement)
            .sections
            .entry(section.to_string())
            .or_default()
            .additional_items
            .push(item);
    }

    pub fn line_count(&self) -> usize {
        self.iter().map(|(_, statement)| statement.line_count()).sum()
    }

    /// Every line in the tree, canonical items and additional items alike.
    pub fn lines(&self) -> impl Iterator<Item = &L> {
        self.iter()
            .flat_map(|(_, statement)| statement.sections.values())
            .flat_map(|section| {
                section
                    .items
                    .values()
                    .chain(section.additional_items.iter().map(|extra| &extra.line))
            })
    }

    pub fn is_empty(&self) -> bool {
        self.line_count() == 0
    }
}

impl<L> Default for Statements<L> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
