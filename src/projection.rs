// 🔪 Period Projector - slice one filing down to one period
//
// Input:  a multi-period statement payload + a target period
// Output: the same tree with exactly one value per line item
//
// Every canonical field in the schema is materialized first (as Absent when
// the filing did not disclose it), then every section and item the payload
// actually carries is overlaid. Nothing is hand-enumerated.

use crate::period::PeriodKey;
use crate::schema::StatementSchema;
use crate::snapshot::{LineValue, StatementPayload};
use crate::statement::{AdditionalItem, FieldPath, Section, Statements};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// REPORTED VALUE
// ============================================================================

/// Value of one line item for one period.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Reported {
    Present(f64),
    #[default]
    Absent,
}

impl Reported {
    pub fn as_option(&self) -> Option<f64> {
        match self {
            Reported::Present(v) => Some(*v),
            Reported::Absent => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Reported::Present(_))
    }
}

impl From<Option<f64>> for Reported {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Reported::Absent, Reported::Present)
    }
}

/// One line item of a period slice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectedLine {
    pub label: String,

    pub value: Reported,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xbrl_tag: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub provenance: BTreeMap<String, serde_json::Value>,
}

impl ProjectedLine {
    pub fn absent(label: impl Into<String>) -> Self {
        ProjectedLine {
            label: label.into(),
            ..Default::default()
        }
    }

    fn slice(line: &LineValue, period: &PeriodKey, fallback_label: &str) -> Self {
        let label = if line.label.trim().is_empty() {
            fallback_label.to_string()
        } else {
            line.label.clone()
        };

        ProjectedLine {
            label,
            value: line.value_for(period).into(),
            xbrl_tag: line.xbrl_tag.clone(),
            provenance: line.provenance.clone(),
        }
    }
}

/// Statement tree of one period.
pub type PeriodStatements = Statements<ProjectedLine>;

// ============================================================================
// PROJECTOR
// ============================================================================

/// Project `payload` onto `period`.
pub fn project(payload: &StatementPayload, period: &PeriodKey, schema: &StatementSchema) -> PeriodStatements {
    let mut out = PeriodStatements::new();

    for section in schema.sections() {
        for field in section.fields {
            let path = FieldPath::new(section.statement, section.name, field.key);
            out.set(&path, ProjectedLine::absent(field.label));
        }
    }

    for (kind, statement) in payload.iter() {
        for (section_name, section) in &statement.sections {
            let target = out
                .statement_mut(kind)
                .sections
                .entry(section_name.clone())
                .or_default();

            project_section(section, target, period, |item| {
                let path = FieldPath::new(kind, section_name.as_str(), item);
                schema
                    .label_for(&path)
                    .map(str::to_string)
                    .unwrap_or_else(|| item.to_string())
            });
        }
    }

    out
}

fn project_section<F>(
    section: &Section<LineValue>,
    target: &mut Section<ProjectedLine>,
    period: &PeriodKey,
    label_for: F,
) where
    F: Fn(&str) -> String,
{
    for (item, line) in &section.items {
        let fallback = label_for(item);
        target
            .items
            .insert(item.clone(), ProjectedLine::slice(line, period, &fallback));
    }

    // extras only survive when disclosed for this period
    for extra in &section.additional_items {
        let projected = ProjectedLine::slice(&extra.line, period, &extra.key);
        if projected.value.is_present() {
            target.additional_items.push(AdditionalItem {
                key: extra.key.clone(),
                category: extra.category.clone(),
                line: projected,
            });
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::fields;
    use crate::statement::StatementKind;

    fn payload() -> StatementPayload {
        let mut payload = StatementPayload::new();
        payload.set(
            &fields::revenue(),
            LineValue::new("Net sales")
                .with_period(2023, 100.0)
                .with_period(2022, 50.0)
                .with_value(100.0),
        );
        payload.set(
            &fields::total_assets(),
            LineValue::new("").with_value(900.0),
        );
        payload.set(
            &FieldPath::new(StatementKind::BalanceSheet, "custom_section", "crypto_assets"),
            LineValue::new("").with_period(2023, 7.0),
        );
        payload.push_additional(
            StatementKind::IncomeStatement,
            "operating_cost_section",
            AdditionalItem {
                key: "restructuring".to_string(),
                category: Some("opex".to_string()),
                line: LineValue::new("Restructuring").with_period(2023, 3.0),
            },
        );
        payload
    }

    #[test]
    fn test_projects_matching_column() {
        let schema = StatementSchema::standard();
        let out = project(&payload(), &PeriodKey::from(2022), &schema);

        assert_eq!(out.get(&fields::revenue()).unwrap().value, Reported::Present(50.0));
        assert_eq!(out.get(&fields::revenue()).unwrap().label, "Net sales");
    }

    #[test]
    fn test_missing_column_is_absent_not_scalar() {
        let schema = StatementSchema::standard();
        let out = project(&payload(), &PeriodKey::from(2021), &schema);

        assert_eq!(out.get(&fields::revenue()).unwrap().value, Reported::Absent);
    }

    #[test]
    fn test_legacy_scalar_and_schema_label() {
        let schema = StatementSchema::standard();
        let out = project(&payload(), &PeriodKey::from(2021), &schema);

        let assets = out.get(&fields::total_assets()).unwrap();
        assert_eq!(assets.value, Reported::Present(900.0));
        assert_eq!(assets.label, schema.label_for(&fields::total_assets()).unwrap());
    }

    #[test]
    fn test_every_schema_field_is_materialized() {
        let schema = StatementSchema::standard();
        let out = project(&StatementPayload::new(), &PeriodKey::from(2023), &schema);

        assert_eq!(out.line_count(), schema.field_count());
        let equity = out.get(&fields::total_equity()).unwrap();
        assert_eq!(equity.value, Reported::Absent);
        assert!(!equity.label.is_empty());
    }

    #[test]
    fn test_sections_outside_schema_are_projected() {
        let schema = StatementSchema::standard();
        let path = FieldPath::new(StatementKind::BalanceSheet, "custom_section", "crypto_assets");

        let out = project(&payload(), &PeriodKey::from(2023), &schema);
        let line = out.get(&path).unwrap();
        assert_eq!(line.value, Reported::Present(7.0));
        assert_eq!(line.label, "crypto_assets");
    }

    #[test]
    fn test_additional_items_only_when_disclosed() {
        let schema = StatementSchema::standard();
        let section = |out: &PeriodStatements| {
            out.statement(StatementKind::IncomeStatement)
                .section("operating_cost_section")
                .map(|s| s.additional_items.len())
                .unwrap_or(0)
        };

        assert_eq!(section(&project(&payload(), &PeriodKey::from(2023), &schema)), 1);
        assert_eq!(section(&project(&payload(), &PeriodKey::from(2022), &schema)), 0);
    }

    #[test]
    fn test_reported_json_shape() {
        let present = serde_json::to_value(Reported::Present(1.5)).unwrap();
        assert_eq!(present, serde_json::json!({"status": "present", "value": 1.5}));

        let absent = serde_json::to_value(Reported::Absent).unwrap();
        assert_eq!(absent, serde_json::json!({"status": "absent"}));
    }
}
