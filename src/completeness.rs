// 📊 Completeness Scorer - share of canonical fields a period slice fills

use crate::projection::PeriodStatements;
use crate::statement::FieldPath;

/// `filled / total` over `fields`; 0.0 when `fields` is empty.
pub fn completeness(statements: &PeriodStatements, fields: &[FieldPath]) -> f64 {
    if fields.is_empty() {
        return 0.0;
    }

    let filled = fields
        .iter()
        .filter(|path| statements.get(path).is_some_and(|line| line.value.is_present()))
        .count();

    filled as f64 / fields.len() as f64
}
