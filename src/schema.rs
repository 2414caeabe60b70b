// 🏛️ Statement Schema - Registry of canonical sections and line items
//
// The registry is the single source of truth for which sections exist in
// each statement and which line items every section carries. The projector
// walks it so a period slice never silently misses a field.

use crate::statement::StatementKind::{
    BalanceSheet, CashFlowStatement, IncomeStatement, SupplementalData,
};
use crate::statement::{FieldPath, StatementKind};

// ============================================================================
// DEFINITIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub key: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionDef {
    pub statement: StatementKind,
    pub name: &'static str,
    pub fields: &'static [FieldDef],
}

const fn f(key: &'static str, label: &'static str) -> FieldDef {
    FieldDef { key, label }
}

const STANDARD_SECTIONS: &[SectionDef] = &[
    // ========================================================================
    // BALANCE SHEET
    // ========================================================================
    SectionDef {
        statement: BalanceSheet,
        name: "current_assets",
        fields: &[
            f("cash_and_equivalents", "Cash and Cash Equivalents"),
            f("short_term_investments", "Short-Term Investments"),
            f("accounts_receivable_net", "Accounts Receivable, Net"),
            f("inventories", "Inventories"),
            f("finance_div_loans_leases_st", "Finance Division Loans and Leases, Current"),
            f("finance_div_other_curr_assets", "Finance Division Other Current Assets"),
            f("other_assets", "Other Assets"),
            f("other_current_assets", "Other Current Assets"),
        ],
    },
    SectionDef {
        statement: BalanceSheet,
        name: "noncurrent_assets",
        fields: &[
            f("long_term_investments", "Long-Term Investments"),
            f("deferred_charges_lt", "Deferred Charges, Noncurrent"),
            f("ppe_at_cost", "Property, Plant and Equipment at Cost"),
            f("accumulated_depreciation", "Accumulated Depreciation"),
            f("ppe_net", "Property, Plant and Equipment, Net"),
            f("intangibles", "Intangible Assets"),
            f("goodwill", "Goodwill"),
            f("finance_div_loans_leases_lt", "Finance Division Loans and Leases, Noncurrent"),
            f("finance_div_other_lt_assets", "Finance Division Other Noncurrent Assets"),
            f("deferred_tax_assets_lt", "Deferred Tax Assets, Noncurrent"),
            f("restricted_cash", "Restricted Cash"),
            f("other_noncurrent_assets", "Other Noncurrent Assets"),
        ],
    },
    SectionDef {
        statement: BalanceSheet,
        name: "current_liabilities",
        fields: &[
            f("accounts_payable", "Accounts Payable"),
            f("accrued_liabilities", "Accrued Liabilities"),
            f("notes_payable_short_term_debt", "Notes Payable and Short-Term Debt"),
            f("current_maturities_long_term_debt", "Current Maturities of Long-Term Debt"),
            f("current_operating_lease_liabilities", "Operating Lease Liabilities, Current"),
            f("deferred_revenue_current", "Deferred Revenue, Current"),
            f("finance_div_curr", "Finance Division Current Liabilities"),
            f("other_current_liabilities", "Other Current Liabilities"),
        ],
    },
    SectionDef {
        statement: BalanceSheet,
        name: "noncurrent_liabilities",
        fields: &[
            f("long_term_debt", "Long-Term Debt"),
            f("long_term_operating_lease_liabilities", "Operating Lease Liabilities, Noncurrent"),
            f("deferred_tax_liabilities", "Deferred Tax Liabilities"),
            f("pension_obligations", "Pension Obligations"),
            f("finance_div_noncurr", "Finance Division Noncurrent Liabilities"),
            f("other_noncurrent_liabilities", "Other Noncurrent Liabilities"),
        ],
    },
    SectionDef {
        statement: BalanceSheet,
        name: "equity",
        fields: &[
            f("preferred_stock", "Preferred Stock"),
            f("common_stock_apic", "Common Stock and Additional Paid-In Capital"),
            f("retained_earnings_deficit", "Retained Earnings (Deficit)"),
            f("treasury_stock", "Treasury Stock"),
            f("accum_other_comprehensive_income", "Accumulated Other Comprehensive Income"),
            f("noncontrolling_interests", "Noncontrolling Interests"),
        ],
    },
    SectionDef {
        statement: BalanceSheet,
        name: "reported_for_validation",
        fields: &[
            f("total_current_assets", "Total Current Assets"),
            f("total_assets", "Total Assets"),
            f("total_current_liabilities", "Total Current Liabilities"),
            f("total_liabilities", "Total Liabilities"),
            f("total_equity", "Total Equity"),
            f("gross_profit", "Gross Profit"),
            f("operating_income", "Operating Income"),
            f("net_income", "Net Income"),
        ],
    },
    // ========================================================================
    // INCOME STATEMENT
    // ========================================================================
    SectionDef {
        statement: IncomeStatement,
        name: "gross_profit_section",
        fields: &[
            f("revenues", "Revenue"),
            f("cost_of_goods_sold", "Cost of Goods Sold"),
            f("gross_profit", "Gross Profit"),
        ],
    },
    SectionDef {
        statement: IncomeStatement,
        name: "operating_cost_section",
        fields: &[
            f("sga_expenses", "Selling, General and Administrative Expenses"),
            f("selling_marketing", "Selling and Marketing"),
            f("general_admin", "General and Administrative"),
            f("rd_expenses", "Research and Development"),
            f("advertising_expenses", "Advertising Expenses"),
            f("other_operating_expenses", "Other Operating Expenses"),
            f("operating_income", "Operating Income"),
        ],
    },
    SectionDef {
        statement: IncomeStatement,
        name: "non_operating_section",
        fields: &[
            f("interest_expense", "Interest Expense"),
            f("other_income_expense", "Other Income (Expense)"),
            f("equity_affiliates_non_operating", "Equity in Affiliates, Non-Operating"),
            f("income_before_tax", "Income Before Tax"),
        ],
    },
    SectionDef {
        statement: IncomeStatement,
        name: "tax_adjustments_section",
        fields: &[
            f("income_tax_expense", "Income Tax Expense"),
            f("discontinued_operations", "Discontinued Operations"),
            f("extraordinary_items", "Extraordinary Items"),
        ],
    },
    SectionDef {
        statement: IncomeStatement,
        name: "net_income_section",
        fields: &[
            f("net_income_to_common", "Net Income Attributable to Common"),
            f("net_income_to_nci", "Net Income Attributable to Noncontrolling Interests"),
            f("eps_basic", "EPS, Basic"),
            f("eps_diluted", "EPS, Diluted"),
            f("weighted_average_shares", "Weighted Average Shares"),
        ],
    },
    SectionDef {
        statement: IncomeStatement,
        name: "oci_section",
        fields: &[
            f("oci_foreign_currency", "OCI, Foreign Currency Translation"),
            f("oci_securities", "OCI, Securities"),
            f("oci_pension", "OCI, Pension"),
            f("oci_hedges", "OCI, Hedges"),
            f("other_comprehensive_income", "Other Comprehensive Income"),
        ],
    },
    SectionDef {
        statement: IncomeStatement,
        name: "nonrecurring_section",
        fields: &[
            f("impairment_charges", "Impairment Charges"),
            f("restructuring_charges", "Restructuring Charges"),
            f("gain_loss_asset_sales", "Gain (Loss) on Asset Sales"),
            f("settlement_costs", "Settlement Costs"),
            f("write_offs", "Write-Offs"),
            f("other_nonrecurring", "Other Non-Recurring Items"),
        ],
    },
    // ========================================================================
    // CASH FLOW STATEMENT
    // ========================================================================
    SectionDef {
        statement: CashFlowStatement,
        name: "operating_activities",
        fields: &[
            f("net_income_start", "Net Income (Cash Flow Start)"),
            f("depreciation_amortization", "Depreciation and Amortization"),
            f("amortization_intangibles", "Amortization of Intangibles"),
            f("deferred_taxes", "Deferred Taxes"),
            f("stock_based_compensation", "Stock-Based Compensation"),
            f("impairment_charges", "Impairment Charges"),
            f("gain_loss_asset_sales", "Gain (Loss) on Asset Sales"),
            f("change_receivables", "Change in Receivables"),
            f("change_inventory", "Change in Inventory"),
            f("change_payables", "Change in Payables"),
            f("change_accrued_expenses", "Change in Accrued Expenses"),
            f("change_deferred_revenue", "Change in Deferred Revenue"),
            f("other_working_capital", "Other Working Capital"),
            f("other_non_cash_items", "Other Non-Cash Items"),
        ],
    },
    SectionDef {
        statement: CashFlowStatement,
        name: "investing_activities",
        fields: &[
            f("capex", "Capital Expenditures"),
            f("acquisitions_net", "Acquisitions, Net"),
            f("purchases_securities", "Purchases of Securities"),
            f("maturities_securities", "Maturities of Securities"),
            f("sales_securities", "Sales of Securities"),
            f("proceeds_asset_sales", "Proceeds from Asset Sales"),
            f("other_investing", "Other Investing"),
        ],
    },
    SectionDef {
        statement: CashFlowStatement,
        name: "financing_activities",
        fields: &[
            f("debt_proceeds", "Proceeds from Debt"),
            f("debt_repayments", "Repayments of Debt"),
            f("stock_issuance_proceeds", "Proceeds from Stock Issuance"),
            f("share_repurchases", "Share Repurchases"),
            f("dividends_paid", "Dividends Paid"),
            f("tax_withholding_payments", "Tax Withholding Payments"),
            f("other_financing", "Other Financing"),
        ],
    },
    SectionDef {
        statement: CashFlowStatement,
        name: "supplemental_info",
        fields: &[
            f("cash_interest_paid", "Cash Paid for Interest"),
            f("cash_taxes_paid", "Cash Paid for Taxes"),
            f("non_cash_investing", "Non-Cash Investing Activities"),
            f("non_cash_financing", "Non-Cash Financing Activities"),
        ],
    },
    SectionDef {
        statement: CashFlowStatement,
        name: "cash_summary",
        fields: &[
            f("net_cash_operating", "Net Cash from Operating Activities"),
            f("net_cash_investing", "Net Cash from Investing Activities"),
            f("net_cash_financing", "Net Cash from Financing Activities"),
            f("fx_effect", "Effect of Exchange Rates"),
            f("net_change_in_cash", "Net Change in Cash"),
            f("cash_beginning", "Cash, Beginning of Period"),
            f("cash_ending", "Cash, End of Period"),
        ],
    },
    SectionDef {
        statement: CashFlowStatement,
        name: "reported_for_validation",
        fields: &[
            f("net_cash_operating", "Net Cash from Operating Activities"),
            f("net_cash_investing", "Net Cash from Investing Activities"),
            f("net_cash_financing", "Net Cash from Financing Activities"),
            f("net_change_in_cash", "Net Change in Cash"),
        ],
    },
    // ========================================================================
    // SUPPLEMENTAL DATA
    // ========================================================================
    SectionDef {
        statement: SupplementalData,
        name: "per_share",
        fields: &[
            f("eps_basic", "EPS, Basic"),
            f("eps_diluted", "EPS, Diluted"),
            f("shares_outstanding_basic", "Shares Outstanding, Basic"),
            f("shares_outstanding_diluted", "Shares Outstanding, Diluted"),
            f("common_dividends_per_share", "Common Dividends per Share"),
            f("share_price_year_end", "Share Price, Year End"),
        ],
    },
    SectionDef {
        statement: SupplementalData,
        name: "tax_and_other",
        fields: &[
            f("statutory_tax_rate", "Statutory Tax Rate"),
            f("effective_tax_rate", "Effective Tax Rate"),
            f("preferred_dividends", "Preferred Dividends"),
            f("depreciation_expense", "Depreciation Expense"),
            f("after_tax_nonrecurring", "After-Tax Non-Recurring Items"),
        ],
    },
];

// ============================================================================
// WELL-KNOWN FIELDS
// ============================================================================

/// Paths the engine's defaults refer to.
pub mod fields {
    use crate::statement::{FieldPath, StatementKind};

    pub fn revenue() -> FieldPath {
        FieldPath::new(StatementKind::IncomeStatement, "gross_profit_section", "revenues")
    }

    pub fn total_assets() -> FieldPath {
        FieldPath::new(StatementKind::BalanceSheet, "reported_for_validation", "total_assets")
    }

    pub fn total_liabilities() -> FieldPath {
        FieldPath::new(StatementKind::BalanceSheet, "reported_for_validation", "total_liabilities")
    }

    pub fn total_equity() -> FieldPath {
        FieldPath::new(StatementKind::BalanceSheet, "reported_for_validation", "total_equity")
    }

    pub fn cash_and_equivalents() -> FieldPath {
        FieldPath::new(StatementKind::BalanceSheet, "current_assets", "cash_and_equivalents")
    }

    pub fn net_income_start() -> FieldPath {
        FieldPath::new(StatementKind::CashFlowStatement, "operating_activities", "net_income_start")
    }

    pub fn net_cash_operating() -> FieldPath {
        FieldPath::new(StatementKind::CashFlowStatement, "cash_summary", "net_cash_operating")
    }

    pub fn net_income_to_common() -> FieldPath {
        FieldPath::new(StatementKind::IncomeStatement, "net_income_section", "net_income_to_common")
    }
}

// ============================================================================
// SCHEMA
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct StatementSchema {
    sections: &'static [SectionDef],
}

impl StatementSchema {
    /// The standard four-statement layout.
    pub fn standard() -> Self {
        StatementSchema {
            sections: STANDARD_SECTIONS,
        }
    }

    pub fn sections(&self) -> &'static [SectionDef] {
        self.sections
    }

    pub fn sections_of(&self, statement: StatementKind) -> impl Iterator<Item = &'static SectionDef> {
        self.sections.iter().filter(move |s| s.statement == statement)
    }

    pub fn section(&self, statement: StatementKind, name: &str) -> Option<&'static SectionDef> {
        self.sections_of(statement).find(|s| s.name == name)
    }

    pub fn field(&self, path: &FieldPath) -> Option<&'static FieldDef> {
        self.section(path.statement, &path.section)?
            .fields
            .iter()
            .find(|field| field.key == path.item)
    }

    pub fn contains(&self, path: &FieldPath) -> bool {
        self.field(path).is_some()
    }

    pub fn label_for(&self, path: &FieldPath) -> Option<&'static str> {
        self.field(path).map(|field| field.label)
    }

    pub fn field_count(&self) -> usize {
        self.sections.iter().map(|s| s.fields.len()).sum()
    }
}

impl Default for StatementSchema {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// TESTS
// ============================================================================
