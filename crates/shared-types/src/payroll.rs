//! Payroll records and the client-side net salary preview.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{AppError, AppErrorKind};

wire_enum! {
    pub enum PayrollStatus {
        Draft => ("DRAFT", "Draft"),
        Processed => ("PROCESSED", "Processed"),
        Paid => ("PAID", "Paid"),
    }
}

/// Editable money inputs of a payroll record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PayrollAmounts {
    pub basic_salary: f64,
    #[serde(default)]
    pub housing_allowance: f64,
    #[serde(default)]
    pub transport_allowance: f64,
    #[serde(default)]
    pub meal_allowance: f64,
    #[serde(default)]
    pub other_allowances: f64,
    #[serde(default)]
    pub tax: f64,
    #[serde(default)]
    pub pension: f64,
    #[serde(default)]
    pub health_insurance: f64,
    #[serde(default)]
    pub loan_deduction: f64,
    #[serde(default)]
    pub other_deductions: f64,
}

/// One money input of the payroll form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayrollField {
    BasicSalary,
    HousingAllowance,
    TransportAllowance,
    MealAllowance,
    OtherAllowances,
    Tax,
    Pension,
    HealthInsurance,
    LoanDeduction,
    OtherDeductions,
}

impl PayrollField {
    pub const ALLOWANCES: &'static [PayrollField] = &[
        PayrollField::HousingAllowance,
        PayrollField::TransportAllowance,
        PayrollField::MealAllowance,
        PayrollField::OtherAllowances,
    ];

    pub const DEDUCTIONS: &'static [PayrollField] = &[
        PayrollField::Tax,
        PayrollField::Pension,
        PayrollField::HealthInsurance,
        PayrollField::LoanDeduction,
        PayrollField::OtherDeductions,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            PayrollField::BasicSalary => "basic_salary",
            PayrollField::HousingAllowance => "housing_allowance",
            PayrollField::TransportAllowance => "transport_allowance",
            PayrollField::MealAllowance => "meal_allowance",
            PayrollField::OtherAllowances => "other_allowances",
            PayrollField::Tax => "tax",
            PayrollField::Pension => "pension",
            PayrollField::HealthInsurance => "health_insurance",
            PayrollField::LoanDeduction => "loan_deduction",
            PayrollField::OtherDeductions => "other_deductions",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PayrollField::BasicSalary => "Basic Salary",
            PayrollField::HousingAllowance => "Housing",
            PayrollField::TransportAllowance => "Transport",
            PayrollField::MealAllowance => "Meal",
            PayrollField::OtherAllowances => "Other Allowances",
            PayrollField::Tax => "Tax",
            PayrollField::Pension => "Pension",
            PayrollField::HealthInsurance => "Health Insurance",
            PayrollField::LoanDeduction => "Loan",
            PayrollField::OtherDeductions => "Other Deductions",
        }
    }
}

/// Parse a form value. Blank, malformed, non-finite and negative input all
/// become 0.
pub fn parse_amount(raw: &str) -> f64 {
    raw.trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.max(0.0))
        .unwrap_or(0.0)
}

impl PayrollAmounts {
    pub fn get(&self, field: PayrollField) -> f64 {
        match field {
            PayrollField::BasicSalary => self.basic_salary,
            PayrollField::HousingAllowance => self.housing_allowance,
            PayrollField::TransportAllowance => self.transport_allowance,
            PayrollField::MealAllowance => self.meal_allowance,
            PayrollField::OtherAllowances => self.other_allowances,
            PayrollField::Tax => self.tax,
            PayrollField::Pension => self.pension,
            PayrollField::HealthInsurance => self.health_insurance,
            PayrollField::LoanDeduction => self.loan_deduction,
            PayrollField::OtherDeductions => self.other_deductions,
        }
    }

    /// Set a field, clamping negatives to 0.
    pub fn set(&mut self, field: PayrollField, value: f64) {
        let value = if value.is_finite() { value.max(0.0) } else { 0.0 };
        let slot = match field {
            PayrollField::BasicSalary => &mut self.basic_salary,
            PayrollField::HousingAllowance => &mut self.housing_allowance,
            PayrollField::TransportAllowance => &mut self.transport_allowance,
            PayrollField::MealAllowance => &mut self.meal_allowance,
            PayrollField::OtherAllowances => &mut self.other_allowances,
            PayrollField::Tax => &mut self.tax,
            PayrollField::Pension => &mut self.pension,
            PayrollField::HealthInsurance => &mut self.health_insurance,
            PayrollField::LoanDeduction => &mut self.loan_deduction,
            PayrollField::OtherDeductions => &mut self.other_deductions,
        };
        *slot = value;
    }

    pub fn total_allowances(&self) -> f64 {
        PayrollField::ALLOWANCES.iter().map(|f| self.get(*f)).sum()
    }

    pub fn total_deductions(&self) -> f64 {
        PayrollField::DEDUCTIONS.iter().map(|f| self.get(*f)).sum()
    }

    pub fn gross(&self) -> f64 {
        self.basic_salary + self.total_allowances()
    }

    /// `basic + Σ allowances − Σ deductions`. Preview only; the server's
    /// `net_salary` is authoritative.
    pub fn net(&self) -> f64 {
        self.gross() - self.total_deductions()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    pub id: i64,
    pub employee_id: i64,
    #[serde(default)]
    pub employee_name: Option<String>,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    #[serde(flatten)]
    pub amounts: PayrollAmounts,
    pub net_salary: f64,
    pub status: PayrollStatus,
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
}

/// Request DTO for creating or replacing a payroll record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRequest {
    pub employee_id: i64,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    #[serde(flatten)]
    pub amounts: PayrollAmounts,
    pub status: PayrollStatus,
    pub payment_date: Option<NaiveDate>,
}

impl From<&PayrollRecord> for PayrollRequest {
    fn from(r: &PayrollRecord) -> Self {
        Self {
            employee_id: r.employee_id,
            period_start: r.period_start,
            period_end: r.period_end,
            amounts: r.amounts,
            status: r.status,
            payment_date: r.payment_date,
        }
    }
}

/// Message shown by the payroll form when the server rejects the amounts
/// without naming a field.
pub const PAYROLL_VALIDATION_MESSAGE: &str = "Values must be positive";

/// Collapse a field-less 422 from the payroll endpoints to a single message.
pub fn flatten_payroll_error(err: AppError) -> AppError {
    if err.kind == AppErrorKind::ValidationError && err.field_errors.is_empty() {
        AppError::validation(PAYROLL_VALIDATION_MESSAGE, Default::default())
    } else {
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn net_adds_allowances_and_subtracts_deductions() {
        let mut a = PayrollAmounts::default();
        a.set(PayrollField::BasicSalary, 1000.0);
        a.set(PayrollField::HousingAllowance, 200.0);
        a.set(PayrollField::TransportAllowance, 100.0);
        a.set(PayrollField::LoanDeduction, 50.0);
        assert_eq!(a.gross(), 1300.0);
        assert_eq!(a.total_deductions(), 50.0);
        assert_eq!(a.net(), 1250.0);
    }

    #[test]
    fn negative_input_is_clamped() {
        let mut a = PayrollAmounts::default();
        a.set(PayrollField::BasicSalary, 500.0);
        a.set(PayrollField::Tax, -80.0);
        assert_eq!(a.tax, 0.0);
        assert_eq!(a.net(), 500.0);
        assert_eq!(parse_amount("-12"), 0.0);
    }

    #[test]
    fn parse_amount_handles_form_input() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount(" 1,250.50 "), 1250.5);
        assert_eq!(parse_amount("NaN"), 0.0);
        assert_eq!(parse_amount("inf"), 0.0);
    }

    #[test]
    fn net_recomputes_after_each_change() {
        let mut a = PayrollAmounts::default();
        a.set(PayrollField::BasicSalary, 1000.0);
        assert_eq!(a.net(), 1000.0);
        a.set(PayrollField::MealAllowance, 25.0);
        assert_eq!(a.net(), 1025.0);
        a.set(PayrollField::Pension, 75.0);
        assert_eq!(a.net(), 950.0);
    }

    #[test]
    fn record_decodes_flat_amounts() {
        let r: PayrollRecord = serde_json::from_str(
            r#"{"id":1,"employee_id":4,"period_start":"2025-01-01","period_end":"2025-01-31",
                "basic_salary":3000,"tax":450,"net_salary":2550,"status":"PROCESSED"}"#,
        )
        .unwrap();
        assert_eq!(r.amounts.basic_salary, 3000.0);
        assert_eq!(r.amounts.tax, 450.0);
        assert_eq!(r.amounts.net(), r.net_salary);
    }

    #[test]
    fn fieldless_422_is_flattened() {
        let err = flatten_payroll_error(AppError::from_response(422, r#"{"detail":"bad"}"#));
        assert_eq!(err.message, PAYROLL_VALIDATION_MESSAGE);

        let with_field =
            AppError::from_response(422, r#"{"detail":[{"loc":["body","tax"],"msg":"too big"}]}"#);
        let kept = flatten_payroll_error(with_field.clone());
        assert_eq!(kept, with_field);

        let not_found = flatten_payroll_error(AppError::from_response(404, r#"{"detail":"gone"}"#));
        assert_eq!(not_found.message, "gone");
    }
}
