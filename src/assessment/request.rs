use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Payload sent to the scoring service for a single assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRequest {
    pub business_name: String,
    pub industry: String,
    pub annual_revenue: f64,
    pub years_in_business: i64,
    pub employee_count: i64,
    pub credit_score: i64,
    pub monthly_expenses: f64,
    pub location: String,
    pub business_type: String,
    pub loan_amount: f64,
    pub email: String,
}

/// Keys accepted by the assessment form, named as on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    BusinessName,
    Industry,
    AnnualRevenue,
    YearsInBusiness,
    EmployeeCount,
    CreditScore,
    MonthlyExpenses,
    Location,
    BusinessType,
    LoanAmount,
    Email,
}

impl DraftField {
    pub const ALL: [DraftField; 11] = [
        DraftField::BusinessName,
        DraftField::Industry,
        DraftField::AnnualRevenue,
        DraftField::YearsInBusiness,
        DraftField::EmployeeCount,
        DraftField::CreditScore,
        DraftField::MonthlyExpenses,
        DraftField::Location,
        DraftField::BusinessType,
        DraftField::LoanAmount,
        DraftField::Email,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::BusinessName => "businessName",
            DraftField::Industry => "industry",
            DraftField::AnnualRevenue => "annualRevenue",
            DraftField::YearsInBusiness => "yearsInBusiness",
            DraftField::EmployeeCount => "employeeCount",
            DraftField::CreditScore => "creditScore",
            DraftField::MonthlyExpenses => "monthlyExpenses",
            DraftField::Location => "location",
            DraftField::BusinessType => "businessType",
            DraftField::LoanAmount => "loanAmount",
            DraftField::Email => "email",
        }
    }

    /// The credit score is the only field the form lets the applicant skip
    pub fn is_required(&self) -> bool {
        !matches!(self, DraftField::CreditScore)
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFieldError(pub String);

impl fmt::Display for UnknownFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown assessment field '{}'", self.0)
    }
}

impl std::error::Error for UnknownFieldError {}

impl FromStr for DraftField {
    type Err = UnknownFieldError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        DraftField::ALL
            .into_iter()
            .find(|field| field.as_str() == name)
            .ok_or_else(|| UnknownFieldError(name.to_string()))
    }
}

/// Raw form input, exactly as typed or selected by the applicant
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentDraft {
    pub business_name: String,
    pub industry: String,
    pub annual_revenue: String,
    pub years_in_business: String,
    pub employee_count: String,
    pub credit_score: String,
    pub monthly_expenses: String,
    pub location: String,
    pub business_type: String,
    pub loan_amount: String,
    pub email: String,
}

impl AssessmentDraft {
    /// Stores the raw value against the field. Nothing is validated here.
    pub fn update_field(&mut self, field: DraftField, raw_value: impl Into<String>) {
        *self.slot_mut(field) = raw_value.into();
    }

    pub fn value(&self, field: DraftField) -> &str {
        match field {
            DraftField::BusinessName => &self.business_name,
            DraftField::Industry => &self.industry,
            DraftField::AnnualRevenue => &self.annual_revenue,
            DraftField::YearsInBusiness => &self.years_in_business,
            DraftField::EmployeeCount => &self.employee_count,
            DraftField::CreditScore => &self.credit_score,
            DraftField::MonthlyExpenses => &self.monthly_expenses,
            DraftField::Location => &self.location,
            DraftField::BusinessType => &self.business_type,
            DraftField::LoanAmount => &self.loan_amount,
            DraftField::Email => &self.email,
        }
    }

    fn slot_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::BusinessName => &mut self.business_name,
            DraftField::Industry => &mut self.industry,
            DraftField::AnnualRevenue => &mut self.annual_revenue,
            DraftField::YearsInBusiness => &mut self.years_in_business,
            DraftField::EmployeeCount => &mut self.employee_count,
            DraftField::CreditScore => &mut self.credit_score,
            DraftField::MonthlyExpenses => &mut self.monthly_expenses,
            DraftField::Location => &mut self.location,
            DraftField::BusinessType => &mut self.business_type,
            DraftField::LoanAmount => &mut self.loan_amount,
            DraftField::Email => &mut self.email,
        }
    }

    /// Required fields that are still blank, in form order
    pub fn missing_required(&self) -> Vec<DraftField> {
        DraftField::ALL
            .into_iter()
            .filter(|field| field.is_required() && self.value(*field).trim().is_empty())
            .collect()
    }
}

/// Materializes the wire payload from a draft.
///
/// Never fails: a numeric field that does not parse becomes 0, and text
/// fields are passed through untouched. Range limits shown by the form
/// are not applied here.
pub fn build_request(draft: &AssessmentDraft) -> AssessmentRequest {
    AssessmentRequest {
        business_name: draft.business_name.clone(),
        industry: draft.industry.clone(),
        annual_revenue: parse_decimal(&draft.annual_revenue),
        years_in_business: parse_integer(&draft.years_in_business),
        employee_count: parse_integer(&draft.employee_count),
        credit_score: parse_integer(&draft.credit_score),
        monthly_expenses: parse_decimal(&draft.monthly_expenses),
        location: draft.location.clone(),
        business_type: draft.business_type.clone(),
        loan_amount: parse_decimal(&draft.loan_amount),
        email: draft.email.clone(),
    }
}

/// Parses the longest decimal prefix of `raw` ("12.5k" -> 12.5), or 0
pub fn parse_decimal(raw: &str) -> f64 {
    let text = raw.trim_start();
    let bytes = text.as_bytes();

    let mut end = sign_len(bytes);
    let int_digits = digit_run(bytes, end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digit_run(bytes, end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits + frac_digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let exp_sign = sign_len(&bytes[end + 1..]);
        let exp_digits = digit_run(bytes, end + 1 + exp_sign);
        if exp_digits > 0 {
            end += 1 + exp_sign + exp_digits;
        }
    }

    match text[..end].parse::<f64>() {
        // -0 collapses to 0 as well
        Ok(value) if value.is_finite() && value != 0.0 => value,
        _ => 0.0,
    }
}

/// Parses the longest integer prefix of `raw` ("3.7" -> 3, "0x1A" -> 26), or 0
pub fn parse_integer(raw: &str) -> i64 {
    let text = raw.trim_start();
    let bytes = text.as_bytes();

    let sign = sign_len(bytes);
    if matches!(bytes.get(sign..sign + 2), Some(b"0x" | b"0X")) {
        let start = sign + 2;
        let hex_digits = bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_hexdigit())
            .count();
        let magnitude = i64::from_str_radix(&text[start..start + hex_digits], 16).unwrap_or(0);
        return if bytes.first() == Some(&b'-') {
            -magnitude
        } else {
            magnitude
        };
    }

    let digits = digit_run(bytes, sign);
    if digits == 0 {
        return 0;
    }

    text[..sign + digits].parse::<i64>().unwrap_or(0)
}

fn sign_len(bytes: &[u8]) -> usize {
    usize::from(matches!(bytes.first(), Some(b'+' | b'-')))
}

fn digit_run(bytes: &[u8], start: usize) -> usize {
    bytes
        .get(start..)
        .unwrap_or_default()
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count()
}
