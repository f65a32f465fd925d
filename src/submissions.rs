//! Enquiry payloads posted by the site forms and their row mappings for the
//! hosted record store.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub const CALLBACK_TABLE: &str = "callback_requests";
pub const APPLICATION_TABLE: &str = "loan_applications";

/// "Request a callback" form. Field presence is the only validation applied;
/// anything beyond that is the broker's follow-up call.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackRequest {
    pub name: String,
    pub phone: String,
    pub preferred_time: CallbackWindow,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallbackWindow {
    Morning,
    Afternoon,
    Evening,
}

impl CallbackRequest {
    /// Row for [`CALLBACK_TABLE`]; columns are snake_case and every new
    /// request starts out pending.
    pub fn into_row(self, submitted_at: DateTime<Utc>) -> Value {
        json!({
            "name": self.name,
            "phone": self.phone,
            "preferred_time": self.preferred_time,
            "message": self.message,
            "status": "pending",
            "created_at": submitted_at.to_rfc3339(),
        })
    }
}

/// Multi-section loan application. Stored with the form's own camelCase
/// column names plus a `created_at` stamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplication {
    // Personal details
    pub applicant_name: String,
    pub date_of_birth: NaiveDate,
    pub pan_number: String,
    pub father_name: String,
    pub mother_name: String,
    pub phone_number: String,
    pub email: String,
    pub spouse_name: Option<String>,
    pub application_date: NaiveDate,
    pub application_time: String,

    // Residence details
    pub current_address: String,
    pub residence_type: ResidenceType,
    pub permanent_address: String,

    // Employment details
    pub employment_type: EmploymentType,
    pub company_name: String,
    pub company_address: String,
    pub office_phone: String,
    pub designation: String,
    pub time_in_current_job: String,

    // Loan details
    pub loan_type: LoanType,
    pub vehicle_details: Option<String>,
    pub invoice_price: Option<f64>,
    pub loan_amount: f64,
    pub tenure: u32,

    // References
    pub reference1_name: String,
    pub reference1_address: String,
    pub reference1_phone: String,
    pub reference2_name: String,
    pub reference2_address: String,
    pub reference2_phone: String,

    // Previous loan, if any
    pub previous_bank: Option<String>,
    pub previous_loan_type: Option<String>,
    pub previous_loan_amount: Option<f64>,
    pub previous_loan_start_date: Option<NaiveDate>,

    // Declaration
    pub signature: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResidenceType {
    Own,
    Parent,
    Rented,
    Company,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentType {
    Salaried,
    SelfEmployed,
}

/// Product codes as the intake sheet abbreviates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanType {
    #[serde(rename = "HL")]
    Home,
    #[serde(rename = "LAP")]
    AgainstProperty,
    #[serde(rename = "car")]
    Car,
    #[serde(rename = "BL")]
    Business,
    #[serde(rename = "PL")]
    Personal,
}

impl LoanApplication {
    /// Row for [`APPLICATION_TABLE`].
    pub fn into_row(self, submitted_at: DateTime<Utc>) -> serde_json::Result<Value> {
        let mut row = serde_json::to_value(&self)?;
        if let Value::Object(columns) = &mut row {
            columns.insert(
                "created_at".to_string(),
                Value::String(submitted_at.to_rfc3339()),
            );
        }
        Ok(row)
    }
}
