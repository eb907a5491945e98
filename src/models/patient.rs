//! Patient record as persisted in `patientData.json`.
//!
//! A record carries two field subsets with different update rules:
//! demographics (owned by the front desk, replaced as a whole) and
//! clinical data (owned by doctors, merged field by field).

use serde::{Deserialize, Serialize};

use super::lenient_string;

/// One patient in the store. Field names follow the camelCase JSON
/// layout of the store file; absent values are omitted on write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,

    // ── Demographics ──────────────────────────────────────
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, alias = "marital_status", skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    // ── Clinical ──────────────────────────────────────────
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub glucose_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prescription: Option<String>,
}

/// The receptionist-owned field subset. Submitted as a complete set by the
/// registration and edit forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Demographics {
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub age: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    #[serde(alias = "marital_status")]
    pub marital_status: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Doctor-supplied clinical values. `None` means "not supplied, leave as is".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClinicalUpdate {
    #[serde(deserialize_with = "lenient_string")]
    pub height: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub heart_rate: Option<String>,
    pub blood_pressure: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub glucose_level: Option<String>,
    pub symptoms: Option<String>,
    pub diagnosis: Option<String>,
    pub prescription: Option<String>,
}

impl ClinicalUpdate {
    /// True when no field was supplied.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Patient {
    /// New record with the given id and demographics; clinical fields empty.
    pub fn new(id: impl Into<String>, demographics: Demographics) -> Self {
        let mut patient = Self {
            id: id.into(),
            ..Self::default()
        };
        patient.replace_demographics(demographics);
        patient
    }

    pub fn demographics(&self) -> Demographics {
        Demographics {
            name: self.name.clone(),
            age: self.age.clone(),
            dob: self.dob.clone(),
            gender: self.gender.clone(),
            marital_status: self.marital_status.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
        }
    }

    /// Overwrite the whole demographic subset. A field missing from
    /// `demographics` is cleared, not kept.
    pub fn replace_demographics(&mut self, demographics: Demographics) {
        let Demographics {
            name,
            age,
            dob,
            gender,
            marital_status,
            phone,
            email,
            address,
        } = demographics;
        self.name = name;
        self.age = age;
        self.dob = dob;
        self.gender = gender;
        self.marital_status = marital_status;
        self.phone = phone;
        self.email = email;
        self.address = address;
    }

    /// Apply the supplied clinical fields, keeping every other value.
    pub fn merge_clinical(&mut self, update: ClinicalUpdate) {
        let ClinicalUpdate {
            height,
            heart_rate,
            blood_pressure,
            glucose_level,
            symptoms,
            diagnosis,
            prescription,
        } = update;
        merge_field(&mut self.height, height);
        merge_field(&mut self.heart_rate, heart_rate);
        merge_field(&mut self.blood_pressure, blood_pressure);
        merge_field(&mut self.glucose_level, glucose_level);
        merge_field(&mut self.symptoms, symptoms);
        merge_field(&mut self.diagnosis, diagnosis);
        merge_field(&mut self.prescription, prescription);
    }

    /// Whether a doctor has recorded anything for this patient yet.
    pub fn has_clinical_data(&self) -> bool {
        [
            &self.height,
            &self.heart_rate,
            &self.blood_pressure,
            &self.glucose_level,
            &self.symptoms,
            &self.diagnosis,
            &self.prescription,
        ]
        .iter()
        .any(|field| field.as_deref().is_some_and(|v| !v.is_empty()))
    }

    /// Display name, falling back to the id for unnamed records.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.id,
        }
    }
}

fn merge_field(target: &mut Option<String>, value: Option<String>) {
    if value.is_some() {
        *target = value;
    }
}
