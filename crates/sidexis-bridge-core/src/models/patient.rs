//! Patient payload and working record.

use serde::Deserialize;

use crate::tokens::{Addressing, PracticeContext};

/// Patient data as received from the web client, one JSON object per
/// session.
///
/// Integration variants disagree on some field names (`Code` vs
/// `ExtCardIndex`, `PreferredDoctor` vs `PreferredDentist`), so aliases are
/// accepted, and any missing field becomes an empty string.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct PatientPayload {
    #[serde(rename = "LastName")]
    pub last_name: String,
    #[serde(rename = "FirstName")]
    pub first_name: String,
    #[serde(rename = "DateOfBirth")]
    pub date_of_birth: String,
    #[serde(rename = "Code", alias = "ExtCardIndex")]
    pub code: String,
    #[serde(rename = "Sex")]
    pub sex: String,
    #[serde(rename = "PreferredDoctor", alias = "PreferredDentist")]
    pub preferred_doctor: String,
}

/// The full working record a session builds token messages from.
///
/// One-shot: filled from a single payload, consumed into tokens, then
/// cleared. Never retained across sessions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientRecord {
    // Identity of the existing patient
    pub last_name: String,
    pub first_name: String,
    pub date_of_birth: String,
    pub ext_card_index: String,

    // Create/update data
    pub last_name_new: String,
    pub first_name_new: String,
    pub date_of_birth_new: String,
    pub ext_card_index_new: String,
    pub sex_new: String,
    pub dentist_new: String,

    // Practice context
    pub station_name: String,
    pub date_of_call: String,
    pub time_of_call: String,
    pub sender: String,
    pub receiver: String,

    // Image data
    pub image_number: String,
}

impl PatientRecord {
    /// Fill both the identity and the create/update halves from one
    /// inbound payload, the way a create-update-open session uses it.
    pub fn from_payload(
        payload: &PatientPayload,
        practice: PracticeContext,
        addressing: &Addressing,
    ) -> Self {
        Self {
            last_name: payload.last_name.clone(),
            first_name: payload.first_name.clone(),
            date_of_birth: payload.date_of_birth.clone(),
            ext_card_index: payload.code.clone(),

            last_name_new: payload.last_name.clone(),
            first_name_new: payload.first_name.clone(),
            date_of_birth_new: payload.date_of_birth.clone(),
            ext_card_index_new: payload.code.clone(),
            sex_new: payload.sex.clone(),
            dentist_new: payload.preferred_doctor.clone(),

            station_name: practice.station_name,
            date_of_call: practice.date_of_call,
            time_of_call: practice.time_of_call,
            sender: addressing.sender.clone(),
            receiver: addressing.receiver.clone(),

            image_number: String::new(),
        }
    }

    /// Reset every field to empty.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_tolerates_missing_fields() {
        let payload: PatientPayload = serde_json::from_str(r#"{"LastName":"Kim"}"#).unwrap();
        assert_eq!(payload.last_name, "Kim");
        assert_eq!(payload.first_name, "");
        assert_eq!(payload.code, "");
        assert_eq!(payload.preferred_doctor, "");
    }

    #[test]
    fn payload_accepts_field_name_variants() {
        let payload: PatientPayload = serde_json::from_str(
            r#"{"ExtCardIndex":"P0201","PreferredDentist":"Junmyeon Kim"}"#,
        )
        .unwrap();
        assert_eq!(payload.code, "P0201");
        assert_eq!(payload.preferred_doctor, "Junmyeon Kim");
    }

    #[test]
    fn record_fills_both_halves_from_one_payload() {
        let payload: PatientPayload = serde_json::from_str(
            r#"{"LastName":"Kim","FirstName":"Doyoung","DateOfBirth":"01.02.1996","Code":"P0201","Sex":"M"}"#,
        )
        .unwrap();
        let practice = PracticeContext {
            station_name: "STATION-1".to_string(),
            date_of_call: "02.03.2024".to_string(),
            time_of_call: "10:11:12".to_string(),
        };
        let addressing = Addressing::local("STATION-1", "TidyClinic", "PDATA").unwrap();

        let record = PatientRecord::from_payload(&payload, practice, &addressing);
        assert_eq!(record.last_name, "Kim");
        assert_eq!(record.last_name_new, "Kim");
        assert_eq!(record.ext_card_index_new, "P0201");
        assert_eq!(record.sender, r"\\STATION-1\TidyClinic");
        assert_eq!(record.receiver, r"\\STATION-1\PDATA");
        assert_eq!(record.image_number, "");
    }

    #[test]
    fn clear_resets_every_field() {
        let mut record = PatientRecord {
            last_name: "Kim".to_string(),
            sender: r"\\X\Y".to_string(),
            ..Default::default()
        };
        record.clear();
        assert_eq!(record, PatientRecord::default());
    }
}
