//! SLIDA token construction.
//!
//! Each token variant carries exactly the fields its wire layout needs, so
//! the compiler enforces the field set per token letter. Field order within
//! a variant is part of the contract with Sidexis and must not change.

mod address;
mod builder;
pub mod normalize;

pub use address::*;
pub use builder::*;

use chrono::Local;

use crate::slida;

use normalize::IndexFallback;

/// Identity fields of an existing patient.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientIdent {
    pub last_name: String,
    pub first_name: String,
    pub date_of_birth: String,
    pub ext_card_index: String,
}

/// Fields describing a created or updated patient.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientDetails {
    pub last_name: String,
    pub first_name: String,
    pub date_of_birth: String,
    pub ext_card_index: String,
    pub sex: String,
    pub dentist: String,
}

/// Station and call-time context for select/open tokens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PracticeContext {
    pub station_name: String,
    pub date_of_call: String,
    pub time_of_call: String,
}

impl PracticeContext {
    /// Context for a call happening now, in the formats Sidexis expects.
    pub fn now(station_name: impl Into<String>) -> Self {
        let now = Local::now();
        Self {
            station_name: station_name.into(),
            date_of_call: now.format("%d.%m.%Y").to_string(),
            time_of_call: now.format("%H:%M:%S").to_string(),
        }
    }
}

impl<'a> IndexFallback<'a> {
    fn from_ident(patient: &'a PatientIdent) -> Self {
        Self {
            last_name: &patient.last_name,
            first_name: &patient.first_name,
            date_of_birth: &patient.date_of_birth,
        }
    }

    fn from_details(details: &'a PatientDetails) -> Self {
        Self {
            last_name: &details.last_name,
            first_name: &details.first_name,
            date_of_birth: &details.date_of_birth,
        }
    }
}

/// One SLIDA token message, ready to normalize and encode.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `A` - select the patient and open them in Sidexis.
    AutoSelect {
        patient: PatientIdent,
        practice: PracticeContext,
        addressing: Addressing,
        image_number: String,
    },
    /// `N` - create a new patient.
    NewPatient {
        details: PatientDetails,
        addressing: Addressing,
    },
    /// `S` - select the patient without opening.
    Select {
        patient: PatientIdent,
        practice: PracticeContext,
        addressing: Addressing,
    },
    /// `U` - update an existing patient's data.
    Update {
        patient: PatientIdent,
        details: PatientDetails,
        addressing: Addressing,
    },
}

impl Token {
    /// Wire letter for this token.
    pub fn letter(&self) -> char {
        match self {
            Token::AutoSelect { .. } => 'A',
            Token::NewPatient { .. } => 'N',
            Token::Select { .. } => 'S',
            Token::Update { .. } => 'U',
        }
    }

    /// Normalized field values in wire order.
    ///
    /// Sender and receiver addresses are carried verbatim; every other
    /// field goes through its [`normalize`] rule here.
    pub fn fields(&self) -> Vec<String> {
        match self {
            Token::AutoSelect {
                patient,
                practice,
                addressing,
                image_number,
            } => {
                let mut fields = select_fields(patient, practice, addressing);
                fields.push(normalize::image_number(image_number));
                fields
            }

            Token::Select {
                patient,
                practice,
                addressing,
            } => select_fields(patient, practice, addressing),

            Token::NewPatient {
                details,
                addressing,
            } => {
                let fallback = IndexFallback::from_details(details);
                vec![
                    normalize::name(&details.last_name),
                    normalize::name(&details.first_name),
                    normalize::date(&details.date_of_birth),
                    normalize::index(&details.ext_card_index, fallback),
                    normalize::sex(&details.sex),
                    normalize::dentist(&details.dentist),
                    addressing.sender.clone(),
                    addressing.receiver.clone(),
                ]
            }

            Token::Update {
                patient,
                details,
                addressing,
            } => {
                // With no identity half the generated card index falls back
                // to the new data, same as the create path.
                let fallback = if patient.last_name.is_empty() {
                    IndexFallback::from_details(details)
                } else {
                    IndexFallback::from_ident(patient)
                };
                vec![
                    normalize::name(&patient.last_name),
                    normalize::name(&patient.first_name),
                    normalize::date(&patient.date_of_birth),
                    normalize::index(&patient.ext_card_index, fallback),
                    normalize::name(&details.last_name),
                    normalize::name(&details.first_name),
                    normalize::date(&details.date_of_birth),
                    normalize::index(&details.ext_card_index, fallback),
                    normalize::sex(&details.sex),
                    normalize::dentist(&details.dentist),
                    addressing.sender.clone(),
                    addressing.receiver.clone(),
                ]
            }
        }
    }

    /// Encode this token as a mailslot message.
    pub fn encode(&self) -> Vec<u8> {
        slida::encode_message(self.letter(), &self.fields())
    }
}

/// Shared field prefix of the `A` and `S` tokens.
fn select_fields(
    patient: &PatientIdent,
    practice: &PracticeContext,
    addressing: &Addressing,
) -> Vec<String> {
    let fallback = IndexFallback::from_ident(patient);
    vec![
        normalize::name(&patient.last_name),
        normalize::name(&patient.first_name),
        normalize::date(&patient.date_of_birth),
        normalize::index(&patient.ext_card_index, fallback),
        normalize::station(&practice.station_name),
        normalize::date(&practice.date_of_call),
        normalize::time(&practice.time_of_call),
        addressing.sender.clone(),
        addressing.receiver.clone(),
    ]
}
