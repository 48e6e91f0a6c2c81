//! Token planning and emission for one patient session.

use crate::models::PatientRecord;
use crate::slida::{Mailslot, SlidaError, SlidaResult};

use super::{Addressing, PatientDetails, PatientIdent, PracticeContext, Token};

/// Why a planned token was not written to the mailslot.
#[derive(Debug)]
pub enum SkipReason {
    /// Date of birth and name changed at once; the update cannot tell a
    /// DOB correction from a different patient.
    AmbiguousUpdate,
    /// The mailslot append failed. The message is dropped, never retried.
    WriteFailed(SlidaError),
}

/// A token that was planned but not delivered.
#[derive(Debug)]
pub struct Skipped {
    pub letter: char,
    pub reason: SkipReason,
}

/// Outcome of one emission pass, for the caller to log.
#[derive(Debug, Default)]
pub struct EmitReport {
    pub emitted: Vec<char>,
    pub skipped: Vec<Skipped>,
}

/// Plans and writes the token sequence for one inbound patient.
pub struct TokenBuilder<'a> {
    mailslot: &'a Mailslot,
}

impl<'a> TokenBuilder<'a> {
    pub fn new(mailslot: &'a Mailslot) -> Self {
        Self { mailslot }
    }

    /// Token sequence for one inbound patient: create, update, then
    /// auto-open, the order the imaging handoff expects.
    ///
    /// The update token is skipped (not an error) when the guard trips;
    /// the guard compares raw record fields, before normalization.
    pub fn plan(record: &PatientRecord) -> (Vec<Token>, Vec<Skipped>) {
        let addressing = Addressing {
            sender: record.sender.clone(),
            receiver: record.receiver.clone(),
        };

        let mut tokens = vec![Token::NewPatient {
            details: new_details(record),
            addressing: addressing.clone(),
        }];
        let mut skipped = Vec::new();

        if update_is_ambiguous(record) {
            skipped.push(Skipped {
                letter: 'U',
                reason: SkipReason::AmbiguousUpdate,
            });
        } else {
            tokens.push(Token::Update {
                patient: ident(record),
                details: new_details(record),
                addressing: addressing.clone(),
            });
        }

        tokens.push(Token::AutoSelect {
            patient: ident(record),
            practice: practice(record),
            addressing,
            image_number: record.image_number.clone(),
        });

        (tokens, skipped)
    }

    /// Encode and append one token.
    pub fn emit_token(&self, token: &Token) -> SlidaResult<()> {
        self.mailslot.append(&token.encode())
    }

    /// Plan and deliver the whole sequence. A write failure drops that
    /// message only; the rest still go out. Once anything was delivered the
    /// record is cleared - it is consumed exactly once.
    pub fn emit(&self, record: &mut PatientRecord) -> EmitReport {
        let (tokens, skipped) = Self::plan(record);
        let mut report = EmitReport {
            skipped,
            ..Default::default()
        };

        for token in tokens {
            match self.emit_token(&token) {
                Ok(()) => report.emitted.push(token.letter()),
                Err(err) => report.skipped.push(Skipped {
                    letter: token.letter(),
                    reason: SkipReason::WriteFailed(err),
                }),
            }
        }

        if !report.emitted.is_empty() {
            record.clear();
        }
        report
    }
}

/// Simultaneous DOB and name change: could be a birth-date correction or a
/// different patient, so the update must not guess.
fn update_is_ambiguous(record: &PatientRecord) -> bool {
    record.date_of_birth_new != record.date_of_birth
        && (record.last_name_new != record.last_name
            || record.first_name_new != record.first_name)
}

fn ident(record: &PatientRecord) -> PatientIdent {
    PatientIdent {
        last_name: record.last_name.clone(),
        first_name: record.first_name.clone(),
        date_of_birth: record.date_of_birth.clone(),
        ext_card_index: record.ext_card_index.clone(),
    }
}

fn new_details(record: &PatientRecord) -> PatientDetails {
    PatientDetails {
        last_name: record.last_name_new.clone(),
        first_name: record.first_name_new.clone(),
        date_of_birth: record.date_of_birth_new.clone(),
        ext_card_index: record.ext_card_index_new.clone(),
        sex: record.sex_new.clone(),
        dentist: record.dentist_new.clone(),
    }
}

fn practice(record: &PatientRecord) -> PracticeContext {
    PracticeContext {
        station_name: record.station_name.clone(),
        date_of_call: record.date_of_call.clone(),
        time_of_call: record.time_of_call.clone(),
    }
}
