//! UNC-style sender/receiver addresses.
//!
//! SLIDA identifies message endpoints as `\\station\app`. The receiver may
//! use `*` as a wildcard for one component ("any station" or "any app");
//! the sender must name both.

use thiserror::Error;

const WILDCARD: &str = "*";

/// Address construction errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AddressError {
    #[error("sender station and app must both be concrete, got station '{station}' app '{app}'")]
    SenderWildcard { station: String, app: String },

    #[error("receiver station and app cannot both be wildcards")]
    ReceiverUndefined,
}

pub type AddressResult<T> = Result<T, AddressError>;

fn unc(station: &str, app: &str) -> String {
    format!(r"\\{station}\{app}")
}

/// Build a sender address. Neither component may be `*`.
pub fn sender_address(station: &str, app: &str) -> AddressResult<String> {
    if station == WILDCARD || app == WILDCARD {
        return Err(AddressError::SenderWildcard {
            station: station.to_string(),
            app: app.to_string(),
        });
    }
    Ok(unc(station, app))
}

/// Build a receiver address. At most one component may be `*`.
pub fn receiver_address(station: &str, app: &str) -> AddressResult<String> {
    if station == WILDCARD && app == WILDCARD {
        return Err(AddressError::ReceiverUndefined);
    }
    Ok(unc(station, app))
}

/// Validated sender/receiver pair stamped on every token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Addressing {
    pub sender: String,
    pub receiver: String,
}

impl Addressing {
    /// Addressing for one station talking to an application on the same
    /// machine, the usual deployment.
    pub fn local(station: &str, sender_app: &str, receiver_app: &str) -> AddressResult<Self> {
        Ok(Self {
            sender: sender_address(station, sender_app)?,
            receiver: receiver_address(station, receiver_app)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sender_rejects_any_wildcard() {
        assert!(matches!(
            sender_address("*", "TidyClinic"),
            Err(AddressError::SenderWildcard { .. })
        ));
        assert!(matches!(
            sender_address("STATION-1", "*"),
            Err(AddressError::SenderWildcard { .. })
        ));
    }

    #[test]
    fn receiver_rejects_only_double_wildcard() {
        assert_eq!(receiver_address("*", "*"), Err(AddressError::ReceiverUndefined));
        assert_eq!(receiver_address("*", "SIDEXIS").unwrap(), r"\\*\SIDEXIS");
        assert_eq!(receiver_address("STATION-1", "*").unwrap(), r"\\STATION-1\*");
    }

    #[test]
    fn concrete_addresses_format_as_unc() {
        assert_eq!(
            sender_address("STATION-1", "TidyClinic").unwrap(),
            r"\\STATION-1\TidyClinic"
        );
    }

    #[test]
    fn local_addressing_builds_both_sides() {
        let addressing = Addressing::local("STATION-1", "TidyClinic", "PDATA").unwrap();
        assert_eq!(addressing.sender, r"\\STATION-1\TidyClinic");
        assert_eq!(addressing.receiver, r"\\STATION-1\PDATA");

        assert!(Addressing::local("*", "TidyClinic", "PDATA").is_err());
    }
}
