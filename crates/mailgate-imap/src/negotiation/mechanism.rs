//! Mechanism resolution and dispatch.

use mailgate_sasl::Mechanism;

use super::auth::Credentials;
use super::{Progress, plain};
use crate::Result;
use crate::connection::Transport;
use crate::response::CapabilityList;

/// Capability tokens mapped to the mechanism they enable.
///
/// Ordered from lowest to highest priority.
pub const PRIORITY: &[(&str, Mechanism)] = &[("AUTH=PLAIN", Mechanism::Plain)];

/// Picks the entry of `table` whose token `capabilities` advertises.
///
/// Every entry is checked and a later match replaces an earlier one, so
/// the last advertised entry wins.
pub fn resolve<T: Copy>(table: &[(&str, T)], capabilities: &CapabilityList) -> Option<T> {
    table.iter().fold(None, |chosen, &(token, value)| {
        if capabilities.is_advertising(token) {
            Some(value)
        } else {
            chosen
        }
    })
}

/// Capability tokens of `table`, for error reporting.
pub(super) fn tokens<T>(table: &[(&str, T)]) -> Vec<String> {
    table.iter().map(|(token, _)| (*token).to_string()).collect()
}

/// Runs the exchange of `mechanism`.
pub(super) async fn run<T: Transport>(
    mechanism: Mechanism,
    credentials: &Credentials,
    transport: &mut T,
    progress: &mut Progress,
) -> Result<()> {
    match mechanism {
        Mechanism::Plain => plain::exchange(credentials, transport, progress).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Capability;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Pick {
        Low,
        High,
    }

    fn caps(tokens: &[&str]) -> CapabilityList {
        CapabilityList::new(tokens.iter().map(|t| Capability::parse(t)).collect())
    }

    #[test]
    fn resolves_plain() {
        let advertised = caps(&["IMAP4rev1", "AUTH=PLAIN"]);
        assert_eq!(resolve(PRIORITY, &advertised), Some(Mechanism::Plain));
    }

    #[test]
    fn nothing_advertised() {
        let advertised = caps(&["IMAP4rev1", "AUTH=LOGIN"]);
        assert_eq!(resolve(PRIORITY, &advertised), None);
    }

    #[test]
    fn last_match_wins() {
        let table = [("AUTH=LOW", Pick::Low), ("AUTH=HIGH", Pick::High)];

        assert_eq!(
            resolve(&table, &caps(&["AUTH=HIGH", "AUTH=LOW"])),
            Some(Pick::High)
        );
        assert_eq!(resolve(&table, &caps(&["AUTH=LOW"])), Some(Pick::Low));
    }

    #[test]
    fn later_entries_override_regardless_of_server_order() {
        let table = [("AUTH=HIGH", Pick::High), ("AUTH=LOW", Pick::Low)];
        assert_eq!(
            resolve(&table, &caps(&["AUTH=HIGH", "AUTH=LOW"])),
            Some(Pick::Low)
        );
    }

    #[test]
    fn tokens_lists_table() {
        assert_eq!(tokens(PRIORITY), vec!["AUTH=PLAIN".to_string()]);
    }
}
