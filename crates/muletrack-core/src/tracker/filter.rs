//! Account filter
//!
//! Pure predicate deciding whether updates should be processed for the
//! currently observed identity. Game clients render names with U+00A0 in
//! place of spaces, so both sides are normalized before comparison.

use crate::config::AccountConfig;

/// Decide whether the tracker is active for the given identity
///
/// Returns false when the tracker is disabled or no identity is observable
/// (not logged in). An empty allow-list means "run on any account".
pub fn is_active(config: &AccountConfig, identity: Option<&str>) -> bool {
    if !config.enabled_for_this_account {
        return false;
    }

    let allow_list = config.mule_rsns.trim();
    if allow_list.is_empty() {
        return true;
    }

    let Some(identity) = identity else {
        return false;
    };

    let identity = normalize(identity);

    allow_list
        .split(',')
        .map(normalize)
        .filter(|n| !n.is_empty())
        .any(|n| n == identity)
}

fn normalize(name: &str) -> String {
    name.replace('\u{00A0}', " ").trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(enabled: bool, rsns: &str) -> AccountConfig {
        AccountConfig {
            enabled_for_this_account: enabled,
            mule_rsns: rsns.to_string(),
        }
    }

    #[test]
    fn disabled_is_never_active() {
        assert!(!is_active(&config(false, ""), Some("Mule1")));
    }

    #[test]
    fn empty_allow_list_runs_on_any_account() {
        assert!(is_active(&config(true, ""), Some("Anyone")));
        assert!(is_active(&config(true, "  "), Some("Anyone")));
    }

    #[test]
    fn missing_identity_is_inactive_when_restricted() {
        assert!(!is_active(&config(true, "Mule1"), None));
    }

    #[rstest::rstest]
    #[case("mule1", true)]
    #[case("MULE1", true)]
    #[case("SECOND MULE", true)]
    #[case(" Second Mule ", true)]
    #[case("Second\u{00A0}Mule", true)]
    #[case("Mule2", false)]
    fn membership_is_normalized(#[case] identity: &str, #[case] expected: bool) {
        let cfg = config(true, " Mule1 , Second Mule ");
        assert_eq!(is_active(&cfg, Some(identity)), expected);
    }

    #[test]
    fn empty_entries_after_splitting_are_ignored() {
        let cfg = config(true, "Mule1,,  ,");
        assert!(is_active(&cfg, Some("Mule1")));
        assert!(!is_active(&cfg, Some("")));
    }
}
