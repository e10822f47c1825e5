use crate::events::Sender;

/// Whether the delivery was triggered by a bot account.
///
/// No sender means "not a bot". A sender is a bot when its type is `Bot`
/// or its login ends with `[bot]`.
pub fn is_from_bot(sender: Option<&Sender>) -> bool {
    let Some(sender) = sender else {
        return false;
    };

    sender.kind.as_deref() == Some("Bot")
        || sender
            .login
            .as_deref()
            .is_some_and(|login| login.ends_with("[bot]"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sender(login: Option<&str>, kind: Option<&str>) -> Sender {
        Sender {
            login: login.map(str::to_string),
            kind: kind.map(str::to_string),
        }
    }

    #[rstest]
    #[case::app_bot(Some("dependabot[bot]"), Some("Bot"), true)]
    #[case::bot_type_only(Some("renovate"), Some("Bot"), true)]
    #[case::bot_suffix_only(Some("ci[bot]"), Some("User"), true)]
    #[case::human(Some("alice"), Some("User"), false)]
    #[case::bot_in_middle(Some("robot[bot]x"), Some("User"), false)]
    #[case::lowercase_type(Some("alice"), Some("bot"), false)]
    #[case::organization(Some("octo-org"), Some("Organization"), false)]
    #[case::empty_sender(None, None, false)]
    fn classifies_senders(
        #[case] login: Option<&str>,
        #[case] kind: Option<&str>,
        #[case] expected: bool,
    ) {
        assert_eq!(is_from_bot(Some(&sender(login, kind))), expected);
    }

    #[test]
    fn missing_sender_is_not_a_bot() {
        assert!(!is_from_bot(None));
    }
}
