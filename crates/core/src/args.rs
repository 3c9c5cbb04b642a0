//! Passthrough argument tokenization

use crate::types::{TidyError, TidyResult};

/// Split a user-supplied argument string into tokens using POSIX shell rules.
pub fn split_extra_args(raw: &str) -> TidyResult<Vec<String>> {
    shlex::split(raw).ok_or_else(|| TidyError::ArgumentSyntax(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_yields_no_tokens() {
        assert!(split_extra_args("").unwrap().is_empty());
        assert!(split_extra_args("   ").unwrap().is_empty());
    }

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(
            split_extra_args("--flag1 --flag2=val").unwrap(),
            vec!["--flag1", "--flag2=val"]
        );
    }

    #[test]
    fn quotes_group_words() {
        assert_eq!(
            split_extra_args(r#"--disable "C0114, C0115" --msg-template='{path}: {msg}'"#).unwrap(),
            vec!["--disable", "C0114, C0115", "--msg-template={path}: {msg}"]
        );
    }

    #[test]
    fn unterminated_quote_is_a_syntax_error() {
        let err = split_extra_args("--config-file 'setup.cfg").unwrap_err();
        assert!(matches!(err, TidyError::ArgumentSyntax(ref raw) if raw == "--config-file 'setup.cfg"));
    }
}
