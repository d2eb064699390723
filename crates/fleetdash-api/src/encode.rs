//! Machine name encoding for query strings

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except `A-Za-z0-9 - _ . ! ~ * ' ( )` is escaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a machine name, writing spaces as `+`.
pub fn encode_machine_name(name: &str) -> String {
    utf8_percent_encode(name, COMPONENT)
        .to_string()
        .replace("%20", "+")
}
