//! Structural tokens of the configuration grammar and output layout constants.

/// Separates a property name from its value: `name = value`.
pub const VALUE_SEPARATOR: char = '=';

/// Starts a line comment running to the end of the line.
pub const COMMENT_MARKER: char = '#';

/// Opens a nested block or inline list.
pub const NESTING_START: char = '{';

/// Closes a nested block or inline list.
pub const NESTING_END: char = '}';

/// Delimits a token that may contain spaces. The quotes stay part of the token.
pub const STRING_MARKER: char = '"';

/// Ends a bare token.
pub const TOKEN_SEPARATOR: char = ' ';

/// Names a node must not take (compared after trimming).
pub const RESTRICTED_NAMES: [&str; 5] = ["=", "{", "}", "#", "\""];

/// Line terminator used when printing.
pub const NEW_LINE: &str = "\r\n";

/// Prefix written once per nesting level when printing.
pub const INDENTATION: &str = "\t";

/// Literal accepted as `true` for boolean attributes.
pub const YES: &str = "yes";

/// Returns true when `name`, trimmed, is one of the structural tokens.
pub fn is_restricted(name: &str) -> bool {
    RESTRICTED_NAMES.contains(&name.trim())
}

/// Returns true when `token` is exactly the closing brace.
pub fn is_nesting_end(token: &str) -> bool {
    token.len() == NESTING_END.len_utf8() && token.starts_with(NESTING_END)
}
