use errgate_core::families;
use indexmap::IndexMap;

/// Codes every deployment starts with
///
/// Family failures get a stable code and the common constraint names get a
/// readable one. Configured `codes` are layered on top.
pub const BUILTIN_CODES: &[(&str, &str)] = &[
    (families::CONSTRAINT_VIOLATION, "VALIDATION_FAILED"),
    (families::METHOD_ARGUMENT_NOT_VALID, "VALIDATION_FAILED"),
    (families::MESSAGE_NOT_READABLE, "MESSAGE_NOT_READABLE"),
    (families::TYPE_MISMATCH, "TYPE_MISMATCH"),
    (families::OPTIMISTIC_LOCKING_FAILURE, "OPTIMISTIC_LOCKING_ERROR"),
    ("AssertFalse", "REQUIRED_FALSE"),
    ("AssertTrue", "REQUIRED_TRUE"),
    ("DecimalMax", "VALUE_TOO_HIGH"),
    ("DecimalMin", "VALUE_TOO_LOW"),
    ("Digits", "INVALID_DIGITS"),
    ("Email", "INVALID_EMAIL"),
    ("Future", "REQUIRED_IN_FUTURE"),
    ("FutureOrPresent", "REQUIRED_IN_PRESENT_OR_FUTURE"),
    ("Max", "VALUE_TOO_HIGH"),
    ("Min", "VALUE_TOO_LOW"),
    ("Negative", "REQUIRED_NEGATIVE"),
    ("NegativeOrZero", "REQUIRED_NEGATIVE_OR_ZERO"),
    ("NotBlank", "REQUIRED_NOT_BLANK"),
    ("NotEmpty", "REQUIRED_NOT_EMPTY"),
    ("NotNull", "REQUIRED_NOT_NULL"),
    ("Null", "REQUIRED_NULL"),
    ("Past", "REQUIRED_IN_PAST"),
    ("PastOrPresent", "REQUIRED_IN_PAST_OR_PRESENT"),
    ("Pattern", "REGEX_PATTERN_VALIDATION_FAILED"),
    ("Positive", "REQUIRED_POSITIVE"),
    ("PositiveOrZero", "REQUIRED_POSITIVE_OR_ZERO"),
    ("Size", "INVALID_SIZE"),
];

/// Built-in codes overlaid with the configured ones
pub fn merged_codes(configured: &IndexMap<String, String>) -> IndexMap<String, String> {
    let mut codes: IndexMap<String, String> = BUILTIN_CODES
        .iter()
        .map(|(key, code)| ((*key).to_owned(), (*code).to_owned()))
        .collect();

    codes.extend(configured.iter().map(|(key, code)| (key.clone(), code.clone())));
    codes
}
