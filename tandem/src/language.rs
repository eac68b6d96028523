//! Language display names for detected-language codes
//!
//! The detection service reports ISO-639-1 codes, occasionally with a region
//! subtag ("pt-BR"). Matching never looks at the language; these names exist
//! purely for result lists and the viewer title bar.

/// Codes the detection service is known to emit, with display names.
const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("ar", "Arabic"),
    ("bg", "Bulgarian"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("es", "Spanish"),
    ("et", "Estonian"),
    ("fa", "Persian"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("hr", "Croatian"),
    ("hu", "Hungarian"),
    ("id", "Indonesian"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("lt", "Lithuanian"),
    ("lv", "Latvian"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("sr", "Serbian"),
    ("sv", "Swedish"),
    ("th", "Thai"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("vi", "Vietnamese"),
    ("zh", "Chinese"),
];

/// Human-readable name for a detected-language code.
///
/// Region subtags are ignored ("pt-BR" and "pt_PT" both map to Portuguese).
/// Unrecognized codes fall back to the code itself so the UI always has
/// something to show.
pub fn display_name(code: &str) -> &str {
    let primary = code.split(['-', '_']).next().unwrap_or(code);
    for (known, name) in LANGUAGE_NAMES {
        if primary.eq_ignore_ascii_case(known) {
            return name;
        }
    }
    code
}
