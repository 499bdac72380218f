use deunicode::deunicode_char;

/// Turns a name into its canonical slug.
///
/// Implementations must be deterministic and idempotent: slugging an
/// already-canonical slug returns it unchanged, otherwise the planner's
/// "skip unchanged names" shortcut breaks.
pub trait SlugOracle {
    fn slug(&self, text: &str, case_sensitive: bool) -> String;
}

/// Default slugifier: non-ASCII text is transliterated, then ASCII letters,
/// digits, `-` and `_` survive and everything else collapses into single dashes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Slugger;

impl SlugOracle for Slugger {
    fn slug(&self, text: &str, case_sensitive: bool) -> String {
        let mut out = String::with_capacity(text.len());
        let mut prev_dash = false;

        for ch in text.chars() {
            let expanded: &str = match ch {
                '&' => " and ",
                '@' => " at ",
                _ => "",
            };
            if !expanded.is_empty() {
                for sub in expanded.chars() {
                    push_mapped(&mut out, &mut prev_dash, sub, case_sensitive);
                }
                continue;
            }
            if ch.is_ascii() {
                push_mapped(&mut out, &mut prev_dash, ch, case_sensitive);
                continue;
            }
            // transliterate; characters with no ASCII form act as separators
            let folded = deunicode_char(ch).unwrap_or(" ");
            for sub in folded.chars() {
                push_mapped(&mut out, &mut prev_dash, sub, case_sensitive);
            }
        }

        out.trim_matches(|c| c == '-' || c == '_').to_string()
    }
}

fn push_mapped(out: &mut String, prev_dash: &mut bool, ch: char, case_sensitive: bool) {
    match ch {
        'a'..='z' | '0'..='9' | '_' => {
            out.push(ch);
            *prev_dash = false;
        }
        'A'..='Z' => {
            out.push(if case_sensitive {
                ch
            } else {
                ch.to_ascii_lowercase()
            });
            *prev_dash = false;
        }
        _ => {
            if !*prev_dash {
                out.push('-');
                *prev_dash = true;
            }
        }
    }
}

/// Extensions are lowercased unless the run is case-sensitive; they are
/// otherwise left alone.
pub fn normalize_ext(ext: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        ext.to_string()
    } else {
        ext.to_lowercase()
    }
}
