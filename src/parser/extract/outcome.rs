use crate::db::{Decision, Winner};

const REVERSAL_MARKERS: &[&str] = &["ተሽሮ", "ተሻሽሎ", "ተሽሮ የተመለሰ", "ተሰረዘ"];
const UPHELD_MARKERS: &[&str] = &["ጸንቷል", "አልተቀበለውም", "ተቃውሞ"];
const GUILTY_MARKER: &str = "ጥፋተኛ";

const PLAINTIFF: &str = "ከሳሽ";
const APPELLANT: &str = "አመልካች";
const RESPONDENT: &str = "ተጠሪ";
const DEFENDANT: &str = "ተከሳሽ";

/// Classify the outcome from title and summary together.
///
/// Marker sets are checked in priority order; the first set with a hit decides.
/// Note that "ከሳሽ" is a substring of "ተከሳሽ", so any defendant mention in a
/// reversed case reads as a plaintiff win.
pub fn classify(title: &str, summary: &str) -> (Decision, Winner) {
    let text = format!("{} {}", title, summary);
    let has = |kw: &str| text.contains(kw);

    if REVERSAL_MARKERS.iter().any(|&kw| has(kw)) {
        let winner = if has(PLAINTIFF) {
            Winner::Plaintiff
        } else if has(APPELLANT) {
            Winner::Appellant
        } else {
            Winner::AppellantOrPlaintiff
        };
        (Decision::ReversedModified, winner)
    } else if UPHELD_MARKERS.iter().any(|&kw| has(kw)) {
        let winner = if has(RESPONDENT) {
            Winner::Respondent
        } else if has(DEFENDANT) {
            Winner::Defendant
        } else {
            Winner::RespondentOrDefendant
        };
        (Decision::Upheld, winner)
    } else if has(GUILTY_MARKER) {
        (Decision::Guilty, Winner::Prosecution)
    } else {
        (Decision::JudgmentAvailable, Winner::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_plaintiff() {
        let (d, w) = classify("", "የስር ፍርድ ቤት ውሳኔ ተሽሮ ከሳሽ አሸንፏል");
        assert!(d.as_str().starts_with("Reversed/Modified"));
        assert!(w.as_str().contains("Plaintiff"));
    }

    #[test]
    fn reversed_appellant_and_generic() {
        assert_eq!(
            classify("አመልካች", "ውሳኔው ተሻሽሎ"),
            (Decision::ReversedModified, Winner::Appellant)
        );
        assert_eq!(
            classify("", "ተሰረዘ"),
            (Decision::ReversedModified, Winner::AppellantOrPlaintiff)
        );
    }

    #[test]
    fn upheld_respondent() {
        let (d, w) = classify("", "ውሳኔው ጸንቷል ተጠሪ");
        assert!(d.as_str().starts_with("Upheld"));
        assert!(w.as_str().contains("Respondent"));
    }

    #[test]
    fn upheld_defendant_and_generic() {
        assert_eq!(classify("ተከሳሽ", "አልተቀበለውም"), (Decision::Upheld, Winner::Defendant));
        assert_eq!(classify("", "ተቃውሞ"), (Decision::Upheld, Winner::RespondentOrDefendant));
    }

    #[test]
    fn reversal_outranks_upheld_and_guilty() {
        assert_eq!(
            classify("ጥፋተኛ", "ጸንቷል ተሽሮ"),
            (Decision::ReversedModified, Winner::AppellantOrPlaintiff)
        );
        assert_eq!(classify("ጥፋተኛ", "ጸንቷል"), (Decision::Upheld, Winner::RespondentOrDefendant));
    }

    #[test]
    fn guilty() {
        assert_eq!(classify("", "ተከሳሹ ጥፋተኛ ተብሏል"), (Decision::Guilty, Winner::Prosecution));
    }

    #[test]
    fn defendant_mention_counts_as_plaintiff_on_reversal() {
        assert_eq!(classify("", "ተሽሮ ተከሳሽ"), (Decision::ReversedModified, Winner::Plaintiff));
    }

    #[test]
    fn no_markers() {
        assert_eq!(
            classify("Some English title", ""),
            (Decision::JudgmentAvailable, Winner::Unknown)
        );
    }
}
