use std::sync::LazyLock;

use regex::Regex;

use crate::db::NOT_AVAILABLE;

/// Case-number markers: የሰ/ቁ, የመ/ቁ, መ.ቁ, ቁጥር. Party names end where these begin.
static CASE_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"የ[ሰመ]/ቁ|መ\.ቁ|ቁጥር").unwrap());
/// "and" / "et al." between party names.
static CONJUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+(?:እና|እነ)\s+").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parties {
    pub plaintiff: String,
    pub defendant: String,
}

pub fn extract(title: &str) -> Parties {
    let prefix = CASE_MARKER_RE.split(title).next().unwrap_or_default().trim();

    let parts: Vec<&str> = CONJUNCTION_RE.split(prefix).collect();
    if parts.len() >= 2 {
        Parties {
            plaintiff: parts[0].trim().to_string(),
            defendant: parts[1].trim().to_string(),
        }
    } else {
        Parties {
            plaintiff: prefix.to_string(),
            defendant: NOT_AVAILABLE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_and() {
        let p = extract("አቶ አበበ ከበደ እና ወ/ሮ አልማዝ ታደሰ");
        assert_eq!(p.plaintiff, "አቶ አበበ ከበደ");
        assert_eq!(p.defendant, "ወ/ሮ አልማዝ ታደሰ");
    }

    #[test]
    fn splits_on_et_al() {
        let p = extract("ኢትዮጵያ ንግድ ባንክ  እነ   አቶ በላይ");
        assert_eq!(p.plaintiff, "ኢትዮጵያ ንግድ ባንክ");
        assert_eq!(p.defendant, "አቶ በላይ");
    }

    #[test]
    fn stops_at_case_marker() {
        let p = extract("አበበ እና ከበደ የሰ/ቁ 123456 እና ሌሎች");
        assert_eq!(p.plaintiff, "አበበ");
        assert_eq!(p.defendant, "ከበደ");

        let p = extract("ሰላም መ.ቁ 55/66/77");
        assert_eq!(p.plaintiff, "ሰላም");
        assert_eq!(p.defendant, NOT_AVAILABLE);
    }

    #[test]
    fn conjunction_needs_surrounding_space() {
        // "እናት" (mother) must not split
        let p = extract("የእናት ባንክ");
        assert_eq!(p.plaintiff, "የእናት ባንክ");
        assert_eq!(p.defendant, NOT_AVAILABLE);
    }

    #[test]
    fn empty_title() {
        let p = extract("");
        assert_eq!(p.plaintiff, "");
        assert_eq!(p.defendant, NOT_AVAILABLE);
    }
}
