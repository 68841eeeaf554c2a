use once_cell::sync::Lazy;
use regex::Regex;

/// Progress summary at the end of an rsync `--progress` line:
/// `(xfr#9, to-chk=999/9999)`. Group 1 is `REMAIN/TOTAL`.
pub static PROGRESS: Lazy<Matcher> =
    Lazy::new(|| Matcher::new(r"\(.+-chk=(\d+.\d+)").expect("Invalid progress pattern"));

/// Throughput such as `999.99kB/s`.
pub static SPEED: Lazy<Matcher> =
    Lazy::new(|| Matcher::new(r"(\d+\.\d+.{2}/s)").expect("Invalid speed pattern"));

/// A compiled pattern tested against single output lines.
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
}

impl Matcher {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Matcher {
            regex: Regex::new(pattern)?,
        })
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    /// Capture groups (without the whole match) of the first match.
    /// Empty when the line does not match; groups that did not participate are "".
    pub fn extract<'a>(&self, line: &'a str) -> Vec<&'a str> {
        self.regex
            .captures(line)
            .map(|caps| {
                caps.iter()
                    .skip(1)
                    .map(|group| group.map_or("", |m| m.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Up to `limit` successive matches. Each entry holds the whole match at
    /// index 0 followed by the capture groups.
    pub fn extract_all<'a>(&self, line: &'a str, limit: usize) -> Vec<Vec<&'a str>> {
        self.regex
            .captures_iter(line)
            .take(limit)
            .map(|caps| {
                caps.iter()
                    .map(|group| group.map_or("", |m| m.as_str()))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROGRESS_LINE: &str = "        999,999 99%  999.99kB/s    0:00:59 (xfr#9, to-chk=999/9999)";

    #[test]
    fn progress_pattern_captures_counts() {
        assert!(PROGRESS.is_match(PROGRESS_LINE));
        assert_eq!(PROGRESS.extract(PROGRESS_LINE), vec!["999/9999"]);
    }

    #[test]
    fn progress_pattern_accepts_ir_chk() {
        let line = "  1.05M 100%  1.00MB/s 0:00:01 (xfr#3, ir-chk=1010/1020)";
        assert_eq!(PROGRESS.extract(line), vec!["1010/1020"]);
    }

    #[test]
    fn file_list_lines_do_not_match() {
        for line in ["sending incremental file list", "docs/readme.md", ""] {
            assert!(!PROGRESS.is_match(line));
            assert!(!SPEED.is_match(line));
            assert!(PROGRESS.extract(line).is_empty());
            assert!(SPEED.extract_all(line, 2).is_empty());
        }
    }

    #[test]
    fn speed_pattern_keeps_unit() {
        assert!(SPEED.is_match(PROGRESS_LINE));
        assert_eq!(SPEED.extract(PROGRESS_LINE), vec!["999.99kB/s"]);
    }

    #[test]
    fn extract_all_respects_limit() {
        let line = "1.00kB/s\r2.00MB/s\r3.00GB/s";
        let all = SPEED.extract_all(line, 2);

        assert_eq!(all.len(), 2);
        assert_eq!(all[0], vec!["1.00kB/s", "1.00kB/s"]);
        assert_eq!(all[1], vec!["2.00MB/s", "2.00MB/s"]);
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        assert!(Matcher::new(r"(\d+").is_err());
    }
}
