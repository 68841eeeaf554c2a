const REMAIN_TOTAL_SEPARATOR: char = '/';

/// Splits `REMAIN/TOTAL`. Malformed input degrades to zeros instead of failing,
/// so an unexpected line never stops progress tracking.
pub fn parse_remain_total(remain_total: &str) -> (u64, u64) {
    let parts: Vec<&str> = remain_total.split(REMAIN_TOTAL_SEPARATOR).collect();
    if parts.len() < 2 {
        return (0, 0);
    }

    let remain = parts[0].parse().unwrap_or(0);
    let total = parts[1].parse().unwrap_or(0);
    (remain, total)
}

/// Picks the capture of the second speed match on a line.
///
/// rsync redraws its progress with `\r`, so one newline-terminated line holds
/// every intermediate update. A line with a single match yields "".
pub fn parse_speed(groups: &[Vec<&str>]) -> String {
    groups
        .get(1)
        .and_then(|group| group.get(1))
        .map(|speed| speed.to_string())
        .unwrap_or_default()
}
