use chrono::NaiveDate;

/// `Dec 31, 2025`, or `No date`
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%b %-d, %Y").to_string(),
        None => "No date".to_string(),
    }
}

/// Whole dollars with thousands separators: `$150,000`
pub fn format_currency(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `76d remaining`, `3d overdue`, or empty without a deadline
pub fn format_days_left(days: Option<i64>) -> String {
    match days {
        Some(d) if d < 0 => format!("{}d overdue", -d),
        Some(d) => format!("{}d remaining", d),
        None => String::new(),
    }
}

/// First names of the first two members, then `+N more`
pub fn team_summary(team: &[String]) -> String {
    let mut parts: Vec<String> = team
        .iter()
        .take(2)
        .map(|m| m.split_whitespace().next().unwrap_or(m).to_string())
        .collect();
    if team.len() > 2 {
        parts.push(format!("+{} more", team.len() - 2));
    }
    parts.join("  ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates() {
        assert_eq!(format_date(NaiveDate::from_ymd_opt(2025, 12, 31)), "Dec 31, 2025");
        assert_eq!(format_date(NaiveDate::from_ymd_opt(2026, 3, 5)), "Mar 5, 2026");
        assert_eq!(format_date(None), "No date");
    }

    #[test]
    fn currency() {
        assert_eq!(format_currency(0), "$0");
        assert_eq!(format_currency(999), "$999");
        assert_eq!(format_currency(1000), "$1,000");
        assert_eq!(format_currency(45_000), "$45,000");
        assert_eq!(format_currency(1_234_567), "$1,234,567");
    }

    #[test]
    fn days_left() {
        assert_eq!(format_days_left(Some(76)), "76d remaining");
        assert_eq!(format_days_left(Some(0)), "0d remaining");
        assert_eq!(format_days_left(Some(-3)), "3d overdue");
        assert_eq!(format_days_left(None), "");
    }

    #[test]
    fn team() {
        let team: Vec<String> = ["John David Chen", "Sarah Wilson", "Mike Johnson", "Rebecca Martinez"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(team_summary(&team), "John  Sarah  +2 more");
        assert_eq!(team_summary(&team[..1]), "John");
        assert_eq!(team_summary(&[]), "");
    }
}
