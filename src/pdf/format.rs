use chrono::{Datelike, NaiveDate};

/// Single-character weekday labels, Sunday first
pub const WEEKDAY_GLYPHS: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

pub fn format_grouped_int(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    let mut grouped: String = out.chars().rev().collect();
    if negative {
        grouped.insert(0, '-');
    }
    grouped
}

/// Whole-unit amount with thousands separators, e.g. `¥12,500`
pub fn format_money(value: f64, currency_symbol: &str) -> String {
    format!("{}{}", currency_symbol, format_grouped_int(value.round() as i64))
}

pub fn weekday_glyph(date: NaiveDate) -> &'static str {
    WEEKDAY_GLYPHS[date.weekday().num_days_from_sunday() as usize]
}

/// Day of month with its weekday, e.g. `10(金)`
pub fn day_with_weekday(date: NaiveDate) -> String {
    format!("{}({})", date.day(), weekday_glyph(date))
}

/// Receipt numbers are 1-based and zero-padded to three digits
pub fn receipt_number(seq: usize) -> String {
    format!("{:03}", seq)
}

pub fn receipt_date(date: NaiveDate) -> String {
    date.format("%Y年%m月%d日").to_string()
}

/// Month heading for the statement, e.g. `2024年05月分`
pub fn month_heading(selected_month: &str) -> String {
    match selected_month.split_once('-') {
        Some((year, month)) if !year.is_empty() && !month.is_empty() => {
            format!("{}年{}月分", year, month)
        }
        _ => selected_month.to_string(),
    }
}

pub fn item_line(item_format: &str, menu: &str) -> String {
    item_format.replace("{menu}", menu)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(format_grouped_int(0), "0");
        assert_eq!(format_grouped_int(999), "999");
        assert_eq!(format_grouped_int(1000), "1,000");
        assert_eq!(format_grouped_int(1234567), "1,234,567");
        assert_eq!(format_grouped_int(-45000), "-45,000");
    }

    #[test]
    fn money_rounds_to_whole_units() {
        assert_eq!(format_money(1500.0, "¥"), "¥1,500");
        assert_eq!(format_money(1234.6, "¥"), "¥1,235");
        assert_eq!(format_money(0.0, "$"), "$0");
    }

    #[test]
    fn weekday_letters() {
        // 2024-05-05 was a Sunday
        assert_eq!(weekday_glyph(date(2024, 5, 5)), "日");
        assert_eq!(weekday_glyph(date(2024, 5, 10)), "金");
        assert_eq!(weekday_glyph(date(2024, 5, 11)), "土");
        assert_eq!(day_with_weekday(date(2024, 5, 2)), "2(木)");
    }

    #[test]
    fn receipt_fields() {
        assert_eq!(receipt_number(1), "001");
        assert_eq!(receipt_number(42), "042");
        assert_eq!(receipt_number(1234), "1234");
        assert_eq!(receipt_date(date(2024, 5, 2)), "2024年05月02日");
        assert_eq!(item_line("但し {menu}代として", "カット"), "但し カット代として");
    }

    #[test]
    fn month_heading_falls_back_to_raw_value() {
        assert_eq!(month_heading("2024-05"), "2024年05月分");
        assert_eq!(month_heading("someday"), "someday");
    }
}
