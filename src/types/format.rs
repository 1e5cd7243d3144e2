use chrono::{Datelike, NaiveDate, Weekday};

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

pub const WEEKDAY_HEADERS: [&str; 7] = ["Lun", "Mar", "Mié", "Jue", "Vie", "Sáb", "Dom"];

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "lunes",
        Weekday::Tue => "martes",
        Weekday::Wed => "miércoles",
        Weekday::Thu => "jueves",
        Weekday::Fri => "viernes",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}

pub fn month_name(month: u32) -> &'static str {
    MONTHS[(month.clamp(1, 12) - 1) as usize]
}

pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `Marzo de 2024`
pub fn month_title(year: i32, month: u32) -> String {
    capitalize(&format!("{} de {}", month_name(month), year))
}

/// `Viernes, 15 de marzo de 2024`
pub fn readable_date(date: NaiveDate) -> String {
    capitalize(&format!(
        "{}, {} de {} de {}",
        weekday_name(date.weekday()),
        date.day(),
        month_name(date.month()),
        date.year()
    ))
}

/// Chilean grouping: `.` as thousands separator, rounded to an integer.
pub fn format_number(number: f64) -> String {
    if !number.is_finite() {
        return "0".to_owned();
    }
    let rounded = number.round();
    let digits = format!("{:.0}", rounded.abs());
    let grouped = digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect::<Vec<_>>()
        .join(".");
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub fn format_price(number: f64) -> String {
    format!("${}", format_number(number))
}

/// Keeps only the ASCII digits of a rendered amount: `$1.250.000` is `1250000`.
pub fn parse_digits(text: &str) -> f64 {
    text.chars()
        .filter(char::is_ascii_digit)
        .collect::<String>()
        .parse::<f64>()
        .unwrap_or(0.0)
}
