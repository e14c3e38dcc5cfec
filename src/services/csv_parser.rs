use crate::error::AppError;
use crate::models::{LoadedTable, Transaction};
use tracing::{debug, trace};

pub const AMOUNT_COLUMN: &str = "Amount";
pub const CATEGORY_COLUMN: &str = "Category";
pub const DESCRIPTION_COLUMN: &str = "Description";

/// Load an uploaded spending CSV.
///
/// Column names are trimmed and matched case-insensitively. A missing
/// `Amount` column is a validation error; every other problem (bad encoding,
/// malformed records, an unparsable amount, no `Category` column) is a parse
/// error and nothing from the file is returned.
pub fn parse_csv(content: &[u8]) -> Result<LoadedTable, AppError> {
    trace!(content_size = content.len(), "Starting CSV parsing");

    let content = content.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(content);
    let content_str =
        std::str::from_utf8(content).map_err(|e| AppError::CsvParse(e.to_string()))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content_str.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AppError::CsvParse(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(AppError::CsvParse("No columns to parse from file".into()));
    }

    debug!(column_count = headers.len(), "CSV headers parsed");

    let amount_col = find_column(&headers, AMOUNT_COLUMN).ok_or_else(|| {
        AppError::Validation(format!("CSV must contain an '{}' column.", AMOUNT_COLUMN))
    })?;
    let category_col = find_column(&headers, CATEGORY_COLUMN).ok_or_else(|| {
        AppError::CsvParse(format!("CSV must contain a '{}' column.", CATEGORY_COLUMN))
    })?;
    let desc_col = find_column(&headers, DESCRIPTION_COLUMN);

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut transactions = Vec::new();

    for (row_idx, result) in reader.records().enumerate() {
        let row_number = row_idx + 2;

        let record =
            result.map_err(|e| AppError::CsvParse(format!("Row {}: {}", row_number, e)))?;

        let amount_raw = record.get(amount_col).unwrap_or("").trim();
        let amount_cents = if amount_raw.is_empty() {
            None
        } else {
            let cents = clean_amount(amount_raw)
                .and_then(|cleaned| parse_cents(&cleaned))
                .ok_or_else(|| {
                    AppError::CsvParse(format!(
                        "Row {}: Invalid amount '{}'",
                        row_number, amount_raw
                    ))
                })?;
            Some(cents)
        };

        transactions.push(Transaction {
            amount_cents,
            category: get_optional_field(&record, Some(category_col)),
            description: get_optional_field(&record, desc_col),
            row_number,
        });

        rows.push(
            (0..headers.len())
                .map(|i| record.get(i).unwrap_or("").to_string())
                .collect(),
        );
    }

    debug!(row_count = rows.len(), "CSV parsing completed");

    Ok(LoadedTable {
        headers,
        rows,
        transactions,
    })
}

fn find_column(headers: &[String], name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.trim().eq_ignore_ascii_case(name))
}

fn get_optional_field(record: &csv::StringRecord, col: Option<usize>) -> Option<String> {
    col.and_then(|c| record.get(c))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Currency marks tolerated around an amount.
const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£', '¥'];

/// Normalize a spreadsheet-style amount to `[-]digits[.digits][e[-]digits]`.
///
/// Currency symbols and spaces are dropped. When both `.` and `,` appear the
/// last one is the decimal separator. A lone separator followed by groups of
/// exactly three digits is a thousands separator. Anything else that is not
/// part of a plain number makes the amount invalid.
fn clean_amount(amount: &str) -> Option<String> {
    let compact: String = amount
        .chars()
        .filter(|c| !c.is_whitespace() && !CURRENCY_SYMBOLS.contains(c))
        .collect();

    let (sign, unsigned) = match compact.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", compact.strip_prefix('+').unwrap_or(&compact)),
    };

    let (mantissa, exponent) = match unsigned.find(|c: char| c == 'e' || c == 'E') {
        Some(i) => (&unsigned[..i], Some(&unsigned[i + 1..])),
        None => (unsigned, None),
    };

    let mut result = format!("{}{}", sign, normalize_separators(mantissa)?);

    if let Some(exponent) = exponent {
        let exponent = exponent.strip_prefix('+').unwrap_or(exponent);
        let digits = exponent.strip_prefix('-').unwrap_or(exponent);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        result.push('e');
        result.push_str(exponent);
    }

    Some(result)
}

fn normalize_separators(number: &str) -> Option<String> {
    if !number
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.' || c == ',')
    {
        return None;
    }

    let decimal = match (number.rfind('.'), number.rfind(',')) {
        (Some(dot), Some(comma)) => Some(if dot > comma { '.' } else { ',' }),
        (Some(_), None) if number.matches('.').count() == 1 => Some('.'),
        (None, Some(_)) if number.matches(',').count() == 1 && !is_digit_grouped(number, ',') => {
            Some(',')
        }
        _ => None,
    };

    let (whole, fraction) = match decimal {
        Some(separator) => number.rsplit_once(separator)?,
        None => (number, ""),
    };

    let whole: String = if whole.bytes().all(|b| b.is_ascii_digit()) {
        whole.to_string()
    } else if is_digit_grouped(whole, ',') || is_digit_grouped(whole, '.') {
        whole.chars().filter(char::is_ascii_digit).collect()
    } else {
        return None;
    };

    Some(match decimal {
        Some(_) => format!("{}.{}", whole, fraction),
        None => whole,
    })
}

/// `1,234` or `12.345.678`: a 1-3 digit lead followed by 3-digit groups.
fn is_digit_grouped(number: &str, separator: char) -> bool {
    let groups: Vec<&str> = number.split(separator).collect();
    groups.len() > 1
        && (1..=3).contains(&groups[0].len())
        && groups[1..].iter().all(|g| g.len() == 3)
        && groups.iter().all(|g| g.bytes().all(|b| b.is_ascii_digit()))
}

/// Parse a cleaned amount into cents, rounding half away from zero.
fn parse_cents(amount: &str) -> Option<i64> {
    let (negative, unsigned) = match amount.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, amount),
    };
    let (mantissa, exponent) = match unsigned.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().ok()?),
        None => (unsigned, 0),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let whole = whole.trim_start_matches('0');
    let digits: Vec<i64> = whole
        .bytes()
        .chain(fraction.bytes())
        .map(|b| i64::from(b - b'0'))
        .collect();

    // Number of leading digits that make up whole cents.
    let cents_len = i64::try_from(whole.len()).ok()? + i64::from(exponent) + 2;
    if cents_len > 19 {
        return None;
    }

    let mut cents: i64 = 0;
    for i in 0..usize::try_from(cents_len).unwrap_or(0) {
        let digit = digits.get(i).copied().unwrap_or(0);
        cents = cents.checked_mul(10)?.checked_add(digit)?;
    }
    let round_up = usize::try_from(cents_len)
        .ok()
        .and_then(|i| digits.get(i))
        .is_some_and(|&d| d >= 5);
    let cents = cents.checked_add(i64::from(round_up))?;

    Some(if negative { -cents } else { cents })
}
