use rust_decimal::Decimal;

/// Parse a display-formatted whole amount such as `"$400,000"`.
///
/// Every non-digit character is dropped before parsing, matching how the
/// web forms normalise their currency fields. Cents are therefore not
/// supported: `"1,234.56"` reads as `123456`.
pub fn parse_amount(raw: &str) -> Result<Decimal, String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(format!("'{raw}' contains no digits"));
    }
    let value: u64 = digits
        .parse()
        .map_err(|_| format!("'{raw}' is too large to be an amount"))?;
    Ok(Decimal::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_grouped_amount() {
        assert_eq!(parse_amount("400,000").unwrap(), dec!(400_000));
    }

    #[test]
    fn test_currency_symbol_and_spaces() {
        assert_eq!(parse_amount(" $5,000 ").unwrap(), dec!(5_000));
    }

    #[test]
    fn test_plain_integer() {
        assert_eq!(parse_amount("320000").unwrap(), dec!(320_000));
    }

    #[test]
    fn test_decimal_point_is_stripped() {
        assert_eq!(parse_amount("1,234.56").unwrap(), dec!(123_456));
    }

    #[test]
    fn test_no_digits_rejected() {
        assert!(parse_amount("$,").is_err());
        assert!(parse_amount("").is_err());
    }

    #[test]
    fn test_overlong_rejected() {
        assert!(parse_amount("99999999999999999999999").is_err());
    }
}
