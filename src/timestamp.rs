use crate::error::SubcueError;

/// Converts an SRT timestamp (`HH:MM:SS,mmm` or `HH:MM:SS.mmm`) into an
/// offset in seconds.
///
/// Each of the three colon-separated fields is read as a number, so lenient
/// forms such as `1:2:3,4` are accepted as well. Anything that does not yield
/// three finite, non-negative fields is reported as
/// [`SubcueError::MalformedTimestamp`].
pub fn to_seconds(timestamp: &str) -> Result<f64, SubcueError> {
    let malformed = || SubcueError::MalformedTimestamp {
        timestamp: timestamp.to_string(),
    };

    let normalised = timestamp.trim().replace(',', ".");
    let fields = normalised
        .split(':')
        .map(|field| field.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0))
        .collect::<Option<Vec<f64>>>()
        .ok_or_else(malformed)?;

    match fields.as_slice() {
        [hours, minutes, seconds] => Ok(hours * 3600.0 + minutes * 60.0 + seconds),
        _ => Err(malformed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_to_seconds {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let (input, expected): (&str, f64) = $value;

                let seconds = to_seconds(input).unwrap();

                assert!(
                    (seconds - expected).abs() < 1e-9,
                    "{} parsed as {}, expected {}",
                    input,
                    seconds,
                    expected
                );
            }
        )*
        }
    }

    test_to_seconds! {
        test_to_seconds_0: ("01:02:03,456", 3723.456),
        test_to_seconds_1: ("00:00:00,000", 0.0),
        test_to_seconds_2: ("01:02:03.456", 3723.456),
        test_to_seconds_3: ("00:00:01,200", 1.2),
        test_to_seconds_4: ("1:1:1,2", 3661.2),
        test_to_seconds_5: ("100:00:00,001", 360_000.001),
        test_to_seconds_6: ("00:00:59", 59.0),
        test_to_seconds_7: (" 00:01:00,000 ", 60.0),
    }

    macro_rules! test_malformed {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let input: &str = $value;

                match to_seconds(input) {
                    Err(SubcueError::MalformedTimestamp { timestamp }) => {
                        assert_eq!(timestamp, input)
                    }
                    other => panic!("expected MalformedTimestamp, got {:?}", other),
                }
            }
        )*
        }
    }

    test_malformed! {
        test_malformed_0: "",
        test_malformed_1: "00:00",
        test_malformed_2: "00:00:00:00,000",
        test_malformed_3: "aa:00:01,000",
        test_malformed_4: "00::01,000",
        test_malformed_5: "00:-1:01,000",
        test_malformed_6: "00:00:01,000,5",
    }

    #[test]
    fn separators_are_equivalent() {
        assert_eq!(
            to_seconds("12:34:56,789").unwrap(),
            to_seconds("12:34:56.789").unwrap()
        );
    }
}
