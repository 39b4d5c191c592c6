use asset_tidy_engine::options::{ImageKind, normalize_extension};
use std::{fmt::Display, str::FromStr};

fn parse_bounded_number<T>(s: &str, min: T, max: Option<T>) -> Result<T, String>
where
    T: Copy + PartialOrd + Display + FromStr,
    <T as FromStr>::Err: Display,
{
    let value = s
        .trim()
        .parse::<T>()
        .map_err(|err| format!("invalid number '{s}': {err}"))?;
    if value < min {
        return Err(format!("value must be at least {min}"));
    }
    if let Some(max_bound) = max
        && value > max_bound
    {
        return Err(format!("value must be at most {max_bound}"));
    }
    Ok(value)
}

/// Parse a WebP quality in the inclusive range [0, 100].
///
/// # Errors
/// Returns an error if the input is not a number or is out of range.
pub fn parse_quality(s: &str) -> Result<f32, String> {
    let value: f32 = parse_bounded_number(s, 0.0, Some(100.0))?;
    if value.is_nan() {
        return Err(format!("invalid number '{s}'"));
    }
    Ok(value)
}

/// Parse a positive `usize` (>= 1) from CLI input.
///
/// # Errors
/// Returns an error if the input string is not a valid number or is less than 1.
pub fn parse_positive_usize(s: &str) -> Result<usize, String> {
    parse_bounded_number(s, 1, None)
}

/// Parse a job count in [0, 512]; 0 means one worker per core.
///
/// # Errors
/// Returns an error if the input string is not a valid number or is above 512.
pub fn parse_jobs(s: &str) -> Result<usize, String> {
    parse_bounded_number(s, 0, Some(512))
}

/// Parse one source extension (`jpg`, `.JPEG`, `png`) into its normalised form.
///
/// # Errors
/// Returns an error for extensions the converter cannot decode.
pub fn parse_extension(s: &str) -> Result<String, String> {
    let ext = normalize_extension(s);
    ImageKind::from_extension(&ext)
        .map(|_| ext)
        .ok_or_else(|| format!("unsupported extension '{s}' (expected jpg, jpeg or png)"))
}
