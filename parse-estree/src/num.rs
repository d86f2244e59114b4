use core::hash::Hash;
use core::hash::Hasher;
use serde::Serialize;
use serde::Serializer;
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

// This provides Eq for f64.
#[derive(Copy, Clone, Debug)]
pub struct JsNumber(pub f64);

impl JsNumber {
  /// Parses the source text of a numeric literal (without a BigInt suffix).
  pub fn from_literal(raw: &str) -> Option<JsNumber> {
    let clean = raw.replace('_', "");
    let radix = |digits: &str, radix: u32| -> Option<f64> {
      // Literals may exceed u64, so fold manually.
      digits.chars().try_fold(0f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
      })
    };
    let bytes = clean.as_bytes();
    let value = match bytes {
      [b'0', b'x' | b'X', ..] => radix(&clean[2..], 16)?,
      [b'0', b'o' | b'O', ..] => radix(&clean[2..], 8)?,
      [b'0', b'b' | b'B', ..] => radix(&clean[2..], 2)?,
      [b'0', rest @ ..] if !rest.is_empty() && rest.iter().all(u8::is_ascii_digit) => {
        if rest.iter().all(|b| (b'0'..=b'7').contains(b)) {
          radix(&clean[1..], 8)?
        } else {
          clean.parse().ok()?
        }
      }
      _ => clean.parse().ok()?,
    };
    Some(JsNumber(value))
  }

  /// Whether the literal text is a legacy octal (`017`) or a decimal with a leading zero (`08`).
  pub fn is_legacy_octal_like(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() > 1 && bytes[0] == b'0' && bytes[1].is_ascii_digit()
  }
}

impl Display for JsNumber {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl PartialEq for JsNumber {
  fn eq(&self, other: &Self) -> bool {
    if self.0.is_nan() {
      return other.0.is_nan();
    };
    self.0.eq(&other.0)
  }
}

impl Eq for JsNumber {}

impl Ord for JsNumber {
  fn cmp(&self, other: &Self) -> Ordering {
    // Only NaNs cannot be compared, and we treat them as equal.
    self.0.partial_cmp(&other.0).unwrap_or(Ordering::Equal)
  }
}

impl PartialOrd for JsNumber {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Hash for JsNumber {
  fn hash<H: Hasher>(&self, state: &mut H) {
    if !self.0.is_nan() {
      self.0.to_bits().hash(state);
    };
  }
}

// Integral values serialize as JSON integers, matching what a JavaScript consumer would print.
impl Serialize for JsNumber {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let v = self.0;
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 9007199254740992.0 {
      if v == 0.0 && v.is_sign_negative() {
        return serializer.serialize_f64(v);
      };
      return serializer.serialize_i64(v as i64);
    };
    serializer.serialize_f64(v)
  }
}

#[cfg(test)]
mod tests {
  use super::JsNumber;

  #[test]
  fn test_from_literal() {
    assert_eq!(JsNumber::from_literal("42"), Some(JsNumber(42.0)));
    assert_eq!(JsNumber::from_literal("1_000"), Some(JsNumber(1000.0)));
    assert_eq!(JsNumber::from_literal("0x1F"), Some(JsNumber(31.0)));
    assert_eq!(JsNumber::from_literal("0o17"), Some(JsNumber(15.0)));
    assert_eq!(JsNumber::from_literal("0b101"), Some(JsNumber(5.0)));
    assert_eq!(JsNumber::from_literal("017"), Some(JsNumber(15.0)));
    assert_eq!(JsNumber::from_literal("089"), Some(JsNumber(89.0)));
    assert_eq!(JsNumber::from_literal(".5"), Some(JsNumber(0.5)));
    assert_eq!(JsNumber::from_literal("1e3"), Some(JsNumber(1000.0)));
    assert_eq!(JsNumber::from_literal("5."), Some(JsNumber(5.0)));
  }

  #[test]
  fn test_serialize_integral() {
    assert_eq!(serde_json::to_string(&JsNumber(3.0)).unwrap(), "3");
    assert_eq!(serde_json::to_string(&JsNumber(0.5)).unwrap(), "0.5");
  }
}
