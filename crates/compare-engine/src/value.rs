//! Value semantics for comparing BSON documents across deployments.
//!
//! Two deployments can hold the same logical value in different binary
//! forms: an `Int32` on one side and an `Int64` on the other, or a
//! `Decimal128` written as `1.0` versus `1.00`. Equality here follows the
//! server's own numeric comparison rules so those cases are not reported as
//! differences, while a double `0.1` and a decimal `0.1` stay distinct.

use bson::{Bson, Decimal128, Document};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

const DECIMAL128_EXPONENT_BIAS: i32 = 6176;
const DECIMAL128_MAX_COEFFICIENT: u128 = 9_999_999_999_999_999_999_999_999_999_999_999;

/// A numeric BSON value decoded into a representation-independent form.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Number {
    /// `(-1)^negative * coefficient * 10^exponent` with trailing zeros
    /// stripped from the coefficient. Zero is always positive.
    Exact {
        negative: bool,
        coefficient: u128,
        exponent: i32,
    },
    /// A finite double whose exact decimal expansion does not fit the
    /// coefficient range. It can only equal another such double.
    Approx(f64),
    Infinity {
        negative: bool,
    },
    NaN,
}

impl Number {
    fn exact(negative: bool, mut coefficient: u128, mut exponent: i32) -> Self {
        if coefficient == 0 {
            return Number::Exact {
                negative: false,
                coefficient: 0,
                exponent: 0,
            };
        }
        while coefficient % 10 == 0 {
            coefficient /= 10;
            exponent += 1;
        }
        Number::Exact {
            negative,
            coefficient,
            exponent,
        }
    }

    fn from_i64(value: i64) -> Self {
        Number::exact(value < 0, u128::from(value.unsigned_abs()), 0)
    }

    fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            return Number::NaN;
        }
        if value.is_infinite() {
            return Number::Infinity {
                negative: value < 0.0,
            };
        }
        if value == 0.0 {
            return Number::exact(false, 0, 0);
        }

        let bits = value.to_bits();
        let negative = bits >> 63 == 1;
        let biased = ((bits >> 52) & 0x7ff) as i32;
        let fraction = bits & ((1u64 << 52) - 1);
        // value = mantissa * 2^power
        let (mut mantissa, mut power) = if biased == 0 {
            (fraction, -1074)
        } else {
            (fraction | (1u64 << 52), biased - 1075)
        };
        while mantissa & 1 == 0 && power < 0 {
            mantissa >>= 1;
            power += 1;
        }

        let exact = if power >= 0 {
            // Pull factors of ten out before widening so large round values
            // still land in the coefficient range.
            let mut exponent = 0;
            while power > 0 && mantissa % 5 == 0 {
                mantissa /= 5;
                power -= 1;
                exponent += 1;
            }
            let mantissa = u128::from(mantissa);
            let width = 128 - mantissa.leading_zeros() as i32;
            (width + power <= 128).then(|| (mantissa << power, exponent))
        } else {
            5u128
                .checked_pow(power.unsigned_abs())
                .and_then(|scale| u128::from(mantissa).checked_mul(scale))
                .map(|coefficient| (coefficient, power))
        };

        match exact {
            Some((coefficient, exponent)) => Number::exact(negative, coefficient, exponent),
            None => Number::Approx(value),
        }
    }

    /// Decode the IEEE 754-2008 BID layout used by `Decimal128`.
    fn from_decimal128(value: &Decimal128) -> Self {
        let bits = u128::from_le_bytes(value.bytes());
        let negative = bits >> 127 == 1;
        match (bits >> 122) & 0x1f {
            0x1f => return Number::NaN,
            0x1e => return Number::Infinity { negative },
            _ => {}
        }

        let (biased_exponent, coefficient) = if (bits >> 125) & 0b11 == 0b11 {
            // The implicit `100` prefix puts these coefficients above the
            // 34 digit maximum, which makes them non-canonical zeros.
            (((bits >> 111) & 0x3fff) as i32, 0)
        } else {
            (((bits >> 113) & 0x3fff) as i32, bits & ((1u128 << 113) - 1))
        };
        let coefficient = if coefficient > DECIMAL128_MAX_COEFFICIENT {
            0
        } else {
            coefficient
        };
        Number::exact(
            negative,
            coefficient,
            biased_exponent - DECIMAL128_EXPONENT_BIAS,
        )
    }

    fn to_f64(self) -> f64 {
        match self {
            Number::Exact {
                negative,
                coefficient,
                exponent,
            } => {
                let magnitude: f64 = format!("{coefficient}e{exponent}")
                    .parse()
                    .unwrap_or(f64::NAN);
                if negative {
                    -magnitude
                } else {
                    magnitude
                }
            }
            Number::Approx(value) => value,
            Number::Infinity { negative: true } => f64::NEG_INFINITY,
            Number::Infinity { negative: false } => f64::INFINITY,
            Number::NaN => f64::NAN,
        }
    }

    fn same_value(self, other: Number) -> bool {
        match (self, other) {
            (Number::Approx(a), Number::Approx(b)) => a == b,
            (a, b) => a == b,
        }
    }

    fn signum(self) -> i8 {
        match self {
            Number::Exact { coefficient: 0, .. } => 0,
            Number::Exact { negative, .. } | Number::Infinity { negative } => {
                if negative {
                    -1
                } else {
                    1
                }
            }
            Number::Approx(value) => {
                if value < 0.0 {
                    -1
                } else {
                    1
                }
            }
            Number::NaN => 0,
        }
    }

    /// Total order used for sorting; `NaN` sorts below every other number.
    fn cmp_value(self, other: Number) -> Ordering {
        match (self, other) {
            (Number::NaN, Number::NaN) => Ordering::Equal,
            (Number::NaN, _) => Ordering::Less,
            (_, Number::NaN) => Ordering::Greater,
            (
                Number::Exact {
                    coefficient: a,
                    exponent: ea,
                    ..
                },
                Number::Exact {
                    coefficient: b,
                    exponent: eb,
                    ..
                },
            ) => self.signum().cmp(&other.signum()).then_with(|| {
                let magnitude = compare_magnitude(a, ea, b, eb);
                if self.signum() < 0 {
                    magnitude.reverse()
                } else {
                    magnitude
                }
            }),
            (a, b) => a
                .to_f64()
                .partial_cmp(&b.to_f64())
                .unwrap_or(Ordering::Equal),
        }
    }
}

fn compare_magnitude(a: u128, ea: i32, b: u128, eb: i32) -> Ordering {
    let scale = |coefficient: u128, by: i32| {
        10u128
            .checked_pow(by.unsigned_abs())
            .and_then(|factor| coefficient.checked_mul(factor))
    };
    match ea.cmp(&eb) {
        Ordering::Equal => a.cmp(&b),
        Ordering::Greater => scale(a, ea - eb).map_or(Ordering::Greater, |a| a.cmp(&b)),
        Ordering::Less => scale(b, eb - ea).map_or(Ordering::Less, |b| a.cmp(&b)),
    }
}

fn numeric(value: &Bson) -> Option<Number> {
    match value {
        Bson::Int32(v) => Some(Number::from_i64(i64::from(*v))),
        Bson::Int64(v) => Some(Number::from_i64(*v)),
        Bson::Double(v) => Some(Number::from_f64(*v)),
        Bson::Decimal128(v) => Some(Number::from_decimal128(v)),
        _ => None,
    }
}

/// How field order inside documents affects equality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldOrder {
    /// Documents are compared as unordered mappings.
    #[default]
    Ignore,
    /// Fields must appear in the same order on both sides.
    Preserve,
}

/// What kind of difference was found at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifferenceKind {
    ValueMismatch,
    MissingInTarget,
    MissingInSource,
    OutOfOrder,
}

/// The first point at which two documents diverge.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDifference {
    /// Dotted field path, with `[i]` for array elements.
    pub path: String,
    pub kind: DifferenceKind,
    pub source: Option<Bson>,
    pub target: Option<Bson>,
}

impl FieldDifference {
    fn new(
        path: String,
        kind: DifferenceKind,
        source: Option<&Bson>,
        target: Option<&Bson>,
    ) -> Self {
        Self {
            path,
            kind,
            source: source.cloned(),
            target: target.cloned(),
        }
    }
}

impl fmt::Display for FieldDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |value: &Option<Bson>| {
            value
                .as_ref()
                .map_or_else(|| "<missing>".to_string(), |v| v.to_string())
        };
        match self.kind {
            DifferenceKind::ValueMismatch => write!(
                f,
                "field `{}` differs: source {}, target {}",
                self.path,
                show(&self.source),
                show(&self.target)
            ),
            DifferenceKind::MissingInTarget => write!(
                f,
                "field `{}` is missing in target (source {})",
                self.path,
                show(&self.source)
            ),
            DifferenceKind::MissingInSource => write!(
                f,
                "field `{}` is missing in source (target {})",
                self.path,
                show(&self.target)
            ),
            DifferenceKind::OutOfOrder => write!(
                f,
                "field `{}` is at a different position in target",
                self.path
            ),
        }
    }
}

/// Structural equality with numeric normalization. Nested documents are
/// compared without regard to field order.
pub fn values_equal(a: &Bson, b: &Bson) -> bool {
    diff_value(String::new(), a, b, FieldOrder::Ignore).is_none()
}

/// Like [`values_equal`] for whole documents, with a chosen field order rule.
pub fn documents_equal(a: &Document, b: &Document, order: FieldOrder) -> bool {
    diff_fields("", a, b, order, &BTreeSet::new()).is_none()
}

/// Configurable document comparison used by the sampled content check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentComparator {
    pub field_order: FieldOrder,
    /// Top-level fields left out of the comparison entirely.
    pub ignored_fields: BTreeSet<String>,
}

impl DocumentComparator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field_order(mut self, field_order: FieldOrder) -> Self {
        self.field_order = field_order;
        self
    }

    pub fn ignore_field(mut self, field: impl Into<String>) -> Self {
        self.ignored_fields.insert(field.into());
        self
    }

    /// Returns the first difference between the two documents, if any.
    pub fn diff(&self, source: &Document, target: &Document) -> Option<FieldDifference> {
        diff_fields(
            "",
            source,
            target,
            self.field_order,
            &self.ignored_fields,
        )
    }
}

fn child_path(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_string()
    } else {
        format!("{parent}.{field}")
    }
}

fn diff_value(
    path: String,
    source: &Bson,
    target: &Bson,
    order: FieldOrder,
) -> Option<FieldDifference> {
    let equal = match (source, target) {
        (Bson::Document(s), Bson::Document(t)) => {
            return diff_fields(&path, s, t, order, &BTreeSet::new());
        }
        (Bson::Array(s), Bson::Array(t)) => return diff_elements(&path, s, t, order),
        _ => match (numeric(source), numeric(target)) {
            (Some(s), Some(t)) => s.same_value(t),
            _ => source == target,
        },
    };
    if equal {
        None
    } else {
        Some(FieldDifference::new(
            path,
            DifferenceKind::ValueMismatch,
            Some(source),
            Some(target),
        ))
    }
}

fn diff_fields(
    path: &str,
    source: &Document,
    target: &Document,
    order: FieldOrder,
    ignored: &BTreeSet<String>,
) -> Option<FieldDifference> {
    let kept = |(key, _): &(&String, &Bson)| !ignored.contains(key.as_str());

    match order {
        FieldOrder::Ignore => {
            for (key, value) in source.iter().filter(kept) {
                let child = child_path(path, key);
                match target.get(key) {
                    Some(other) => {
                        if let Some(difference) = diff_value(child, value, other, order) {
                            return Some(difference);
                        }
                    }
                    None => {
                        return Some(FieldDifference::new(
                            child,
                            DifferenceKind::MissingInTarget,
                            Some(value),
                            None,
                        ));
                    }
                }
            }
            target
                .iter()
                .filter(kept)
                .find(|(key, _)| !source.contains_key(key.as_str()))
                .map(|(key, value)| {
                    FieldDifference::new(
                        child_path(path, key),
                        DifferenceKind::MissingInSource,
                        None,
                        Some(value),
                    )
                })
        }
        FieldOrder::Preserve => {
            let mut source_fields = source.iter().filter(kept);
            let mut target_fields = target.iter().filter(kept);
            loop {
                match (source_fields.next(), target_fields.next()) {
                    (None, None) => return None,
                    (Some((key, value)), None) => {
                        return Some(FieldDifference::new(
                            child_path(path, key),
                            DifferenceKind::MissingInTarget,
                            Some(value),
                            None,
                        ));
                    }
                    (None, Some((key, value))) => {
                        return Some(FieldDifference::new(
                            child_path(path, key),
                            DifferenceKind::MissingInSource,
                            None,
                            Some(value),
                        ));
                    }
                    (Some((source_key, source_value)), Some((target_key, target_value))) => {
                        if source_key != target_key {
                            let kind = if target.contains_key(source_key.as_str()) {
                                DifferenceKind::OutOfOrder
                            } else {
                                DifferenceKind::MissingInTarget
                            };
                            return Some(FieldDifference::new(
                                child_path(path, source_key),
                                kind,
                                Some(source_value),
                                target.get(source_key),
                            ));
                        }
                        let child = child_path(path, source_key);
                        let difference = diff_value(child, source_value, target_value, order);
                        if difference.is_some() {
                            return difference;
                        }
                    }
                }
            }
        }
    }
}

fn diff_elements(
    path: &str,
    source: &[Bson],
    target: &[Bson],
    order: FieldOrder,
) -> Option<FieldDifference> {
    for index in 0..source.len().max(target.len()) {
        let child = format!("{path}[{index}]");
        match (source.get(index), target.get(index)) {
            (Some(s), Some(t)) => {
                if let Some(difference) = diff_value(child, s, t, order) {
                    return Some(difference);
                }
            }
            (Some(s), None) => {
                return Some(FieldDifference::new(
                    child,
                    DifferenceKind::MissingInTarget,
                    Some(s),
                    None,
                ));
            }
            (None, Some(t)) => {
                return Some(FieldDifference::new(
                    child,
                    DifferenceKind::MissingInSource,
                    None,
                    Some(t),
                ));
            }
            (None, None) => break,
        }
    }
    None
}

/// Rank of a value's type in the server's canonical sort order.
fn type_bracket(value: &Bson) -> u8 {
    match value {
        Bson::MinKey => 0,
        Bson::Null | Bson::Undefined => 1,
        Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_) | Bson::Decimal128(_) => 2,
        Bson::String(_) | Bson::Symbol(_) => 3,
        Bson::Document(_) => 4,
        Bson::Array(_) => 5,
        Bson::Binary(_) => 6,
        Bson::ObjectId(_) => 7,
        Bson::Boolean(_) => 8,
        Bson::DateTime(_) => 9,
        Bson::Timestamp(_) => 10,
        Bson::RegularExpression(_) => 11,
        Bson::DbPointer(_) => 12,
        Bson::JavaScriptCode(_) => 13,
        Bson::JavaScriptCodeWithScope(_) => 14,
        Bson::MaxKey => 15,
    }
}

/// Orders two values the way a sort on a field holding them would.
pub fn compare_bson(a: &Bson, b: &Bson) -> Ordering {
    type_bracket(a)
        .cmp(&type_bracket(b))
        .then_with(|| match (a, b) {
            (Bson::String(x) | Bson::Symbol(x), Bson::String(y) | Bson::Symbol(y)) => x.cmp(y),
            (Bson::Document(x), Bson::Document(y)) => compare_documents(x, y),
            (Bson::Array(x), Bson::Array(y)) => compare_sequences(x, y),
            (Bson::Binary(x), Bson::Binary(y)) => x
                .bytes
                .len()
                .cmp(&y.bytes.len())
                .then_with(|| u8::from(x.subtype).cmp(&u8::from(y.subtype)))
                .then_with(|| x.bytes.cmp(&y.bytes)),
            (Bson::ObjectId(x), Bson::ObjectId(y)) => x.bytes().cmp(&y.bytes()),
            (Bson::Boolean(x), Bson::Boolean(y)) => x.cmp(y),
            (Bson::DateTime(x), Bson::DateTime(y)) => {
                x.timestamp_millis().cmp(&y.timestamp_millis())
            }
            (Bson::Timestamp(x), Bson::Timestamp(y)) => {
                (x.time, x.increment).cmp(&(y.time, y.increment))
            }
            (Bson::RegularExpression(x), Bson::RegularExpression(y)) => x
                .pattern
                .cmp(&y.pattern)
                .then_with(|| x.options.cmp(&y.options)),
            (Bson::JavaScriptCode(x), Bson::JavaScriptCode(y)) => x.cmp(y),
            (Bson::JavaScriptCodeWithScope(x), Bson::JavaScriptCodeWithScope(y)) => x
                .code
                .cmp(&y.code)
                .then_with(|| compare_documents(&x.scope, &y.scope)),
            _ => match (numeric(a), numeric(b)) {
                (Some(x), Some(y)) => x.cmp_value(y),
                _ => Ordering::Equal,
            },
        })
}

fn compare_documents(a: &Document, b: &Document) -> Ordering {
    for ((ka, va), (kb, vb)) in a.iter().zip(b.iter()) {
        let ordering = type_bracket(va)
            .cmp(&type_bracket(vb))
            .then_with(|| ka.cmp(kb))
            .then_with(|| compare_bson(va, vb));
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    a.len().cmp(&b.len())
}

fn compare_sequences(a: &[Bson], b: &[Bson]) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        let ordering = compare_bson(x, y);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    a.len().cmp(&b.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::{doc, oid::ObjectId};
    use std::str::FromStr;

    fn decimal(value: &str) -> Bson {
        Bson::Decimal128(Decimal128::from_str(value).unwrap())
    }

    #[test]
    fn test_integer_widths_are_equal() {
        assert!(values_equal(&Bson::Int32(42), &Bson::Int64(42)));
        assert!(values_equal(&Bson::Int64(-7), &Bson::Double(-7.0)));
        assert!(!values_equal(&Bson::Int32(42), &Bson::Int64(43)));
    }

    #[test]
    fn test_decimal_trailing_zeros_are_equal() {
        let one_point_zero = decimal("1.0");
        let one_point_zero_zero = decimal("1.00");
        assert_ne!(one_point_zero, one_point_zero_zero);
        assert!(values_equal(&one_point_zero, &one_point_zero_zero));
        assert!(values_equal(&one_point_zero, &Bson::Int32(1)));
        assert!(values_equal(&decimal("1.5"), &Bson::Double(1.5)));
    }

    #[test]
    fn test_decimal_signed_zero() {
        assert!(values_equal(&decimal("-0E+3"), &decimal("0.00")));
        assert!(values_equal(&decimal("-0"), &Bson::Double(-0.0)));
    }

    #[test]
    fn test_decimal_differs_from_inexact_double() {
        assert!(!values_equal(&decimal("0.1"), &Bson::Double(0.1)));
        assert!(!values_equal(&decimal("1.5"), &decimal("-1.5")));
    }

    #[test]
    fn test_nan_and_infinity() {
        assert!(values_equal(&Bson::Double(f64::NAN), &Bson::Double(f64::NAN)));
        assert!(values_equal(&decimal("NaN"), &Bson::Double(f64::NAN)));
        assert!(values_equal(
            &decimal("Infinity"),
            &Bson::Double(f64::INFINITY)
        ));
        assert!(!values_equal(
            &Bson::Double(f64::INFINITY),
            &Bson::Double(f64::NEG_INFINITY)
        ));
    }

    #[test]
    fn test_decimal_extremes() {
        assert!(values_equal(&decimal("1E+6144"), &decimal("10E+6143")));
        assert!(values_equal(
            &decimal("9999999999999999999999999999999999E-34"),
            &decimal("0.9999999999999999999999999999999999")
        ));
        assert!(!values_equal(
            &decimal("9999999999999999999999999999999999"),
            &decimal("9999999999999999999999999999999998")
        ));
        assert!(values_equal(
            &decimal("-Infinity"),
            &Bson::Double(f64::NEG_INFINITY)
        ));
    }

    #[test]
    fn test_large_round_double_matches_decimal() {
        // 1e22 is exactly representable as a double.
        assert!(values_equal(&Bson::Double(1e22), &decimal("1E+22")));
    }

    #[test]
    fn test_nested_documents_ignore_field_order() {
        let a = Bson::Document(doc! { "x": 1, "y": { "p": 1, "q": [1, 2] } });
        let b = Bson::Document(doc! { "y": { "q": [1i64, 2.0], "p": 1 }, "x": 1 });
        assert!(values_equal(&a, &b));
    }

    #[test]
    fn test_arrays_are_ordered() {
        let a = Bson::Array(vec![Bson::Int32(1), Bson::Int32(2)]);
        let b = Bson::Array(vec![Bson::Int32(2), Bson::Int32(1)]);
        assert!(!values_equal(&a, &b));
    }

    #[test]
    fn test_type_mismatch_is_a_difference() {
        assert!(!values_equal(
            &Bson::String("1".into()),
            &Bson::Int32(1)
        ));
        assert!(!values_equal(&Bson::Null, &Bson::Undefined));
    }

    #[test]
    fn test_diff_reports_nested_path() {
        let source = doc! { "_id": 1, "a": { "b": [1, 2, 3] } };
        let target = doc! { "_id": 1, "a": { "b": [1, 2, 4] } };
        let difference = DocumentComparator::new().diff(&source, &target).unwrap();
        assert_eq!(difference.path, "a.b[2]");
        assert_eq!(difference.kind, DifferenceKind::ValueMismatch);
        assert_eq!(difference.source, Some(Bson::Int32(3)));
        assert_eq!(difference.target, Some(Bson::Int32(4)));
        assert_eq!(difference.to_string(), "field `a.b[2]` differs: source 3, target 4");
    }

    #[test]
    fn test_diff_reports_missing_fields() {
        let source = doc! { "_id": 1, "a": 1 };
        let target = doc! { "_id": 1, "b": 1 };
        let difference = DocumentComparator::new().diff(&source, &target).unwrap();
        assert_eq!(difference.kind, DifferenceKind::MissingInTarget);
        assert_eq!(difference.path, "a");

        let difference = DocumentComparator::new()
            .diff(&doc! { "_id": 1 }, &doc! { "_id": 1, "extra": true })
            .unwrap();
        assert_eq!(difference.kind, DifferenceKind::MissingInSource);
        assert_eq!(difference.path, "extra");
    }

    #[test]
    fn test_ignored_fields_are_skipped() {
        let comparator = DocumentComparator::new().ignore_field("migratedAt");
        let source = doc! { "_id": 1, "v": 1 };
        let target = doc! { "_id": 1, "v": 1, "migratedAt": 12345 };
        assert!(comparator.diff(&source, &target).is_none());
        assert!(DocumentComparator::new().diff(&source, &target).is_some());
    }

    #[test]
    fn test_preserve_field_order() {
        let source = doc! { "_id": 1, "a": 1, "b": 2 };
        let target = doc! { "_id": 1, "b": 2, "a": 1 };
        assert!(DocumentComparator::new().diff(&source, &target).is_none());

        let strict = DocumentComparator::new().with_field_order(FieldOrder::Preserve);
        let difference = strict.diff(&source, &target).unwrap();
        assert_eq!(difference.kind, DifferenceKind::OutOfOrder);
        assert_eq!(difference.path, "a");
        assert!(documents_equal(&source, &target, FieldOrder::Ignore));
        assert!(!documents_equal(&source, &target, FieldOrder::Preserve));
    }

    #[test]
    fn test_compare_bson_type_brackets() {
        let oid = ObjectId::new();
        let mut values = vec![
            Bson::MaxKey,
            Bson::Boolean(false),
            Bson::ObjectId(oid),
            Bson::String("a".into()),
            Bson::Int32(5),
            Bson::Null,
            Bson::MinKey,
        ];
        values.sort_by(compare_bson);
        assert_eq!(
            values,
            vec![
                Bson::MinKey,
                Bson::Null,
                Bson::Int32(5),
                Bson::String("a".into()),
                Bson::ObjectId(oid),
                Bson::Boolean(false),
                Bson::MaxKey,
            ]
        );
    }

    #[test]
    fn test_compare_bson_numbers_across_types() {
        assert_eq!(
            compare_bson(&Bson::Int32(2), &Bson::Double(1.5)),
            Ordering::Greater
        );
        assert_eq!(
            compare_bson(&Bson::Int64(-3), &decimal("-2.5")),
            Ordering::Less
        );
        assert_eq!(
            compare_bson(&Bson::Int64(10), &decimal("10.0")),
            Ordering::Equal
        );
        assert_eq!(
            compare_bson(&Bson::Double(f64::NAN), &Bson::Int32(i32::MIN)),
            Ordering::Less
        );
        assert_eq!(
            compare_bson(&Bson::Int64(i64::MAX), &Bson::Int64(i64::MAX - 1)),
            Ordering::Greater
        );
    }
}
