// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! COSE header-parameter parsing.
//!
//! COSE header parameters live in two header maps:
//! - Protected headers: encoded as a CBOR bstr containing a CBOR map
//! - Unprotected headers: encoded as an inline CBOR map
//!
//! Both maps are parsed by the same single-pass routine into a [`HeaderSet`]
//! of the parameters this implementation understands. Labels it does not
//! understand are collected so the `crit` rule can be enforced: a recipient
//! must reject a message whose critical-parameters list names a label it
//! does not process.
//!
//! Inner maps and arrays may be definite- or indefinite-length. Every
//! borrowed slice points into the message being verified; nothing is copied.

use minicbor::data::Type;
use minicbor::Decoder;

use crate::error::VerifyError;

/// Integer header labels handled here (IANA COSE Header Parameters).
const HEADER_PARAM_ALG: i64 = 1;
const HEADER_PARAM_CRIT: i64 = 2;
const HEADER_PARAM_CONTENT_TYPE: i64 = 3;
const HEADER_PARAM_KID: i64 = 4;
const HEADER_PARAM_IV: i64 = 5;
const HEADER_PARAM_PARTIAL_IV: i64 = 6;

/// Reserved by the IANA COSE Algorithms registry; never a valid assignment.
const COSE_ALGORITHM_RESERVED: i64 = 0;

/// Labels a single map may carry per label kind before parsing fails with
/// [`VerifyError::TooManyHeaders`].
pub const HEADER_LIST_MAX: usize = 10;

/// Bounded list of header labels.
///
/// Integer and byte-string labels are tracked independently, each with
/// capacity [`HEADER_LIST_MAX`], in encounter order.
#[derive(Debug, Default, Clone, Copy)]
struct LabelList<'a> {
    ints: [i64; HEADER_LIST_MAX],
    num_ints: usize,
    bstrs: [&'a [u8]; HEADER_LIST_MAX],
    num_bstrs: usize,
}

impl<'a> LabelList<'a> {
    fn push_int(&mut self, label: i64) -> Result<(), VerifyError> {
        if self.num_ints == HEADER_LIST_MAX {
            return Err(VerifyError::TooManyHeaders);
        }
        self.ints[self.num_ints] = label;
        self.num_ints += 1;
        Ok(())
    }

    fn push_bstr(&mut self, label: &'a [u8]) -> Result<(), VerifyError> {
        if self.num_bstrs == HEADER_LIST_MAX {
            return Err(VerifyError::TooManyHeaders);
        }
        self.bstrs[self.num_bstrs] = label;
        self.num_bstrs += 1;
        Ok(())
    }

    fn ints(&self) -> &[i64] {
        &self.ints[..self.num_ints]
    }

    fn bstrs(&self) -> &[&'a [u8]] {
        &self.bstrs[..self.num_bstrs]
    }

    fn contains_int(&self, label: i64) -> bool {
        self.ints().contains(&label)
    }

    fn contains_bstr(&self, label: &[u8]) -> bool {
        self.bstrs().iter().any(|b| *b == label)
    }
}

/// Content type header value: a CoAP content-format number or a MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType<'a> {
    Format(u64),
    Mime(&'a str),
}

/// Header parameters recovered from one COSE header map.
///
/// Every slice borrows from the message being verified.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeaderSet<'a> {
    /// COSE algorithm id from label 1; `None` when the map carries no `alg`.
    pub alg_id: Option<i32>,
    /// Key identifier from label 4.
    pub kid: Option<&'a [u8]>,
    /// Initialization vector from label 5. Parsed; unused by verification.
    pub iv: Option<&'a [u8]>,
    /// Partial initialization vector from label 6. Parsed; unused by
    /// verification. Mutually exclusive with `iv` within one map.
    pub partial_iv: Option<&'a [u8]>,
    /// Content type from label 3. Parsed; unused by verification.
    pub content_type: Option<ContentType<'a>>,
}

/// Parse one complete header map from `dec`, leaving the decoder positioned
/// on the item after the map.
pub(crate) fn parse_header_map<'a>(dec: &mut Decoder<'a>) -> Result<HeaderSet<'a>, VerifyError> {
    let mut headers = HeaderSet::default();
    let mut unknown = LabelList::default();
    let mut critical = LabelList::default();

    let mut remaining = begin_map(dec)?;
    while more_entries(dec, &mut remaining)? {
        parse_header_entry(dec, &mut headers, &mut unknown, &mut critical)?;
    }

    // iv and partial iv are distinct parameters; a signer never emits both
    // in one map.
    if headers.iv.is_some() && headers.partial_iv.is_some() {
        return Err(VerifyError::Sign1Format);
    }

    check_critical_headers(&critical, &unknown)?;

    Ok(headers)
}

/// Parse the protected header map out of its bstr wrapping.
///
/// A zero-length byte string is the other wire encoding of the empty map and
/// is accepted. The bstr contents must hold exactly one map and nothing else.
pub(crate) fn parse_protected_headers(protected: &[u8]) -> Result<HeaderSet<'_>, VerifyError> {
    if protected.is_empty() {
        return Ok(HeaderSet::default());
    }

    let mut dec = Decoder::new(protected);
    let headers = parse_header_map(&mut dec)?;
    if dec.position() != protected.len() {
        return Err(VerifyError::CborNotWellFormed);
    }
    Ok(headers)
}

fn begin_map(dec: &mut Decoder<'_>) -> Result<Option<u64>, VerifyError> {
    match dec.datatype().map_err(|_| VerifyError::CborNotWellFormed)? {
        Type::Map | Type::MapIndef => dec.map().map_err(|_| VerifyError::CborNotWellFormed),
        _ => Err(VerifyError::CborStructure),
    }
}

/// Step the container iteration: count down a definite length, or consume
/// the break byte ending an indefinite container. Returns `false` once the
/// container is exhausted.
fn more_entries(dec: &mut Decoder<'_>, remaining: &mut Option<u64>) -> Result<bool, VerifyError> {
    match remaining {
        Some(0) => Ok(false),
        Some(n) => {
            *n -= 1;
            Ok(true)
        }
        None => {
            if dec.datatype().map_err(|_| VerifyError::CborNotWellFormed)? == Type::Break {
                // The break is a single byte; step over it.
                dec.set_position(dec.position() + 1);
                Ok(false)
            } else {
                Ok(true)
            }
        }
    }
}

fn is_int(ty: Type) -> bool {
    matches!(
        ty,
        Type::U8
            | Type::U16
            | Type::U32
            | Type::U64
            | Type::I8
            | Type::I16
            | Type::I32
            | Type::I64
            | Type::Int
    )
}

fn is_uint(ty: Type) -> bool {
    matches!(ty, Type::U8 | Type::U16 | Type::U32 | Type::U64)
}

/// Parse one label/value pair.
fn parse_header_entry<'a>(
    dec: &mut Decoder<'a>,
    headers: &mut HeaderSet<'a>,
    unknown: &mut LabelList<'a>,
    critical: &mut LabelList<'a>,
) -> Result<(), VerifyError> {
    let label_type = dec.datatype().map_err(|_| VerifyError::CborNotWellFormed)?;

    if is_int(label_type) {
        let label = label_i64(dec)?;
        parse_labeled_value(dec, label, headers, unknown, critical)
    } else if label_type == Type::Bytes {
        // Byte-string labels are never handled here; collect and move on.
        let label = dec.bytes().map_err(|_| VerifyError::CborNotWellFormed)?;
        unknown.push_bstr(label)?;
        consume_value(dec)
    } else {
        Err(VerifyError::CborStructure)
    }
}

fn parse_labeled_value<'a>(
    dec: &mut Decoder<'a>,
    label: i64,
    headers: &mut HeaderSet<'a>,
    unknown: &mut LabelList<'a>,
    critical: &mut LabelList<'a>,
) -> Result<(), VerifyError> {
    match label {
        HEADER_PARAM_ALG => {
            // Text-string algorithm identifiers are not supported.
            if !is_int(dec.datatype().map_err(|_| VerifyError::CborNotWellFormed)?) {
                return Err(VerifyError::UnsupportedSigningAlg);
            }
            // An id that does not even fit i64 is far outside the registry.
            let alg = dec.i64().map_err(|_| VerifyError::UnsupportedSigningAlg)?;
            if alg == COSE_ALGORITHM_RESERVED
                || alg > i64::from(i32::MAX)
                || alg < i64::from(i32::MIN)
            {
                return Err(VerifyError::UnsupportedSigningAlg);
            }
            headers.alg_id = Some(alg as i32);
        }

        HEADER_PARAM_CRIT => {
            match dec.datatype().map_err(|_| VerifyError::CborNotWellFormed)? {
                Type::Array | Type::ArrayIndef => parse_critical_list(dec, critical)?,
                _ => return Err(VerifyError::Sign1Format),
            }
        }

        HEADER_PARAM_CONTENT_TYPE => {
            let ty = dec.datatype().map_err(|_| VerifyError::CborNotWellFormed)?;
            headers.content_type = Some(if is_uint(ty) {
                ContentType::Format(dec.u64().map_err(|_| VerifyError::CborNotWellFormed)?)
            } else if ty == Type::String {
                ContentType::Mime(dec.str().map_err(|_| VerifyError::CborNotWellFormed)?)
            } else {
                return Err(VerifyError::Sign1Format);
            });
        }

        HEADER_PARAM_KID => headers.kid = Some(expect_bytes(dec)?),
        HEADER_PARAM_IV => headers.iv = Some(expect_bytes(dec)?),
        HEADER_PARAM_PARTIAL_IV => headers.partial_iv = Some(expect_bytes(dec)?),

        _ => {
            // Not a label handled here; record it so the crit check can see
            // it, then step over its value whatever its shape.
            unknown.push_int(label)?;
            consume_value(dec)?;
        }
    }

    Ok(())
}

/// Parse the critical-parameters array into `critical`.
///
/// Elements must be integer or byte-string labels. An empty array is
/// syntactically accepted.
fn parse_critical_list<'a>(
    dec: &mut Decoder<'a>,
    critical: &mut LabelList<'a>,
) -> Result<(), VerifyError> {
    let mut remaining = dec.array().map_err(|_| VerifyError::CborNotWellFormed)?;
    while more_entries(dec, &mut remaining)? {
        let ty = dec.datatype().map_err(|_| VerifyError::CborNotWellFormed)?;
        if is_int(ty) {
            critical.push_int(label_i64(dec)?)?;
        } else if ty == Type::Bytes {
            critical.push_bstr(dec.bytes().map_err(|_| VerifyError::CborNotWellFormed)?)?;
        } else {
            return Err(VerifyError::CborStructure);
        }
    }
    Ok(())
}

/// Reject the map if any label we did not handle is listed as critical.
/// Integer labels match by equality, byte-string labels by byte equality.
fn check_critical_headers(
    critical: &LabelList<'_>,
    unknown: &LabelList<'_>,
) -> Result<(), VerifyError> {
    for label in unknown.ints() {
        if critical.contains_int(*label) {
            return Err(VerifyError::UnknownCriticalHeader);
        }
    }
    for label in unknown.bstrs() {
        if critical.contains_bstr(label) {
            return Err(VerifyError::UnknownCriticalHeader);
        }
    }
    Ok(())
}

pub(crate) fn expect_bytes<'a>(dec: &mut Decoder<'a>) -> Result<&'a [u8], VerifyError> {
    match dec.datatype().map_err(|_| VerifyError::CborNotWellFormed)? {
        Type::Bytes => dec.bytes().map_err(|_| VerifyError::CborNotWellFormed),
        _ => Err(VerifyError::Sign1Format),
    }
}

/// Step over one value of any shape, nested content included.
fn consume_value(dec: &mut Decoder<'_>) -> Result<(), VerifyError> {
    dec.skip().map_err(|_| VerifyError::CborNotWellFormed)
}

/// Read an integer label. Labels that do not fit i64 are a structure error,
/// not a malformation; a truncated stream stays not-well-formed.
fn label_i64(dec: &mut Decoder<'_>) -> Result<i64, VerifyError> {
    dec.i64().map_err(|e| {
        if e.is_end_of_input() {
            VerifyError::CborNotWellFormed
        } else {
            VerifyError::CborStructure
        }
    })
}
