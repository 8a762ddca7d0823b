//! Pattern parsing for route segments
//!
//! Pure parsing of pattern strings such as `[blogID]` or `[[...filePath]]`
//! into typed segments. Same input, same output, no side effects.

/// One segment descriptor of a route template
///
/// # Examples
///
/// ```
/// use trellis_router::route::pattern::{classify_segment, Segment};
///
/// assert!(matches!(classify_segment("about"), Ok(Segment::Literal(_))));
/// assert!(matches!(classify_segment("[id]"), Ok(Segment::Dynamic(_))));
/// assert!(matches!(
///     classify_segment("[...slug]"),
///     Ok(Segment::CatchAll { optional: false, .. })
/// ));
/// assert!(matches!(
///     classify_segment("[[...slug]]"),
///     Ok(Segment::CatchAll { optional: true, .. })
/// ));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Static text segment
    Literal(String),
    /// Dynamic segment: [name]
    Dynamic(String),
    /// Catch-all segment: [...name], or [[...name]] when optional
    CatchAll { name: String, optional: bool },
}

impl Segment {
    /// Parameter bound by this segment, if any
    pub fn param_name(&self) -> Option<&str> {
        match self {
            Segment::Literal(_) => None,
            Segment::Dynamic(name) | Segment::CatchAll { name, .. } => Some(name),
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Segment::Literal(_))
    }

    pub fn is_catch_all(&self) -> bool {
        matches!(self, Segment::CatchAll { .. })
    }

    /// Whether some path segment is accepted by both segments
    ///
    /// Only meaningful for single-segment kinds; catch-alls are handled by
    /// the template walk.
    pub(crate) fn overlaps(&self, other: &Segment, case_insensitive: bool) -> bool {
        match (self, other) {
            (Segment::Literal(a), Segment::Literal(b)) => {
                if case_insensitive {
                    a.eq_ignore_ascii_case(b)
                } else {
                    a == b
                }
            }
            _ => true,
        }
    }

    /// Writes the segment back in pattern syntax
    pub(crate) fn to_pattern(&self) -> String {
        match self {
            Segment::Literal(text) => text.clone(),
            Segment::Dynamic(name) => format!("[{}]", name),
            Segment::CatchAll { name, optional: false } => format!("[...{}]", name),
            Segment::CatchAll { name, optional: true } => format!("[[...{}]]", name),
        }
    }
}

/// Classifies a single pattern segment
///
/// # Parsing Rules (evaluated in order)
///
/// 1. **Optional catch-all**: `[[...name]]`
/// 2. **Catch-all**: `[...name]`
/// 3. **Dynamic**: `[name]`
/// 4. **Literal**: any text without brackets
///
/// Anything else carrying a bracket is rejected with a reason.
pub fn classify_segment(segment: &str) -> Result<Segment, String> {
    if let Some(inner) = segment
        .strip_prefix("[[")
        .and_then(|s| s.strip_suffix("]]"))
    {
        return match inner.strip_prefix("...") {
            Some(name) => validate_name(name).map(|name| Segment::CatchAll {
                name,
                optional: true,
            }),
            None => Err("double brackets are only valid as `[[...name]]`".to_string()),
        };
    }

    match segment.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        Some(inner) => match inner.strip_prefix("...") {
            Some(name) => validate_name(name).map(|name| Segment::CatchAll {
                name,
                optional: false,
            }),
            None => validate_name(inner).map(Segment::Dynamic),
        },
        None if segment.contains(['[', ']']) => {
            Err(format!("unbalanced brackets in segment `{}`", segment))
        }
        None => Ok(Segment::Literal(segment.to_string())),
    }
}

pub(crate) fn validate_name(name: &str) -> Result<String, String> {
    if name.is_empty() {
        return Err("parameter name is empty".to_string());
    }
    if name.contains(['[', ']', '.', '/', '?', '{', '}']) {
        return Err(format!("parameter name `{}` contains reserved characters", name));
    }
    Ok(name.to_string())
}

/// Checks a literal built by hand rather than parsed from a pattern
pub(crate) fn validate_literal(text: &str) -> Result<(), String> {
    if text.is_empty() {
        return Err("literal segment is empty".to_string());
    }
    if text.contains(['/', '\\', '[', ']']) {
        return Err(format!("literal segment `{}` contains reserved characters", text));
    }
    Ok(())
}
