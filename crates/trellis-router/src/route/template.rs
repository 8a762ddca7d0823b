//! Route templates: parsing, matching and path building

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use super::pattern::{classify_segment, validate_literal, validate_name, Segment};
use crate::error::{Result, RouteError};
use crate::navigate::NavigationRequest;
use crate::params::{ParamValue, ParameterMap};
use crate::path::normalize_path;

/// Ordered sequence of segment descriptors
///
/// At most one catch-all segment is allowed and it must come last.
/// Parameter names are unique within a template.
///
/// # Examples
///
/// ```
/// use trellis_router::RouteTemplate;
///
/// let template = RouteTemplate::parse("/blogs/[blogID]/comments/[commentID]").unwrap();
/// let params = template.matches("/blogs/42/comments/7").unwrap();
///
/// assert_eq!(params.get_str("blogID"), Some("42"));
/// assert_eq!(params.get_str("commentID"), Some("7"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteTemplate {
    segments: Vec<Segment>,
}

impl RouteTemplate {
    /// Parses a pattern string such as `/files/[[...filePath]]`
    ///
    /// Empty segments are ignored, so `/`, `` and `//` all parse to the root
    /// template.
    pub fn parse(pattern: &str) -> Result<Self> {
        let segments = normalize_path(pattern)
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|raw| {
                classify_segment(raw).map_err(|reason| RouteError::invalid_template(pattern, reason))
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_segments_for(pattern, segments)
    }

    /// Builds a template from already classified segments, checking invariants
    ///
    /// Literals and parameter names get the same checks `parse` applies.
    pub fn from_segments(segments: Vec<Segment>) -> Result<Self> {
        let pattern = render_pattern(&segments);
        for segment in &segments {
            let checked = match segment {
                Segment::Literal(text) => validate_literal(text),
                Segment::Dynamic(name) | Segment::CatchAll { name, .. } => {
                    validate_name(name).map(drop)
                }
            };
            checked.map_err(|reason| RouteError::invalid_template(&pattern, reason))?;
        }
        Self::from_segments_for(&pattern, segments)
    }

    fn from_segments_for(pattern: &str, segments: Vec<Segment>) -> Result<Self> {
        if let Some(pos) = segments.iter().position(Segment::is_catch_all) {
            if pos + 1 != segments.len() {
                return Err(RouteError::invalid_template(
                    pattern,
                    "a catch-all segment must be the last segment",
                ));
            }
        }

        let mut seen: Vec<&str> = Vec::new();
        for name in segments.iter().filter_map(Segment::param_name) {
            if seen.contains(&name) {
                return Err(RouteError::invalid_template(
                    pattern,
                    format!("parameter `{}` appears more than once", name),
                ));
            }
            seen.push(name);
        }

        Ok(Self { segments })
    }

    /// The root template `/`
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Parameter names in declaration order
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(Segment::param_name)
    }

    pub fn literal_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_literal()).count()
    }

    pub fn has_catch_all(&self) -> bool {
        self.segments.last().is_some_and(Segment::is_catch_all)
    }

    /// Canonical pattern string, `/` for the root template
    pub fn pattern(&self) -> String {
        render_pattern(&self.segments)
    }

    /// Pattern with parameter names erased, used to key layouts
    ///
    /// `/blogs/[blogID]` and `/blogs/[id]` share the key `/blogs/[]`.
    pub(crate) fn shape_key(&self, case_insensitive: bool) -> String {
        let key = render_pattern(
            &self
                .segments
                .iter()
                .map(|segment| match segment {
                    Segment::Literal(text) => Segment::Literal(text.clone()),
                    Segment::Dynamic(_) => Segment::Dynamic(String::new()),
                    Segment::CatchAll { optional, .. } => Segment::CatchAll {
                        name: String::new(),
                        optional: *optional,
                    },
                })
                .collect::<Vec<_>>(),
        );
        if case_insensitive {
            key.to_ascii_lowercase()
        } else {
            key
        }
    }

    /// Whether at least one path is accepted by both templates
    ///
    /// Two overlapping templates with the same number of literals cannot be
    /// ordered, so registering both is a configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use trellis_router::RouteTemplate;
    ///
    /// let exact = RouteTemplate::parse("/files").unwrap();
    /// let optional = RouteTemplate::parse("/files/[[...filePath]]").unwrap();
    /// let blogs = RouteTemplate::parse("/blogs/[blogID]").unwrap();
    ///
    /// assert!(exact.overlaps(&optional, false));
    /// assert!(!exact.overlaps(&blogs, false));
    /// ```
    pub fn overlaps(&self, other: &RouteTemplate, case_insensitive: bool) -> bool {
        segments_overlap(&self.segments, &other.segments, case_insensitive)
    }

    /// Matches a path against this template (case-sensitive)
    pub fn matches(&self, path: &str) -> Option<ParameterMap> {
        self.matches_with_options(path, false)
    }

    /// Matches a path against this template with options
    ///
    /// The path is normalized first, so trailing slashes, doubled slashes and
    /// backslashes are tolerated. Captured values are percent-decoded.
    pub fn matches_with_options(&self, path: &str, case_insensitive: bool) -> Option<ParameterMap> {
        let normalized = normalize_path(path);
        let path_segments: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();

        match_segments(
            &self.segments,
            &path_segments,
            ParameterMap::new(),
            case_insensitive,
        )
    }

    /// Builds a concrete path by substituting parameter values
    ///
    /// Literals and parameter values are percent-encoded one segment at a
    /// time. Values for names the template
    /// does not use are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use trellis_router::{ParameterMap, RouteTemplate};
    ///
    /// let template = RouteTemplate::parse("/files/[[...filePath]]").unwrap();
    ///
    /// let params = ParameterMap::new().with("filePath", ["a", "b", "c"]);
    /// assert_eq!(template.build(&params).unwrap().path(), "/files/a/b/c");
    ///
    /// assert_eq!(template.build(&ParameterMap::new()).unwrap().path(), "/files");
    /// ```
    pub fn build(&self, params: &ParameterMap) -> Result<NavigationRequest> {
        let parts = self
            .segments
            .iter()
            .map(|segment| self.build_segment(segment, params))
            .collect::<Result<Vec<_>>>()?;

        let path = parts.into_iter().flatten().collect::<Vec<_>>().join("/");
        Ok(NavigationRequest::new(format!("/{}", path)))
    }

    fn build_segment(&self, segment: &Segment, params: &ParameterMap) -> Result<Vec<String>> {
        match segment {
            Segment::Literal(text) => Ok(vec![encode_segment(text)]),
            Segment::Dynamic(name) => {
                let value = match params.get(name) {
                    Some(ParamValue::One(value)) => value,
                    Some(ParamValue::Many(_)) => {
                        return Err(RouteError::invalid_parameter(
                            name,
                            "expected a single value for a dynamic segment",
                        ))
                    }
                    None => return Err(self.missing(name)),
                };
                if value.is_empty() {
                    return Err(RouteError::invalid_parameter(name, "value is empty"));
                }
                Ok(vec![encode_segment(value)])
            }
            Segment::CatchAll { name, optional } => {
                let values: &[String] = match params.get(name) {
                    Some(ParamValue::Many(values)) => values,
                    Some(ParamValue::One(value)) => std::slice::from_ref(value),
                    None if *optional => &[],
                    None => return Err(self.missing(name)),
                };
                if values.is_empty() && !optional {
                    return Err(self.missing(name));
                }
                if values.iter().any(String::is_empty) {
                    return Err(RouteError::invalid_parameter(
                        name,
                        "catch-all values must not be empty",
                    ));
                }
                Ok(values.iter().map(|v| encode_segment(v)).collect())
            }
        }
    }

    fn missing(&self, param: &str) -> RouteError {
        RouteError::MissingParameter {
            template: self.pattern(),
            param: param.to_string(),
        }
    }
}

impl fmt::Display for RouteTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern())
    }
}

impl FromStr for RouteTemplate {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn render_pattern(segments: &[Segment]) -> String {
    if segments.is_empty() {
        return "/".to_string();
    }
    segments
        .iter()
        .map(|s| format!("/{}", s.to_pattern()))
        .collect()
}

fn decode_segment(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| raw.to_string())
}

fn encode_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Walks two templates together looking for a path both accept
fn segments_overlap(a: &[Segment], b: &[Segment], case_insensitive: bool) -> bool {
    match (a.split_first(), b.split_first()) {
        (None, None) => true,

        // A catch-all swallows whatever the other side still needs
        (Some((Segment::CatchAll { optional, .. }, _)), None)
        | (None, Some((Segment::CatchAll { optional, .. }, _))) => *optional,
        (Some((Segment::CatchAll { .. }, _)), Some(_))
        | (Some(_), Some((Segment::CatchAll { .. }, _))) => true,

        (None, Some(_)) | (Some(_), None) => false,

        (Some((x, rest_a)), Some((y, rest_b))) => {
            x.overlaps(y, case_insensitive) && segments_overlap(rest_a, rest_b, case_insensitive)
        }
    }
}

/// Walks template and path segments together, left to right
fn match_segments(
    segments: &[Segment],
    path: &[&str],
    mut params: ParameterMap,
    case_insensitive: bool,
) -> Option<ParameterMap> {
    match segments.split_first() {
        // Template consumed: succeed only if the path is consumed too
        None => path.is_empty().then_some(params),

        // Catch-all is always last, so it takes everything that is left
        Some((Segment::CatchAll { name, optional }, _)) => {
            if path.is_empty() && !optional {
                return None;
            }
            let values = path.iter().map(|s| decode_segment(s)).collect();
            params.insert(name.clone(), ParamValue::Many(values));
            Some(params)
        }

        Some((Segment::Dynamic(name), rest)) => {
            let (value, remaining) = path.split_first()?;
            params.insert(name.clone(), ParamValue::One(decode_segment(value)));
            match_segments(rest, remaining, params, case_insensitive)
        }

        Some((Segment::Literal(text), rest)) => {
            let (value, remaining) = path.split_first()?;
            let value = decode_segment(value);
            let same = if case_insensitive {
                text.eq_ignore_ascii_case(&value)
            } else {
                *text == value
            };
            if !same {
                return None;
            }
            match_segments(rest, remaining, params, case_insensitive)
        }
    }
}
