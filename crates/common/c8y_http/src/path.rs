use percent_encoding::utf8_percent_encode;
use percent_encoding::AsciiSet;
use percent_encoding::CONTROLS;

/// Characters that must be escaped in a single path segment
///
/// https://url.spec.whatwg.org/#path-percent-encode-set plus `/` and `%`
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%');

/// A path template that cannot be expanded with the given parameters
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("Path template {template:?} expects {expected} parameter(s) but {given} were given")]
    Parameters {
        template: String,
        expected: usize,
        given: usize,
    },

    #[error("Empty value given for parameter #{position} of path template {template:?}")]
    EmptyParameter { template: String, position: usize },
}

/// Substitute the `{placeholders}` of a resource path template, in order
///
/// ```
/// # use c8y_http::expand_path;
/// let path = expand_path("/identity/externalIds/{type}/{externalId}", &["c8y_Serial", "device 01"]).unwrap();
/// assert_eq!(path, "/identity/externalIds/c8y_Serial/device%2001");
/// ```
pub fn expand_path(template: &str, params: &[&str]) -> Result<String, PathError> {
    let expected = template.matches('{').count();
    if expected != params.len() {
        return Err(PathError::Parameters {
            template: template.to_string(),
            expected,
            given: params.len(),
        });
    }

    let mut path = String::with_capacity(template.len());
    let mut rest = template;
    for (position, param) in params.iter().enumerate() {
        if param.is_empty() {
            return Err(PathError::EmptyParameter {
                template: template.to_string(),
                position,
            });
        }

        let start = rest.find('{').unwrap_or(rest.len());
        let end = rest[start..]
            .find('}')
            .map(|i| start + i + 1)
            .unwrap_or(rest.len());
        path.push_str(&rest[..start]);
        path.extend(utf8_percent_encode(param, PATH_SEGMENT));
        rest = &rest[end..];
    }
    path.push_str(rest);

    Ok(path)
}
