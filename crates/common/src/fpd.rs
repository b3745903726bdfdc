//! Legacy first-party data formatting.
//!
//! The exchange still expects first-party data in the pre-`ortb2` shape:
//! `site` is called `context`, and the `site`/`user` sections carry their
//! `ext` contents at the top level with segment `data` removed. Every other
//! section is forwarded untouched.

use serde_json::{Map, Value as Json};

use crate::merge::{merge_deep, MergePolicy};

const DATA_KEY: &str = "data";
const EXT_KEY: &str = "ext";

/// How a single top-level `ortb2` section is carried into the legacy object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionRule {
    /// `site`: renamed to `context`, then flattened.
    Context,
    /// `user`: flattened under its own name.
    User,
    /// Any other section: copied as-is.
    Passthrough,
}

impl SectionRule {
    fn for_section(name: &str) -> Self {
        match name {
            "site" => Self::Context,
            "user" => Self::User,
            _ => Self::Passthrough,
        }
    }

    fn output_key<'a>(self, name: &'a str) -> &'a str {
        match self {
            Self::Context => "context",
            Self::User | Self::Passthrough => name,
        }
    }
}

/// Reshape an `ortb2` object into the legacy first-party data layout.
///
/// Returns `None` when `ortb2` is absent or not a JSON object.
#[must_use]
pub fn legacy_fpd(ortb2: Option<&Json>, policy: MergePolicy) -> Option<Map<String, Json>> {
    // Only an object has named sections. Arrays and scalars are not reshaped
    // into index-keyed objects; `null` is treated as absent.
    let sections = ortb2?.as_object()?;

    let mut legacy = Map::with_capacity(sections.len());
    for (name, section) in sections {
        let rule = SectionRule::for_section(name);
        let value = match rule {
            SectionRule::Context | SectionRule::User => {
                Json::Object(flatten_section(section, policy))
            }
            SectionRule::Passthrough => section.clone(),
        };
        legacy.insert(rule.output_key(name).to_string(), value);
    }

    Some(legacy)
}

/// Drop `data`, hoist the contents of `ext`, merge everything else as-is.
///
/// Keys are merged in their original order so later keys win conflicts under
/// the default policy. Non-object sections flatten to `{}`.
fn flatten_section(section: &Json, policy: MergePolicy) -> Map<String, Json> {
    let mut flattened = Map::new();
    // A string or array section has no meaningful keys to flatten.
    let Some(fields) = section.as_object() else {
        log::debug!("Non-object first-party data section flattened to an empty object");
        return flattened;
    };

    for (key, value) in fields {
        match key.as_str() {
            DATA_KEY => {}
            EXT_KEY => {
                if let Some(ext) = value.as_object() {
                    merge_deep(&mut flattened, ext, policy);
                }
            }
            _ => {
                let mut single = Map::with_capacity(1);
                single.insert(key.clone(), value.clone());
                merge_deep(&mut flattened, &single, policy);
            }
        }
    }

    flattened
}
