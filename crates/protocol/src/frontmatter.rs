use crate::error::MetadataError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Validated frontmatter record.
///
/// Recognized fields are typed; anything else lands in `extra` untouched.
/// Missing/renamed fields are caught here at parse time, not at point of use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frontmatter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_skills: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

impl Frontmatter {
    /// Extract and validate the leading `---` frontmatter block.
    ///
    /// Returns `Ok(None)` when the document has no frontmatter at all.
    /// A block that opens but is malformed is a `MetadataError`.
    pub fn extract(input: &str) -> Result<Option<Frontmatter>, MetadataError> {
        let mut lines = input.lines();
        let Some(first) = lines.next() else {
            return Ok(None);
        };
        if first.trim_start_matches('\u{feff}').trim_end() != "---" {
            return Ok(None);
        }

        let mut yaml_lines: Vec<&str> = Vec::new();
        let mut terminated = false;
        for line in lines {
            let trimmed = line.trim_end();
            if trimmed == "---" || trimmed == "..." {
                terminated = true;
                break;
            }
            yaml_lines.push(line);
        }
        if !terminated {
            return Err(MetadataError::UnterminatedFrontmatter);
        }

        let raw_yaml = yaml_lines.join("\n");
        if raw_yaml.trim().is_empty() {
            return Ok(Some(Frontmatter::default()));
        }

        let yaml_value: serde_yaml::Value =
            serde_yaml::from_str(&raw_yaml).map_err(|e| MetadataError::Yaml(e.to_string()))?;
        let json_value: Value =
            serde_json::to_value(yaml_value).map_err(|e| MetadataError::Yaml(e.to_string()))?;
        let Value::Object(map) = json_value else {
            return Err(MetadataError::NotAMapping);
        };

        Self::from_fields(map.into_iter().collect()).map(Some)
    }

    fn from_fields(mut fields: BTreeMap<String, Value>) -> Result<Frontmatter, MetadataError> {
        let name = take_string(&mut fields, "name")?;
        let description = take_string(&mut fields, "description")?;
        let category = take_string(&mut fields, "category")?;
        let tags = take_string_list(&mut fields, "tags")?;
        let related_skills = take_string_list(&mut fields, "related_skills")?;

        Ok(Frontmatter {
            name,
            description,
            category,
            tags,
            related_skills,
            extra: fields,
        })
    }
}

fn take_string(
    fields: &mut BTreeMap<String, Value>,
    field: &'static str,
) -> Result<Option<String>, MetadataError> {
    match fields.remove(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(MetadataError::InvalidField {
            field,
            expected: "a string",
        }),
    }
}

fn take_string_list(
    fields: &mut BTreeMap<String, Value>,
    field: &'static str,
) -> Result<Vec<String>, MetadataError> {
    match fields.remove(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                _ => Err(MetadataError::InvalidField {
                    field,
                    expected: "a list of strings",
                }),
            })
            .collect(),
        Some(_) => Err(MetadataError::InvalidField {
            field,
            expected: "a list of strings",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn basic_frontmatter() {
        let input = "---\nname: api-security\ncategory: security\n---\n# Title\nBody";
        let fm = Frontmatter::extract(input).unwrap().unwrap();
        assert_eq!(fm.name.as_deref(), Some("api-security"));
        assert_eq!(fm.category.as_deref(), Some("security"));
        assert!(fm.extra.is_empty());
    }

    #[test]
    fn lists_and_extra_fields() {
        let input = "---\ntags:\n  - api\n  - security\nversion: 2\n---\n";
        let fm = Frontmatter::extract(input).unwrap().unwrap();
        assert_eq!(fm.tags, vec!["api".to_string(), "security".to_string()]);
        assert_eq!(fm.extra.get("version"), Some(&Value::from(2)));
    }

    #[test]
    fn no_frontmatter_is_not_an_error() {
        assert_eq!(Frontmatter::extract("# Just a doc\n").unwrap(), None);
        assert_eq!(Frontmatter::extract("").unwrap(), None);
    }

    #[test]
    fn bom_before_delimiter_is_tolerated() {
        let input = "\u{feff}---\nname: x\n---\n";
        let fm = Frontmatter::extract(input).unwrap().unwrap();
        assert_eq!(fm.name.as_deref(), Some("x"));
    }

    #[test]
    fn unterminated_block_is_metadata_error() {
        let input = "---\nname: x\nno closing delimiter";
        assert_eq!(
            Frontmatter::extract(input),
            Err(MetadataError::UnterminatedFrontmatter)
        );
    }

    #[test]
    fn wrong_field_type_is_metadata_error() {
        let input = "---\ntags: not-a-list\n---\n";
        assert!(matches!(
            Frontmatter::extract(input),
            Err(MetadataError::InvalidField { field: "tags", .. })
        ));
    }
}
