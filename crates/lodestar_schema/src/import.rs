//! Import of authored JSON Schema documents into schema trees.
//!
//! Tool authors usually derive argument schemas with `schemars`. This module
//! reads such a document back into a [`SchemaNode`] so provider layers can
//! rewrite it. Constructs without a tree representation (`not`, multi-member
//! `allOf`, `null`-only types, recursive references) become
//! [`SchemaKind::Unsupported`] nodes rather than errors.

use crate::check::{ArrayCheck, NumberCheck, StringCheck};
use crate::error::ImportError;
use crate::node::{ObjectSchema, SchemaKind, SchemaNode, UnknownKeys};
use indexmap::{IndexMap, IndexSet};
use schemars::{JsonSchema, Schema};
use serde_json::{Map, Value};

/// Generates the schema of `T` with `schemars` and imports it.
///
/// # Errors
///
/// Returns an [`ImportError`] if the generated document cannot be read.
pub fn schema_for<T: JsonSchema>() -> Result<SchemaNode, ImportError> {
    from_schemars(&schemars::schema_for!(T))
}

/// Imports a `schemars` schema.
///
/// # Errors
///
/// Returns an [`ImportError`] if the document cannot be read.
pub fn from_schemars(schema: &Schema) -> Result<SchemaNode, ImportError> {
    from_json_schema(schema.as_value())
}

/// Imports a JSON Schema document.
///
/// Internal references into `$defs` or `definitions` are inlined.
///
/// # Errors
///
/// Returns an [`ImportError`] if a subschema is not an object or boolean, a
/// keyword has the wrong JSON type, or a `$ref` cannot be resolved.
///
/// # Example
///
/// ```
/// use lodestar_schema::import::from_json_schema;
/// use lodestar_schema::NodeKind;
/// use serde_json::json;
///
/// let node = from_json_schema(&json!({
///     "type": "object",
///     "properties": { "when": { "type": "string", "format": "date-time" } }
/// }))
/// .unwrap();
///
/// let when = &node.as_object().unwrap().fields["when"];
/// assert_eq!(when.node_kind(), NodeKind::Optional);
/// ```
pub fn from_json_schema(document: &Value) -> Result<SchemaNode, ImportError> {
    let mut importer = Importer {
        document,
        expanding: Vec::new(),
    };
    importer.import(document, "#")
}

struct Importer<'a> {
    document: &'a Value,
    // References currently being inlined, to cut recursive definitions.
    expanding: Vec<String>,
}

impl<'a> Importer<'a> {
    fn import(&mut self, schema: &'a Value, path: &str) -> Result<SchemaNode, ImportError> {
        let obj = match schema {
            Value::Bool(true) => return Ok(SchemaNode::any()),
            Value::Bool(false) => return Ok(SchemaNode::never()),
            Value::Object(obj) => obj,
            other => {
                return Err(ImportError::NotASchema {
                    path: path.to_string(),
                    found: json_type(other),
                });
            }
        };

        let (mut node, nullable) = if let Some(reference) = obj.get("$ref") {
            (self.import_ref(reference, path)?, false)
        } else {
            self.import_body(obj, path)?
        };

        if let Some(description) = obj.get("description").and_then(Value::as_str) {
            node.description = Some(description.to_string());
        }

        let openapi_nullable = obj.get("nullable").and_then(Value::as_bool) == Some(true);
        if (nullable || openapi_nullable) && !node.is_optional() {
            node = node.optional();
        }

        if let Some(default) = obj.get("default") {
            node = node.with_default(default.clone());
        }

        Ok(node)
    }

    fn import_ref(&mut self, reference: &Value, path: &str) -> Result<SchemaNode, ImportError> {
        let reference = reference.as_str().ok_or_else(|| ImportError::InvalidKeyword {
            path: path.to_string(),
            keyword: "$ref",
            reason: "expected a string".to_string(),
        })?;

        if self.expanding.iter().any(|r| r == reference) {
            return Ok(SchemaNode::unsupported("recursive reference"));
        }

        let target = reference
            .strip_prefix('#')
            .and_then(|pointer| self.document.pointer(pointer))
            .ok_or_else(|| ImportError::UnresolvedReference {
                path: path.to_string(),
                reference: reference.to_string(),
            })?;

        self.expanding.push(reference.to_string());
        let node = self.import(target, reference);
        self.expanding.pop();
        node
    }

    /// Imports everything but `$ref`, `description` and `default`. The flag
    /// reports whether `null` was listed among the accepted types.
    fn import_body(
        &mut self,
        obj: &'a Map<String, Value>,
        path: &str,
    ) -> Result<(SchemaNode, bool), ImportError> {
        if let Some(value) = obj.get("const") {
            return Ok((SchemaNode::literal(value.clone()), false));
        }

        if let Some(values) = obj.get("enum") {
            let values = as_array(values, path, "enum")?;
            return Ok((SchemaNode::enumeration(values.iter().cloned()), false));
        }

        for keyword in ["anyOf", "oneOf"] {
            if let Some(variants) = obj.get(keyword) {
                return self.import_union(as_array(variants, path, keyword)?, path, keyword);
            }
        }

        if let Some(all_of) = obj.get("allOf") {
            let members = as_array(all_of, path, "allOf")?;
            return match members.as_slice() {
                [single] => Ok((self.import(single, &format!("{path}/allOf/0"))?, false)),
                _ => Ok((SchemaNode::unsupported("intersection"), false)),
            };
        }

        if obj.contains_key("not") {
            return Ok((SchemaNode::unsupported("not"), false));
        }

        match obj.get("type") {
            Some(Value::String(name)) => Ok((self.import_typed(name, obj, path)?, false)),
            Some(Value::Array(names)) => {
                let mut nullable = false;
                let mut variants = Vec::new();
                for name in names {
                    let name = name.as_str().ok_or_else(|| ImportError::InvalidKeyword {
                        path: path.to_string(),
                        keyword: "type",
                        reason: "expected an array of strings".to_string(),
                    })?;
                    if name == "null" {
                        nullable = true;
                    } else {
                        variants.push(self.import_typed(name, obj, path)?);
                    }
                }
                let node = match variants.len() {
                    0 => SchemaNode::unsupported("null"),
                    1 => variants.remove(0),
                    _ => SchemaNode::union(variants),
                };
                Ok((node, nullable))
            }
            Some(_) => Err(ImportError::InvalidKeyword {
                path: path.to_string(),
                keyword: "type",
                reason: "expected a string or an array of strings".to_string(),
            }),
            None if obj.contains_key("properties") => {
                Ok((self.import_typed("object", obj, path)?, false))
            }
            None if obj.contains_key("items") || obj.contains_key("prefixItems") => {
                Ok((self.import_typed("array", obj, path)?, false))
            }
            None => Ok((SchemaNode::any(), false)),
        }
    }

    fn import_union(
        &mut self,
        variants: &'a [Value],
        path: &str,
        keyword: &str,
    ) -> Result<(SchemaNode, bool), ImportError> {
        let mut nullable = false;
        let mut nodes = Vec::with_capacity(variants.len());
        for (i, variant) in variants.iter().enumerate() {
            if is_null_schema(variant) {
                nullable = true;
            } else {
                nodes.push(self.import(variant, &format!("{path}/{keyword}/{i}"))?);
            }
        }

        let node = match nodes.len() {
            0 => SchemaNode::unsupported("null"),
            1 => nodes.remove(0),
            _ => SchemaNode::union(nodes),
        };
        Ok((node, nullable))
    }

    fn import_typed(
        &mut self,
        name: &str,
        obj: &'a Map<String, Value>,
        path: &str,
    ) -> Result<SchemaNode, ImportError> {
        let node = match name {
            "object" => self.import_object(obj, path)?,
            "array" => self.import_array(obj, path)?,
            "string" => import_string(obj, path)?,
            "number" => import_number(obj, path, false)?,
            "integer" => import_number(obj, path, true)?,
            "boolean" => SchemaNode::boolean(),
            other => SchemaNode::unsupported(other),
        };
        Ok(node)
    }

    fn import_object(
        &mut self,
        obj: &'a Map<String, Value>,
        path: &str,
    ) -> Result<SchemaNode, ImportError> {
        let required: IndexSet<String> = match obj.get("required") {
            Some(value) => as_array(value, path, "required")?
                .iter()
                .map(|name| {
                    name.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| ImportError::InvalidKeyword {
                            path: path.to_string(),
                            keyword: "required",
                            reason: "expected an array of strings".to_string(),
                        })
                })
                .collect::<Result<_, _>>()?,
            None => IndexSet::new(),
        };

        let mut fields = IndexMap::new();
        if let Some(properties) = obj.get("properties") {
            let properties = properties.as_object().ok_or_else(|| ImportError::InvalidKeyword {
                path: path.to_string(),
                keyword: "properties",
                reason: "expected an object".to_string(),
            })?;
            for (name, schema) in properties {
                let mut field = self.import(schema, &format!("{path}/properties/{name}"))?;
                if !required.contains(name) && !field.is_optional() {
                    field = field.optional();
                }
                fields.insert(name.clone(), field);
            }
        }

        let unknown_keys = match obj.get("additionalProperties") {
            Some(Value::Bool(false)) => UnknownKeys::Strict,
            Some(_) => UnknownKeys::Passthrough,
            None => UnknownKeys::Strip,
        };

        let required = required
            .into_iter()
            .filter(|name| fields.get(name).is_some_and(|f: &SchemaNode| !f.is_optional()))
            .collect();

        Ok(SchemaNode::new(SchemaKind::Object(ObjectSchema {
            fields,
            required,
            unknown_keys,
        })))
    }

    fn import_array(
        &mut self,
        obj: &'a Map<String, Value>,
        path: &str,
    ) -> Result<SchemaNode, ImportError> {
        let tuple_items = match (obj.get("prefixItems"), obj.get("items")) {
            (Some(prefix), _) => Some(("prefixItems", as_array(prefix, path, "prefixItems")?)),
            (None, Some(Value::Array(items))) => Some(("items", items)),
            _ => None,
        };

        if let Some((keyword, items)) = tuple_items {
            let elements = items
                .iter()
                .enumerate()
                .map(|(i, item)| self.import(item, &format!("{path}/{keyword}/{i}")))
                .collect::<Result<_, _>>()?;
            return Ok(SchemaNode::tuple(elements));
        }

        let element = match obj.get("items") {
            Some(items) => self.import(items, &format!("{path}/items"))?,
            None => SchemaNode::any(),
        };

        let min = optional_u64(obj, path, "minItems")?;
        let max = optional_u64(obj, path, "maxItems")?;
        let checks = match (min, max) {
            (Some(min), Some(max)) if min == max => vec![ArrayCheck::ExactItems(min)],
            (min, max) => min
                .map(ArrayCheck::MinItems)
                .into_iter()
                .chain(max.map(ArrayCheck::MaxItems))
                .collect(),
        };

        Ok(SchemaNode::new(SchemaKind::Array {
            element: Box::new(element),
            checks,
        }))
    }
}

fn import_string(obj: &Map<String, Value>, path: &str) -> Result<SchemaNode, ImportError> {
    let format = obj.get("format").and_then(Value::as_str);
    if format == Some("date-time") {
        return Ok(SchemaNode::date());
    }

    let mut checks = Vec::new();
    match format {
        Some("email") => checks.push(StringCheck::Email),
        Some("uri" | "url") => checks.push(StringCheck::Url),
        Some("uuid") => checks.push(StringCheck::Uuid),
        Some(other) => checks.push(StringCheck::Format {
            format: other.to_string(),
        }),
        None => {}
    }
    if let Some(pattern) = obj.get("pattern") {
        let pattern = pattern.as_str().ok_or_else(|| ImportError::InvalidKeyword {
            path: path.to_string(),
            keyword: "pattern",
            reason: "expected a string".to_string(),
        })?;
        checks.push(StringCheck::Regex {
            pattern: pattern.to_string(),
            flags: String::new(),
        });
    }

    let min = optional_u64(obj, path, "minLength")?;
    let max = optional_u64(obj, path, "maxLength")?;
    match (min, max) {
        (Some(min), Some(max)) if min == max => checks.push(StringCheck::Length { value: min }),
        (min, max) => {
            checks.extend(min.map(|value| StringCheck::MinLength { value }));
            checks.extend(max.map(|value| StringCheck::MaxLength { value }));
        }
    }

    Ok(SchemaNode::new(SchemaKind::String { checks }))
}

fn import_number(
    obj: &Map<String, Value>,
    path: &str,
    integer: bool,
) -> Result<SchemaNode, ImportError> {
    let mut checks = Vec::new();
    if integer {
        checks.push(NumberCheck::Int);
    }

    let bounds: [(&'static str, fn(f64) -> NumberCheck); 5] = [
        ("minimum", |value| NumberCheck::Min {
            value,
            inclusive: true,
        }),
        ("exclusiveMinimum", |value| NumberCheck::Min {
            value,
            inclusive: false,
        }),
        ("maximum", |value| NumberCheck::Max {
            value,
            inclusive: true,
        }),
        ("exclusiveMaximum", |value| NumberCheck::Max {
            value,
            inclusive: false,
        }),
        ("multipleOf", |value| NumberCheck::MultipleOf { value }),
    ];

    for (keyword, make) in bounds {
        match obj.get(keyword) {
            // Draft 4 spells exclusive bounds as booleans next to minimum/maximum.
            None | Some(Value::Bool(_)) => {}
            Some(value) => {
                let number = value.as_f64().ok_or_else(|| ImportError::InvalidKeyword {
                    path: path.to_string(),
                    keyword,
                    reason: "expected a number".to_string(),
                })?;
                checks.push(make(number));
            }
        }
    }

    Ok(SchemaNode::new(SchemaKind::Number { checks }))
}

fn is_null_schema(schema: &Value) -> bool {
    schema.get("type").and_then(Value::as_str) == Some("null")
        || schema.get("const").is_some_and(Value::is_null)
}

fn as_array<'v>(
    value: &'v Value,
    path: &str,
    keyword: &'static str,
) -> Result<&'v Vec<Value>, ImportError> {
    value.as_array().ok_or_else(|| ImportError::InvalidKeyword {
        path: path.to_string(),
        keyword,
        reason: "expected an array".to_string(),
    })
}

fn optional_u64(
    obj: &Map<String, Value>,
    path: &str,
    keyword: &'static str,
) -> Result<Option<u64>, ImportError> {
    obj.get(keyword)
        .map(|value| {
            value.as_u64().ok_or_else(|| ImportError::InvalidKeyword {
                path: path.to_string(),
                keyword,
                reason: "expected a non-negative integer".to_string(),
            })
        })
        .transpose()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
