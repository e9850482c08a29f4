use crate::ast::*;
use crate::error::Result;
use serde_json::{Map as JSMap, Value as JSValue};

/// A map of variable values, as sent next to a request's document.
pub type JSVariables = JSMap<String, JSValue>;

/// Trait for converting AST Value Nodes of a GraphQL request document to [serde_json::Value]s.
///
/// Input objects are converted in full wherever they're referenced, so like printing, converting
/// an input object that's nested inside itself fails with a cyclic reference error.
pub trait ValueFromNode {
    /// Convert an AST Value Node to a [serde_json::Value] while tracking the input objects on
    /// the current `path`.
    fn json_with_path(
        &self,
        path: &mut ActiveObjects,
        variables: Option<&JSVariables>,
    ) -> Result<JSValue>;

    /// Convert current AST Value Node to a [serde_json::Value] with given variables.
    ///
    /// Variable references are replaced with their value in `variables` and with `null` when
    /// they aren't passed.
    #[inline]
    fn to_json(&self, variables: Option<&JSVariables>) -> Result<JSValue> {
        self.json_with_path(&mut ActiveObjects::default(), variables)
    }
}

impl<'a> ValueFromNode for Value<'a> {
    #[inline]
    fn json_with_path(
        &self,
        path: &mut ActiveObjects,
        variables: Option<&JSVariables>,
    ) -> Result<JSValue> {
        match self {
            Value::Variable(var) => var.json_with_path(path, variables),
            Value::List(list) => list.json_with_path(path, variables),
            Value::Objects(list) => list.json_with_path(path, variables),
            Value::Object(obj) => obj.json_with_path(path, variables),
            Value::Int(node) => node.json_with_path(path, variables),
            Value::Float(node) => node.json_with_path(path, variables),
            Value::Boolean(node) => node.json_with_path(path, variables),
            Value::String(node) => node.json_with_path(path, variables),
            Value::Enum(node) => node.json_with_path(path, variables),
            Value::Bytes(node) => node.json_with_path(path, variables),
            Value::Null => Ok(JSValue::Null),
        }
    }
}

impl<'a> ValueFromNode for IntValue<'a> {
    /// Convert current IntValue Node to a [serde_json::Value].
    ///
    /// Integers that don't fit into 64 bits are kept as strings.
    #[inline]
    fn json_with_path(&self, _: &mut ActiveObjects, _: Option<&JSVariables>) -> Result<JSValue> {
        if let Ok(int) = self.value.parse::<i64>() {
            Ok(int.into())
        } else if let Ok(int) = self.value.parse::<u64>() {
            Ok(int.into())
        } else {
            Ok(self.value.into())
        }
    }
}

impl<'a> ValueFromNode for FloatValue<'a> {
    /// Convert current FloatValue Node to a [serde_json::Value].
    #[inline]
    fn json_with_path(&self, _: &mut ActiveObjects, _: Option<&JSVariables>) -> Result<JSValue> {
        match self.value.parse::<f64>() {
            Ok(value) => Ok(value.into()),
            Err(_) => Ok(self.value.into()),
        }
    }
}

impl ValueFromNode for BooleanValue {
    #[inline]
    fn json_with_path(&self, _: &mut ActiveObjects, _: Option<&JSVariables>) -> Result<JSValue> {
        Ok(self.value.into())
    }
}

impl<'a> ValueFromNode for StringValue<'a> {
    #[inline]
    fn json_with_path(&self, _: &mut ActiveObjects, _: Option<&JSVariables>) -> Result<JSValue> {
        Ok(self.value.into())
    }
}

impl<'a> ValueFromNode for EnumValue<'a> {
    #[inline]
    fn json_with_path(&self, _: &mut ActiveObjects, _: Option<&JSVariables>) -> Result<JSValue> {
        Ok(self.value.into())
    }
}

impl<'a> ValueFromNode for BytesValue<'a> {
    /// Convert current BytesValue Node to an array of numbers.
    #[inline]
    fn json_with_path(&self, _: &mut ActiveObjects, _: Option<&JSVariables>) -> Result<JSValue> {
        Ok(self.bytes.iter().map(|byte| JSValue::from(*byte)).collect())
    }
}

impl<'a> ValueFromNode for Variable<'a> {
    /// Convert current Variable Node to its value in the given variables or `null`.
    #[inline]
    fn json_with_path(
        &self,
        _: &mut ActiveObjects,
        variables: Option<&JSVariables>,
    ) -> Result<JSValue> {
        Ok(variables
            .and_then(|vars| vars.get(self.name))
            .cloned()
            .unwrap_or(JSValue::Null))
    }
}

impl<'a> ValueFromNode for ListValue<'a> {
    fn json_with_path(
        &self,
        path: &mut ActiveObjects,
        variables: Option<&JSVariables>,
    ) -> Result<JSValue> {
        let mut list = std::vec::Vec::with_capacity(self.children.len());
        for value in self.children.iter() {
            list.push(value.json_with_path(path, variables)?);
        }
        Ok(JSValue::Array(list))
    }
}

impl<'a> ValueFromNode for ObjectListValue<'a> {
    fn json_with_path(
        &self,
        path: &mut ActiveObjects,
        variables: Option<&JSVariables>,
    ) -> Result<JSValue> {
        let mut list = std::vec::Vec::with_capacity(self.children.len());
        for object in self.children.iter() {
            list.push(object.json_with_path(path, variables)?);
        }
        Ok(JSValue::Array(list))
    }
}

impl<'a> ValueFromNode for InputObject<'a> {
    fn json_with_path(
        &self,
        path: &mut ActiveObjects,
        variables: Option<&JSVariables>,
    ) -> Result<JSValue> {
        path.enter(self)?;
        let mut map = JSMap::new();
        for field in self.children().iter() {
            map.insert(
                field.name.to_string(),
                field.value.json_with_path(path, variables)?,
            );
        }
        path.leave(self);
        Ok(JSValue::Object(map))
    }
}

impl<'a> ValueFromNode for Arguments<'a> {
    /// Convert current Arguments to a JSON object keyed by the arguments' names.
    fn json_with_path(
        &self,
        path: &mut ActiveObjects,
        variables: Option<&JSVariables>,
    ) -> Result<JSValue> {
        let mut map = JSMap::new();
        for argument in self.children.iter() {
            map.insert(
                argument.name.to_string(),
                argument.value.json_with_path(path, variables)?,
            );
        }
        Ok(JSValue::Object(map))
    }
}

/// Convert AST Value Node to a [serde_json::Value] with given variables.
pub fn value_from_ast_untyped(value: &Value, variables: Option<&JSVariables>) -> Result<JSValue> {
    value.to_json(variables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorType;
    use serde_json::json;

    #[test]
    fn scalars() {
        let ctx = ASTContext::new();
        let object = input_object(
            &ctx,
            [
                prop(&ctx, "int", 7).unwrap(),
                prop(&ctx, "float", 0.5).unwrap(),
                prop(&ctx, "string", "text").unwrap(),
                prop(&ctx, "enum", Value::enum_value("MOBILE_WEB")).unwrap(),
                prop(&ctx, "bytes", &[0u8, 255]).unwrap(),
                prop(&ctx, "null", Value::Null).unwrap(),
                prop(&ctx, "flag", false).unwrap(),
            ],
        );
        assert_eq!(
            object.to_json(None).unwrap(),
            json!({
                "int": 7,
                "float": 0.5,
                "string": "text",
                "enum": "MOBILE_WEB",
                "bytes": [0, 255],
                "null": null,
                "flag": false,
            })
        );
    }

    #[test]
    fn big_integers() {
        let ctx = ASTContext::new();
        let value = u128::MAX.into_value(&ctx).unwrap();
        assert_eq!(
            value.to_json(None).unwrap(),
            json!("340282366920938463463374607431768211455")
        );
        let value = u64::MAX.into_value(&ctx).unwrap();
        assert_eq!(value.to_json(None).unwrap(), json!(u64::MAX));
    }

    #[test]
    fn variables() {
        let ctx = ASTContext::new();
        let arguments = args(
            &ctx,
            [
                arg(&ctx, "id", Value::variable("id")).unwrap(),
                arg(&ctx, "first", Value::variable("first")).unwrap(),
            ],
        );
        let variables = json!({ "id": "user-1" });
        assert_eq!(
            arguments.to_json(variables.as_object()).unwrap(),
            json!({ "id": "user-1", "first": null })
        );
        assert_eq!(
            arguments.to_json(None).unwrap(),
            json!({ "id": null, "first": null })
        );
    }

    #[test]
    fn shared_objects() {
        let ctx = ASTContext::new();
        let shared = input_object(&ctx, [prop(&ctx, "level", 0).unwrap()]);
        let list = Value::objects(&ctx, [shared, shared]);
        assert_eq!(
            list.to_json(None).unwrap(),
            json!([{ "level": 0 }, { "level": 0 }])
        );
    }

    #[test]
    fn cyclic_objects() {
        let ctx = ASTContext::new();
        let parent = input_object(&ctx, [prop(&ctx, "level", 0).unwrap()]);
        let child = input_object(&ctx, [prop(&ctx, "parent", parent).unwrap()]);
        parent.append(prop(&ctx, "child", child).unwrap());
        let error = parent.to_json(None).unwrap_err();
        assert_eq!(error.error_type(), ErrorType::CyclicReference);
    }

    #[test]
    fn json_values_convert_back() {
        let ctx = ASTContext::new();
        let input = json!({ "list": [1, 2.5, "three", null, { "nested": true }] });
        let value = (&input).into_value(&ctx).unwrap();
        assert_eq!(value_from_ast_untyped(&value, None).unwrap(), input);
    }
}
