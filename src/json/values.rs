use bumpalo::collections::Vec;
use serde_json::Value as JSValue;

use crate::ast::*;
use crate::error::Result;

impl<'a, 'b> IntoValue<'a> for &'b JSValue {
    #[inline]
    fn into_value(self, ctx: &'a ASTContext) -> Result<Value<'a>> {
        ast_from_value_untyped(ctx, self)
    }
}

/// Convert [serde_json::Value] to an AST Value Node without casting the JSON value to a type.
///
/// Integers that fit into `i64` or `u64` become Int values and all other numbers become Float
/// values. Objects are put onto the arena as new input objects, keeping their key order.
pub fn ast_from_value_untyped<'a>(ctx: &'a ASTContext, value: &JSValue) -> Result<Value<'a>> {
    match value {
        JSValue::Array(list) => {
            let mut children = Vec::new_in(&ctx.arena);
            for item in list {
                children.push(ast_from_value_untyped(ctx, item)?);
            }
            Ok(Value::List(ListValue { children }))
        }
        JSValue::Object(map) => {
            let mut fields = Vec::new_in(&ctx.arena);
            for (key, value) in map {
                fields.push(InputObjectField {
                    name: ctx.alloc_str(key),
                    value: ast_from_value_untyped(ctx, value)?,
                });
            }
            Ok(Value::Object(InputObject::new_in(ctx, fields)))
        }
        JSValue::Number(num) => {
            if let Some(int) = num.as_i64() {
                int.into_value(ctx)
            } else if let Some(int) = num.as_u64() {
                int.into_value(ctx)
            } else {
                num.as_f64().unwrap_or(0.0).into_value(ctx)
            }
        }
        JSValue::Bool(x) => Ok(Value::Boolean((*x).into())),
        JSValue::String(str) => Ok(Value::String(StringValue::new(ctx, str))),
        JSValue::Null => Ok(Value::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::ast_from_value_untyped;
    use crate::ast::*;
    use serde_json::json;

    #[test]
    fn scalars() {
        let ctx = ASTContext::new();
        let value = json!({
            "null": null,
            "bool": true,
            "int": -3,
            "big": u64::MAX,
            "float": 1.5,
            "string": "text",
        });
        let value = ast_from_value_untyped(&ctx, &value).unwrap();
        // Keys come out in the map's iteration order, which is sorted by default.
        assert_eq!(
            value.print().unwrap(),
            "{big: 18446744073709551615, bool: true, float: 1.5, int: -3, null: null, string: \"text\"}"
        );
    }

    #[test]
    fn nested_lists_and_objects() {
        let ctx = ASTContext::new();
        let input = json!({
            "orderBys": [{
                "equals": {
                    "value": 5
                }
            }],
        });
        let object = input_object(&ctx, [prop(&ctx, "where", &input).unwrap()]);
        assert_eq!(
            object.print().unwrap(),
            "{where: {orderBys: [{equals: {value: 5}}]}}"
        );
    }
}
