use super::ast::*;
use crate::error::{Error, ErrorType, Result};
use hashbrown::HashSet;
use std::{fmt, fmt::Write};
use tracing::{debug, trace, warn};

/// The set of input objects that are currently being printed, from the root value down to the
/// node that's being written.
///
/// An input object that's entered while it's already on this path is part of a reference cycle.
/// Objects are tracked by address, so the same object may still appear several times side by
/// side, as long as it isn't nested inside itself.
#[derive(Debug, Default)]
pub struct ActiveObjects {
    entered: HashSet<usize>,
}

impl ActiveObjects {
    /// Marks `object` as being printed, failing if it's already being printed.
    pub(crate) fn enter(&mut self, object: &InputObject) -> Result<()> {
        let address = object as *const InputObject as usize;
        if self.entered.insert(address) {
            Ok(())
        } else {
            let fields = object
                .children()
                .iter()
                .map(|field| field.name)
                .collect::<std::vec::Vec<_>>()
                .join(", ");
            warn!(depth = self.entered.len(), "input object references itself");
            Err(Error::new_with_context(
                "Input object was reached again while it was still being printed".to_string(),
                format!("input object {{{}}}", fields),
                ErrorType::CyclicReference,
            ))
        }
    }

    /// Marks `object` as done.
    pub(crate) fn leave(&mut self, object: &InputObject) {
        self.entered.remove(&(object as *const InputObject as usize));
    }
}

/// Trait for printing AST Nodes to a new String allocated on the heap.
/// This is implemented by all AST Nodes and can hence be used to granularly print GraphQL language.
/// However, mostly this will be used via [`Document::render`].
///
/// This typically is the last operation that's done in a given AST context and is hence outside
/// of its lifetime and arena.
///
/// AST Nodes don't implement [`fmt::Display`], since printing fails on input objects that are
/// nested inside themselves and `Display` can't report that error.
pub trait PrintNode {
    /// Write an AST node to a buffer implementing the [Write] trait.
    ///
    /// The `level` indicates the level of nesting, which increases with each [`SelectionSet`]
    /// and is typically initialized as zero (`0`). The `path` tracks the input objects that are
    /// being printed to reject reference cycles.
    fn write_to_buffer(
        &self,
        level: usize,
        path: &mut ActiveObjects,
        buffer: &mut dyn Write,
    ) -> Result<()>;

    /// Print an AST Node to source text as a String allocated on the heap.
    ///
    /// Either the complete text is returned or an error. No partial output is kept.
    fn print(&self) -> Result<String> {
        let mut buf = String::new();
        self.write_to_buffer(0, &mut ActiveObjects::default(), &mut buf)?;
        Ok(buf)
    }
}

impl<'a> PrintNode for NamedType<'a> {
    #[inline]
    fn write_to_buffer(
        &self,
        _level: usize,
        _path: &mut ActiveObjects,
        buffer: &mut dyn Write,
    ) -> Result<()> {
        Ok(buffer.write_str(self.name)?)
    }
}

impl<'a> PrintNode for Variable<'a> {
    #[inline]
    fn write_to_buffer(
        &self,
        _level: usize,
        _path: &mut ActiveObjects,
        buffer: &mut dyn Write,
    ) -> Result<()> {
        Ok(write!(buffer, "${}", self.name)?)
    }
}

impl PrintNode for BooleanValue {
    #[inline]
    fn write_to_buffer(
        &self,
        _level: usize,
        _path: &mut ActiveObjects,
        buffer: &mut dyn Write,
    ) -> Result<()> {
        match self.value {
            true => buffer.write_str("true")?,
            false => buffer.write_str("false")?,
        };
        Ok(())
    }
}

impl<'a> PrintNode for EnumValue<'a> {
    #[inline]
    fn write_to_buffer(
        &self,
        _level: usize,
        _path: &mut ActiveObjects,
        buffer: &mut dyn Write,
    ) -> Result<()> {
        Ok(buffer.write_str(self.value)?)
    }
}

impl<'a> PrintNode for FloatValue<'a> {
    #[inline]
    fn write_to_buffer(
        &self,
        _level: usize,
        _path: &mut ActiveObjects,
        buffer: &mut dyn Write,
    ) -> Result<()> {
        Ok(buffer.write_str(self.value)?)
    }
}

impl<'a> PrintNode for IntValue<'a> {
    #[inline]
    fn write_to_buffer(
        &self,
        _level: usize,
        _path: &mut ActiveObjects,
        buffer: &mut dyn Write,
    ) -> Result<()> {
        Ok(buffer.write_str(self.value)?)
    }
}

impl<'a> PrintNode for StringValue<'a> {
    #[inline]
    fn write_to_buffer(
        &self,
        _level: usize,
        _path: &mut ActiveObjects,
        buffer: &mut dyn Write,
    ) -> Result<()> {
        // See: https://github.com/graphql-rust/graphql-parser/blob/ff34bae/src/format.rs#L127-L167
        buffer.write_char('"')?;
        for c in self.value.chars() {
            match c {
                '\r' => buffer.write_str(r"\r")?,
                '\n' => buffer.write_str(r"\n")?,
                '\t' => buffer.write_str(r"\t")?,
                '\u{0008}' => buffer.write_str(r"\b")?,
                '\u{000C}' => buffer.write_str(r"\f")?,
                '"' => buffer.write_str("\\\"")?,
                '\\' => buffer.write_str(r"\\")?,
                '\u{0000}'..='\u{001F}' | '\u{007F}' => write!(buffer, "\\u{:04X}", c as u32)?,
                _ => buffer.write_char(c)?,
            };
        }
        Ok(buffer.write_char('"')?)
    }
}

impl<'a> PrintNode for BytesValue<'a> {
    #[inline]
    fn write_to_buffer(
        &self,
        _level: usize,
        _path: &mut ActiveObjects,
        buffer: &mut dyn Write,
    ) -> Result<()> {
        buffer.write_str("[")?;
        let mut first = true;
        for byte in self.bytes.iter() {
            if first {
                first = false;
            } else {
                buffer.write_str(", ")?;
            }
            write!(buffer, "{}", byte)?;
        }
        Ok(buffer.write_str("]")?)
    }
}

impl<'a> PrintNode for Value<'a> {
    #[inline]
    fn write_to_buffer(
        &self,
        level: usize,
        path: &mut ActiveObjects,
        buffer: &mut dyn Write,
    ) -> Result<()> {
        match self {
            Value::Boolean(value) => value.write_to_buffer(level, path, buffer),
            Value::Enum(value) => value.write_to_buffer(level, path, buffer),
            Value::Float(value) => value.write_to_buffer(level, path, buffer),
            Value::Int(value) => value.write_to_buffer(level, path, buffer),
            Value::String(value) => value.write_to_buffer(level, path, buffer),
            Value::Variable(value) => value.write_to_buffer(level, path, buffer),
            Value::Bytes(value) => value.write_to_buffer(level, path, buffer),
            Value::List(value) => value.write_to_buffer(level, path, buffer),
            Value::Objects(value) => value.write_to_buffer(level, path, buffer),
            Value::Object(value) => value.write_to_buffer(level, path, buffer),
            Value::Null => Ok(buffer.write_str("null")?),
        }
    }
}

impl<'a> PrintNode for InputObjectField<'a> {
    #[inline]
    fn write_to_buffer(
        &self,
        level: usize,
        path: &mut ActiveObjects,
        buffer: &mut dyn Write,
    ) -> Result<()> {
        write!(buffer, "{}: ", self.name)?;
        self.value.write_to_buffer(level, path, buffer)
    }
}

impl<'a> PrintNode for InputObject<'a> {
    fn write_to_buffer(
        &self,
        level: usize,
        path: &mut ActiveObjects,
        buffer: &mut dyn Write,
    ) -> Result<()> {
        path.enter(self)?;
        buffer.write_str("{")?;
        let mut first = true;
        for field in self.children().iter() {
            if first {
                first = false;
            } else {
                buffer.write_str(", ")?;
            }
            field.write_to_buffer(level, path, buffer)?;
        }
        buffer.write_str("}")?;
        path.leave(self);
        Ok(())
    }
}

impl<'a> PrintNode for ListValue<'a> {
    #[inline]
    fn write_to_buffer(
        &self,
        level: usize,
        path: &mut ActiveObjects,
        buffer: &mut dyn Write,
    ) -> Result<()> {
        buffer.write_str("[")?;
        let mut first = true;
        for value in self.children.iter() {
            if first {
                first = false;
            } else {
                buffer.write_str(", ")?;
            }
            value.write_to_buffer(level, path, buffer)?;
        }
        Ok(buffer.write_str("]")?)
    }
}

impl<'a> PrintNode for ObjectListValue<'a> {
    #[inline]
    fn write_to_buffer(
        &self,
        level: usize,
        path: &mut ActiveObjects,
        buffer: &mut dyn Write,
    ) -> Result<()> {
        buffer.write_str("[")?;
        let mut first = true;
        for object in self.children.iter() {
            if first {
                first = false;
            } else {
                buffer.write_str(", ")?;
            }
            object.write_to_buffer(level, path, buffer)?;
        }
        Ok(buffer.write_str("]")?)
    }
}

impl<'a> PrintNode for Argument<'a> {
    #[inline]
    fn write_to_buffer(
        &self,
        level: usize,
        path: &mut ActiveObjects,
        buffer: &mut dyn Write,
    ) -> Result<()> {
        write!(buffer, "{}: ", self.name)?;
        self.value.write_to_buffer(level, path, buffer)
    }
}

impl<'a> PrintNode for Arguments<'a> {
    #[inline]
    fn write_to_buffer(
        &self,
        level: usize,
        path: &mut ActiveObjects,
        buffer: &mut dyn Write,
    ) -> Result<()> {
        if !self.is_empty() {
            buffer.write_str("(")?;
            let mut first = true;
            for argument in self.children.iter() {
                if first {
                    first = false;
                } else {
                    buffer.write_str(", ")?;
                }
                argument.write_to_buffer(level, path, buffer)?;
            }
            buffer.write_str(")")?;
        }
        Ok(())
    }
}

impl<'a> PrintNode for SelectionSet<'a> {
    #[inline]
    fn write_to_buffer(
        &self,
        level: usize,
        path: &mut ActiveObjects,
        buffer: &mut dyn Write,
    ) -> Result<()> {
        if !self.is_empty() {
            let level = level + 1;
            buffer.write_str("{")?;
            for field in self.selections.iter() {
                buffer.write_char('\n')?;
                write_indent(level, buffer)?;
                field.write_to_buffer(level, path, buffer)?;
            }
            buffer.write_char('\n')?;
            write_indent(level - 1, buffer)?;
            buffer.write_char('}')?;
        }
        Ok(())
    }
}

impl<'a> PrintNode for Field<'a> {
    #[inline]
    fn write_to_buffer(
        &self,
        level: usize,
        path: &mut ActiveObjects,
        buffer: &mut dyn Write,
    ) -> Result<()> {
        if let Some(alias) = self.alias {
            write!(buffer, "{}: {}", alias, self.name)?;
        } else {
            buffer.write_str(self.name)?;
        };
        self.arguments.write_to_buffer(level, path, buffer)?;
        if !self.selection_set.is_empty() {
            buffer.write_str(" ")?;
        };
        self.selection_set.write_to_buffer(level, path, buffer)
    }
}

impl<'a> PrintNode for Type<'a> {
    #[inline]
    fn write_to_buffer(
        &self,
        level: usize,
        path: &mut ActiveObjects,
        buffer: &mut dyn Write,
    ) -> Result<()> {
        match self {
            Type::NamedType(name) => name.write_to_buffer(level, path, buffer),
            Type::ListType(inner) => {
                buffer.write_str("[")?;
                inner.write_to_buffer(level, path, buffer)?;
                Ok(buffer.write_str("]")?)
            }
            Type::NonNullType(inner) => {
                inner.write_to_buffer(level, path, buffer)?;
                Ok(buffer.write_str("!")?)
            }
        }
    }
}

impl<'a> PrintNode for VariableDefinition<'a> {
    #[inline]
    fn write_to_buffer(
        &self,
        level: usize,
        path: &mut ActiveObjects,
        buffer: &mut dyn Write,
    ) -> Result<()> {
        self.variable.write_to_buffer(level, path, buffer)?;
        buffer.write_str(": ")?;
        self.of_type.write_to_buffer(level, path, buffer)?;
        if let Some(default_value) = &self.default_value {
            buffer.write_str(" = ")?;
            default_value.write_to_buffer(level, path, buffer)?;
        }
        Ok(())
    }
}

impl<'a> PrintNode for VariableDefinitions<'a> {
    #[inline]
    fn write_to_buffer(
        &self,
        level: usize,
        path: &mut ActiveObjects,
        buffer: &mut dyn Write,
    ) -> Result<()> {
        if !self.is_empty() {
            buffer.write_str("(")?;
            let mut first = true;
            for var_definition in self.children.iter() {
                if first {
                    first = false;
                } else {
                    buffer.write_str(", ")?;
                }
                var_definition.write_to_buffer(level, path, buffer)?;
            }
            buffer.write_str(")")?;
        }
        Ok(())
    }
}

impl<'a> PrintNode for Operation<'a> {
    #[inline]
    fn write_to_buffer(
        &self,
        level: usize,
        path: &mut ActiveObjects,
        buffer: &mut dyn Write,
    ) -> Result<()> {
        buffer.write_str(self.operation.as_str())?;
        if let Some(name) = self.name {
            buffer.write_str(" ")?;
            buffer.write_str(name)?;
        };
        if self.name.is_none() && !self.variable_definitions.is_empty() {
            buffer.write_str(" ")?;
        }
        self.variable_definitions.write_to_buffer(level, path, buffer)?;
        buffer.write_str(" ")?;
        if self.selection_set.is_empty() {
            Ok(buffer.write_str("{}")?)
        } else {
            self.selection_set.write_to_buffer(level, path, buffer)
        }
    }
}

impl<'a> PrintNode for Document<'a> {
    #[inline]
    fn write_to_buffer(
        &self,
        level: usize,
        path: &mut ActiveObjects,
        buffer: &mut dyn Write,
    ) -> Result<()> {
        let mut first = true;
        for operation in self.operations.iter() {
            if first {
                first = false;
            } else {
                buffer.write_str("\n\n")?;
            }
            trace!(
                kind = operation.operation.as_str(),
                name = ?operation.name,
                "printing operation"
            );
            operation.write_to_buffer(level, path, buffer)?;
        }
        Ok(())
    }
}

impl<'a> Document<'a> {
    /// Renders this document to GraphQL request text.
    ///
    /// Rendering is deterministic: the same document always renders to the same text. It fails
    /// when an input object is nested inside itself, in which case no text is returned.
    pub fn render(&self) -> Result<String> {
        let output = self.print()?;
        debug!(
            operations = self.operations.len(),
            length = output.len(),
            "rendered GraphQL document"
        );
        Ok(output)
    }
}

#[inline(always)]
fn write_indent(level: usize, buffer: &mut dyn Write) -> fmt::Result {
    for _ in 0..level {
        buffer.write_str("  ")?
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::error::ErrorType;

    #[test]
    fn values() {
        let ctx = ASTContext::new();
        let object = input_object(
            &ctx,
            [
                prop(&ctx, "a", true).unwrap(),
                prop(&ctx, "b", Value::list(&ctx, [1, 2]).unwrap()).unwrap(),
            ],
        );
        assert_eq!(object.print().unwrap(), "{a: true, b: [1, 2]}");
        assert_eq!(Value::Null.print().unwrap(), "null");
        assert_eq!(input_object(&ctx, []).print().unwrap(), "{}");
    }

    #[test]
    fn arguments() {
        let ctx = ASTContext::new();
        assert_eq!(args(&ctx, []).print().unwrap(), "");
        let ast = args(&ctx, [arg(&ctx, "a", 1).unwrap()]);
        assert_eq!(ast.print().unwrap(), "(a: 1)");
        let ast = args(&ctx, [arg(&ctx, "a", 1).unwrap(), arg(&ctx, "b", 2).unwrap()]);
        assert_eq!(ast.print().unwrap(), "(a: 1, b: 2)");
    }

    #[test]
    fn selection_sets() {
        let ctx = ASTContext::new();
        let ast = field_with(&ctx, "field", [field(&ctx, "child")]);
        assert_eq!(ast.print().unwrap(), "field {\n  child\n}");
        let ast = field_with(
            &ctx,
            "field",
            [field_with(&ctx, "child", [field(&ctx, "child")])],
        );
        assert_eq!(
            ast.print().unwrap(),
            "field {\n  child {\n    child\n  }\n}"
        );
        let ast = field_with_args(
            &ctx,
            "field",
            args(&ctx, [arg(&ctx, "test", true).unwrap()]),
            [],
        );
        assert_eq!(ast.print().unwrap(), "field(test: true)");
    }

    #[test]
    fn _type() {
        let ctx = ASTContext::new();
        let ast = Type::named("Type").into_list(&ctx);
        assert_eq!(ast.print().unwrap(), "[Type]");
        let ast = Type::named("Type")
            .into_nonnull(&ctx)
            .into_list(&ctx)
            .into_nonnull(&ctx);
        assert_eq!(ast.print().unwrap(), "[Type!]!");
    }

    #[test]
    fn variable_definitions() {
        let ctx = ASTContext::new();
        let ast = vars(&ctx, [var("x", Type::named("Int"))]);
        assert_eq!(ast.print().unwrap(), "($x: Int)");
        let ast = vars(
            &ctx,
            [
                var_with_default(&ctx, "x", Type::named("Int"), 1).unwrap(),
                var("y", Type::named("Bool")),
            ],
        );
        assert_eq!(ast.print().unwrap(), "($x: Int = 1, $y: Bool)");
    }

    #[test]
    fn strings() {
        let ctx = ASTContext::new();
        let value = |text: &str| Value::String(StringValue::new(&ctx, text));
        assert_eq!(value("\u{0001}").print().unwrap(), "\"\\u0001\"");
        assert_eq!(value("\u{0019}").print().unwrap(), "\"\\u0019\"");
        assert_eq!(value("\0").print().unwrap(), "\"\\u0000\"");
        assert_eq!(value("say \"hi\"").print().unwrap(), "\"say \\\"hi\\\"\"");
        assert_eq!(value("C:\\path").print().unwrap(), "\"C:\\\\path\"");
        assert_eq!(value("line\nbreak").print().unwrap(), "\"line\\nbreak\"");
        assert_eq!(value("emoji 🦀").print().unwrap(), "\"emoji 🦀\"");
    }

    #[test]
    fn operation_definition() {
        let ctx = ASTContext::new();
        let ast = anonymous_operation(&ctx, OperationKind::Query, [field(&ctx, "field")]);
        assert_eq!(ast.print().unwrap(), "query {\n  field\n}");

        let ast = operation(&ctx, OperationKind::Query, "Name", [field(&ctx, "field")]);
        assert_eq!(ast.print().unwrap(), "query Name {\n  field\n}");

        let ast = operation(&ctx, OperationKind::Query, "Name", [field(&ctx, "field")])
            .with_variables(vars(&ctx, [var("var", Type::named("String"))]));
        assert_eq!(
            ast.print().unwrap(),
            "query Name($var: String) {\n  field\n}"
        );

        let ast = anonymous_operation(&ctx, OperationKind::Query, [field(&ctx, "field")])
            .with_variables(vars(&ctx, [var("var", Type::named("String"))]));
        assert_eq!(ast.print().unwrap(), "query ($var: String) {\n  field\n}");

        let ast = anonymous_operation(&ctx, OperationKind::Mutation, [field(&ctx, "doThing")]);
        assert_eq!(ast.print().unwrap(), "mutation {\n  doThing\n}");

        let ast = operation(&ctx, OperationKind::Subscription, "Empty", []);
        assert_eq!(ast.print().unwrap(), "subscription Empty {}");
    }

    #[test]
    fn documents() {
        let ctx = ASTContext::new();
        assert_eq!(document(&ctx, []).render().unwrap(), "");

        let ast = document(
            &ctx,
            [
                operation(&ctx, OperationKind::Query, "first", [field(&ctx, "a")]),
                operation(&ctx, OperationKind::Mutation, "second", [field(&ctx, "b")]),
            ],
        );
        let expected = indoc::indoc! {r#"
            query first {
              a
            }

            mutation second {
              b
            }"#};
        assert_eq!(ast.render().unwrap(), expected);
        assert_eq!(ast.print().unwrap(), expected);
    }

    #[test]
    fn order_preservation() {
        let ctx = ASTContext::new();
        let ast = document(
            &ctx,
            [anonymous_operation(
                &ctx,
                OperationKind::Query,
                [field_with_args(
                    &ctx,
                    "parent",
                    args(&ctx, [arg(&ctx, "z", 1).unwrap(), arg(&ctx, "a", 2).unwrap()]),
                    [
                        field(&ctx, "f1"),
                        field(&ctx, "f2"),
                        field(&ctx, "f3"),
                        field(&ctx, "f1"),
                    ],
                )],
            )],
        );
        let output = ast.render().unwrap();
        let f1 = output.find("f1").unwrap();
        let f2 = output.find("f2").unwrap();
        let f3 = output.find("f3").unwrap();
        assert!(f1 < f2 && f2 < f3);
        assert_eq!(output.matches("f1").count(), 2);
        assert!(output.find("z: 1").unwrap() < output.find("a: 2").unwrap());
    }

    #[test]
    fn determinism() {
        let ctx = ASTContext::new();
        let object = input_object(
            &ctx,
            (0..32).map(|index| prop(&ctx, ctx.alloc_string(format!("f{index}")), index).unwrap()),
        );
        let ast = document(
            &ctx,
            [anonymous_operation(
                &ctx,
                OperationKind::Query,
                [field_with_args(
                    &ctx,
                    "node",
                    args(&ctx, [arg(&ctx, "input", object).unwrap()]),
                    [],
                )],
            )],
        );
        assert_eq!(ast.render().unwrap(), ast.render().unwrap());
    }

    #[test]
    fn shared_objects() {
        let ctx = ASTContext::new();
        let shared = input_object(&ctx, [prop(&ctx, "id", 1).unwrap()]);
        let left = input_object(&ctx, [prop(&ctx, "shared", shared).unwrap()]);
        let right = input_object(
            &ctx,
            [
                prop(&ctx, "shared", shared).unwrap(),
                prop(&ctx, "list", [shared, shared]).unwrap(),
            ],
        );
        let ast = args(
            &ctx,
            [arg(&ctx, "left", left).unwrap(), arg(&ctx, "right", right).unwrap()],
        );
        assert_eq!(
            ast.print().unwrap(),
            "(left: {shared: {id: 1}}, right: {shared: {id: 1}, list: [{id: 1}, {id: 1}]})"
        );
    }

    #[test]
    fn cyclic_objects() {
        let ctx = ASTContext::new();
        let a = input_object(&ctx, [prop(&ctx, "name", "a").unwrap()]);
        let b = input_object(&ctx, [prop(&ctx, "parent", a).unwrap()]);
        a.append(prop(&ctx, "child", b).unwrap());

        let error = a.print().unwrap_err();
        assert_eq!(error.error_type(), ErrorType::CyclicReference);
        assert_eq!(error.context(), Some("input object {name, child}"));

        let ast = document(
            &ctx,
            [anonymous_operation(
                &ctx,
                OperationKind::Mutation,
                [field_with_args(
                    &ctx,
                    "update",
                    args(&ctx, [arg(&ctx, "input", b).unwrap()]),
                    [],
                )],
            )],
        );
        let error = ast.render().unwrap_err();
        assert_eq!(error.error_type(), ErrorType::CyclicReference);
        let error = ast.print().unwrap_err();
        assert_eq!(error.error_type(), ErrorType::CyclicReference);

        let mut buffer = String::new();
        let result = ast.write_to_buffer(0, &mut ActiveObjects::default(), &mut buffer);
        assert_eq!(result.unwrap_err().error_type(), ErrorType::CyclicReference);
    }

    #[test]
    fn self_reference_through_list() {
        let ctx = ASTContext::new();
        let a = input_object(&ctx, []);
        a.append(prop(&ctx, "lineage", [a]).unwrap());
        assert_eq!(
            a.print().unwrap_err().error_type(),
            ErrorType::CyclicReference
        );
    }
}
