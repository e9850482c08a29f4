//! Builder functions for composing request documents bottom-up.
//!
//! Each function allocates on the given [`ASTContext`] and returns the node it built, so nodes
//! can be nested directly inside one another:
//!
//! ```
//! use graphql_request::ast::*;
//!
//! # fn main() -> graphql_request::error::Result<()> {
//! let ctx = ASTContext::new();
//! let input = input_object(&ctx, [prop(&ctx, "name", "Ada")?]);
//! let document = document(
//!     &ctx,
//!     [operation(
//!         &ctx,
//!         OperationKind::Mutation,
//!         "createUser",
//!         [field_with_args(
//!             &ctx,
//!             "createUser",
//!             args(&ctx, [arg(&ctx, "input", input)?]),
//!             [field(&ctx, "id")],
//!         )],
//!     )],
//! );
//! assert_eq!(
//!     document.render()?,
//!     "mutation createUser {\n  createUser(input: {name: \"Ada\"}) {\n    id\n  }\n}"
//! );
//! # Ok(())
//! # }
//! ```

use super::ast::*;
use super::values::IntoValue;
use crate::error::Result;
use bumpalo::collections::{CollectIn, Vec};

/// Creates an input object from zero or more fields.
#[inline]
pub fn input_object<'a, I>(ctx: &'a ASTContext, fields: I) -> &'a InputObject<'a>
where
    I: IntoIterator<Item = InputObjectField<'a>>,
{
    InputObject::new_in(ctx, fields)
}

/// Creates a single input object field, coercing `value` into a [Value].
#[inline]
pub fn prop<'a, V>(ctx: &'a ASTContext, name: &'a str, value: V) -> Result<InputObjectField<'a>>
where
    V: IntoValue<'a>,
{
    Ok(InputObjectField {
        name,
        value: value.into_value(ctx)?,
    })
}

/// Creates a single argument, coercing `value` into a [Value].
#[inline]
pub fn arg<'a, V>(ctx: &'a ASTContext, name: &'a str, value: V) -> Result<Argument<'a>>
where
    V: IntoValue<'a>,
{
    Ok(Argument {
        name,
        value: value.into_value(ctx)?,
    })
}

/// Creates an ordered list of arguments.
#[inline]
pub fn args<'a, I>(ctx: &'a ASTContext, arguments: I) -> Arguments<'a>
where
    I: IntoIterator<Item = Argument<'a>>,
{
    Arguments {
        children: arguments.into_iter().collect_in(&ctx.arena),
    }
}

/// Creates a leaf field that selects a scalar.
#[inline]
pub fn field<'a>(ctx: &'a ASTContext, name: &'a str) -> Field<'a> {
    Field::new_leaf(ctx, name)
}

/// Creates a field without arguments that selects the given child fields.
#[inline]
pub fn field_with<'a, I>(ctx: &'a ASTContext, name: &'a str, children: I) -> Field<'a>
where
    I: IntoIterator<Item = Field<'a>>,
{
    field_with_args(ctx, name, Arguments::default_in(&ctx.arena), children)
}

/// Creates a field with arguments that selects the given child fields.
///
/// Passing no children creates a leaf field with arguments.
pub fn field_with_args<'a, I>(
    ctx: &'a ASTContext,
    name: &'a str,
    arguments: Arguments<'a>,
    children: I,
) -> Field<'a>
where
    I: IntoIterator<Item = Field<'a>>,
{
    Field {
        alias: None,
        name,
        arguments,
        selection_set: SelectionSet {
            selections: children.into_iter().collect_in(&ctx.arena),
        },
    }
}

/// Creates a named operation that selects the given top-level fields.
#[inline]
pub fn operation<'a, I>(
    ctx: &'a ASTContext,
    kind: OperationKind,
    name: &'a str,
    fields: I,
) -> Operation<'a>
where
    I: IntoIterator<Item = Field<'a>>,
{
    Operation {
        name: Some(name),
        ..anonymous_operation(ctx, kind, fields)
    }
}

/// Creates an operation without a name that selects the given top-level fields.
pub fn anonymous_operation<'a, I>(
    ctx: &'a ASTContext,
    kind: OperationKind,
    fields: I,
) -> Operation<'a>
where
    I: IntoIterator<Item = Field<'a>>,
{
    Operation {
        operation: kind,
        name: None,
        variable_definitions: VariableDefinitions::default_in(&ctx.arena),
        selection_set: SelectionSet {
            selections: fields.into_iter().collect_in(&ctx.arena),
        },
    }
}

/// Creates the root document from an ordered list of operations.
#[inline]
pub fn document<'a, I>(ctx: &'a ASTContext, operations: I) -> Document<'a>
where
    I: IntoIterator<Item = Operation<'a>>,
{
    Document {
        operations: operations.into_iter().collect_in(&ctx.arena),
    }
}

/// Creates a variable definition `$name: Type` without a default value.
#[inline]
pub fn var<'a>(name: &'a str, of_type: Type<'a>) -> VariableDefinition<'a> {
    VariableDefinition {
        variable: Variable { name },
        of_type,
        default_value: None,
    }
}

/// Creates a variable definition `$name: Type = default`.
#[inline]
pub fn var_with_default<'a, V>(
    ctx: &'a ASTContext,
    name: &'a str,
    of_type: Type<'a>,
    default_value: V,
) -> Result<VariableDefinition<'a>>
where
    V: IntoValue<'a>,
{
    Ok(VariableDefinition {
        default_value: Some(default_value.into_value(ctx)?),
        ..var(name, of_type)
    })
}

/// Creates an ordered list of variable definitions.
#[inline]
pub fn vars<'a, I>(ctx: &'a ASTContext, definitions: I) -> VariableDefinitions<'a>
where
    I: IntoIterator<Item = VariableDefinition<'a>>,
{
    let children: Vec<'a, VariableDefinition<'a>> = definitions.into_iter().collect_in(&ctx.arena);
    VariableDefinitions { children }
}
